use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use time::OffsetDateTime;

/// Lifecycle status of an inquiry. Stored as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InquiryStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::InProgress => "in-progress",
            InquiryStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown inquiry status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for InquiryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InquiryStatus::Pending),
            "in-progress" => Ok(InquiryStatus::InProgress),
            "completed" => Ok(InquiryStatus::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Raw `inquiries` row; `status` is still text.
#[derive(Debug, FromRow)]
pub struct InquiryRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub created_at: OffsetDateTime,
}

/// Inquiry record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub status: InquiryStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl TryFrom<InquiryRow> for Inquiry {
    type Error = UnknownStatus;

    fn try_from(r: InquiryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            title: r.title,
            description: r.description,
            status: r.status.parse()?,
            created_at: r.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn status_uses_kebab_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&InquiryStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(InquiryStatus::default(), InquiryStatus::Pending);
        assert_eq!("completed".parse::<InquiryStatus>().unwrap(), InquiryStatus::Completed);
        assert!("done".parse::<InquiryStatus>().is_err());
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let row = InquiryRow {
            id: 1,
            user_id: 1,
            title: "t".into(),
            description: "d".into(),
            status: "archived".into(),
            created_at: datetime!(2024-01-01 0:00 UTC),
        };
        let err = Inquiry::try_from(row).unwrap_err();
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn inquiry_serializes_with_rfc3339_timestamp() {
        let inquiry = Inquiry {
            id: 7,
            user_id: 3,
            title: "Billing".into(),
            description: "Question about invoice".into(),
            status: InquiryStatus::Pending,
            created_at: datetime!(2024-05-01 12:30 UTC),
        };
        let json = serde_json::to_value(&inquiry).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["user_id"], 3);
    }
}
