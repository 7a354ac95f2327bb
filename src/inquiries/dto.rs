use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateInquiryRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl CreateInquiryRequest {
    /// Both fields must be present and non-empty; whitespace counts as content.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.is_empty() || self.description.is_empty() {
            return Err(AppError::Validation(
                "Title and description are required".into(),
            ));
        }
        Ok(())
    }
}
