use sqlx::PgPool;

use super::repo_types::{Inquiry, InquiryRow};

fn into_inquiry(row: InquiryRow) -> sqlx::Result<Inquiry> {
    Inquiry::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

/// All inquiries owned by `user_id`, newest first.
pub async fn list_by_user(db: &PgPool, user_id: i64) -> sqlx::Result<Vec<Inquiry>> {
    let rows = sqlx::query_as::<_, InquiryRow>(
        r#"
        SELECT id, user_id, title, description, status, created_at
        FROM inquiries
        WHERE user_id = $1
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    rows.into_iter().map(into_inquiry).collect()
}

/// Insert a pending inquiry and return the persisted row.
pub async fn create(
    db: &PgPool,
    user_id: i64,
    title: &str,
    description: &str,
) -> sqlx::Result<Inquiry> {
    let row = sqlx::query_as::<_, InquiryRow>(
        r#"
        INSERT INTO inquiries (user_id, title, description)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, title, description, status, created_at
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(description)
    .fetch_one(db)
    .await?;

    into_inquiry(row)
}
