use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    auth::repo_types::User,
    config::AppConfig,
    inquiries::{repo as inquiry_repo, repo_types::Inquiry},
    store::{Store, StoreError, StoreResult},
};

/// Postgres-backed `Store`.
#[derive(Clone)]
pub struct PgStore {
    pub db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let url = config
            .database_url
            .as_deref()
            .context("DATABASE_URL is not configured")?;
        let db = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    /// Creates the schema if it does not exist yet.
    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<User> {
        User::create(&self.db, email, password_hash)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateEmail
                } else {
                    StoreError::Database(e)
                }
            })
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_email(&self.db, email).await?)
    }

    async fn find_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(User::find_by_id(&self.db, id).await?)
    }

    async fn list_inquiries_for_user(&self, user_id: i64) -> StoreResult<Vec<Inquiry>> {
        Ok(inquiry_repo::list_by_user(&self.db, user_id).await?)
    }

    async fn create_inquiry(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> StoreResult<Inquiry> {
        Ok(inquiry_repo::create(&self.db, user_id, title, description).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inquiries::repo_types::InquiryStatus;
    use time::OffsetDateTime;

    /// Needs a reachable Postgres in `DATABASE_URL`; run with `--ignored`.
    async fn connect() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let config = AppConfig::from_lookup(|key| match key {
            "DATABASE_URL" => Some(url.clone()),
            "JWT_SECRET" => Some("test".into()),
            "DB_MAX_CONNECTIONS" => Some("2".into()),
            _ => None,
        })
        .expect("config");
        let store = PgStore::connect(&config).await.expect("connect");
        store.migrate().await.expect("migrate");
        store
    }

    fn unique_email(tag: &str) -> String {
        format!("{tag}-{}@x.com", OffsetDateTime::now_utc().unix_timestamp_nanos())
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn duplicate_email_maps_to_duplicate_error() {
        let store = connect().await;
        let email = unique_email("dup");

        store.create_user(&email, "h1").await.expect("first insert");
        let err = store.create_user(&email, "h2").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail), "got {err:?}");

        let found = store.find_user_by_email(&email).await.unwrap().expect("user");
        assert_eq!(found.password_hash, "h1");
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn inquiries_list_newest_first_and_scoped_to_owner() {
        let store = connect().await;
        let a = store.create_user(&unique_email("a"), "h").await.unwrap();
        let b = store.create_user(&unique_email("b"), "h").await.unwrap();

        store.create_inquiry(b.id, "not mine", "d").await.unwrap();
        let mut created = Vec::new();
        for title in ["one", "two", "three"] {
            created.push(store.create_inquiry(a.id, title, "d").await.unwrap());
        }

        let list = store.list_inquiries_for_user(a.id).await.unwrap();
        created.reverse();
        assert_eq!(list, created);
        assert!(list.iter().all(|i| i.status == InquiryStatus::Pending));
    }
}
