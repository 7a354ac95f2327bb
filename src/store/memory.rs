use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;

use super::{Store, StoreError, StoreResult};
use crate::{
    auth::repo_types::User,
    inquiries::repo_types::{Inquiry, InquiryStatus},
};

#[derive(Default)]
struct Tables {
    users: HashMap<i64, User>,
    emails: HashMap<String, i64>, // email -> user id
    inquiries: Vec<Inquiry>,
    next_user_id: i64,
    next_inquiry_id: i64,
}

/// In-process store. All tables sit behind a single lock, so the email
/// check and the insert in `create_user` are one critical section.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<User> {
        let mut t = self.tables.lock().await;
        if t.emails.contains_key(email) {
            return Err(StoreError::DuplicateEmail);
        }
        t.next_user_id += 1;
        let user = User {
            id: t.next_user_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.emails.insert(user.email.clone(), user.id);
        t.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let t = self.tables.lock().await;
        Ok(t.emails.get(email).and_then(|id| t.users.get(id)).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn list_inquiries_for_user(&self, user_id: i64) -> StoreResult<Vec<Inquiry>> {
        let t = self.tables.lock().await;
        let mut out: Vec<Inquiry> = t
            .inquiries
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(out)
    }

    async fn create_inquiry(
        &self,
        user_id: i64,
        title: &str,
        description: &str,
    ) -> StoreResult<Inquiry> {
        let mut t = self.tables.lock().await;
        t.next_inquiry_id += 1;
        let inquiry = Inquiry {
            id: t.next_inquiry_id,
            user_id,
            title: title.to_string(),
            description: description.to_string(),
            status: InquiryStatus::Pending,
            created_at: OffsetDateTime::now_utc(),
        };
        t.inquiries.push(inquiry.clone());
        Ok(inquiry)
    }
}
