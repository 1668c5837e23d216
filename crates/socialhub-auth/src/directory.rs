//! In-process [`UserDirectory`] for development and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use socialhub_core::error::AppError;
use socialhub_core::result::AppResult;
use socialhub_core::traits::UserDirectory;
use socialhub_core::types::{NewUser, Page, PageRequest, UserRecord};

/// User directory kept entirely in memory.
///
/// Email uniqueness is enforced through an index keyed by lowercased email.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: DashMap<Uuid, UserRecord>,
    emails: DashMap<String, Uuid>,
    /// Friend lists in insertion order.
    friends: RwLock<HashMap<Uuid, Vec<Uuid>>>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self, ids: &[Uuid]) -> Vec<UserRecord> {
        ids.iter()
            .filter_map(|id| self.users.get(id).map(|u| u.clone()))
            .collect()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let Some(id) = self.emails.get(&email.trim().to_lowercase()).map(|id| *id) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn create(&self, new_user: NewUser) -> AppResult<UserRecord> {
        let email = new_user.email.trim().to_lowercase();
        let record = UserRecord {
            id: Uuid::new_v4(),
            email: email.clone(),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            is_active: false,
            confirmed_at: None,
            created_at: Utc::now(),
        };

        match self.emails.entry(email) {
            Entry::Occupied(_) => Err(AppError::conflict("A user with this email already exists")),
            Entry::Vacant(slot) => {
                slot.insert(record.id);
                self.users.insert(record.id, record.clone());
                info!(user_id = %record.id, "User created");
                Ok(record)
            }
        }
    }

    async fn list(&self, page: &PageRequest) -> AppResult<Page<UserRecord>> {
        let mut users: Vec<UserRecord> = self.users.iter().map(|u| u.value().clone()).collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(page.slice(users))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let (_, user) = self
            .users
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        self.emails.remove(&user.email);

        let mut friends = self.friends.write().await;
        if let Some(ids) = friends.remove(&id) {
            for friend in ids {
                if let Some(list) = friends.get_mut(&friend) {
                    list.retain(|f| *f != id);
                }
            }
        }

        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn activate(&self, id: Uuid) -> AppResult<UserRecord> {
        let mut user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        if !user.is_active {
            user.is_active = true;
            user.confirmed_at = Some(Utc::now());
        }
        Ok(user.clone())
    }

    async fn friends_of(&self, id: Uuid) -> AppResult<Vec<UserRecord>> {
        if !self.users.contains_key(&id) {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        let friends = self.friends.read().await;
        Ok(friends
            .get(&id)
            .map(|ids| self.records(ids))
            .unwrap_or_default())
    }

    async fn add_friends(&self, id: Uuid, friend_ids: &[Uuid]) -> AppResult<Vec<UserRecord>> {
        if !self.users.contains_key(&id) {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        if let Some(unknown) = friend_ids.iter().find(|f| !self.users.contains_key(f)) {
            return Err(AppError::validation(format!("Unknown user {unknown}")));
        }

        let mut friends = self.friends.write().await;
        for &friend in friend_ids.iter().filter(|&&f| f != id) {
            for (from, to) in [(id, friend), (friend, id)] {
                let list = friends.entry(from).or_default();
                if !list.contains(&to) {
                    list.push(to);
                }
            }
        }

        Ok(friends
            .get(&id)
            .map(|ids| self.records(ids))
            .unwrap_or_default())
    }
}
