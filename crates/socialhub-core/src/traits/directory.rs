//! User directory trait backing registration, login and friend lists.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::{NewUser, Page, PageRequest, UserRecord};

/// Persistent user and friendship storage.
///
/// Friendships are symmetric: adding `b` as a friend of `a` also makes `a` a
/// friend of `b`.
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug + 'static {
    /// Look up a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<UserRecord>>;

    /// Look up a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Create an inactive user. Fails with a conflict if the email is taken.
    async fn create(&self, new_user: NewUser) -> AppResult<UserRecord>;

    /// Every user, oldest registration first.
    async fn list(&self, page: &PageRequest) -> AppResult<Page<UserRecord>>;

    /// Remove a user together with their email and friendships.
    ///
    /// Fails with not-found if the user does not exist.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Mark a user as confirmed and active.
    async fn activate(&self, id: Uuid) -> AppResult<UserRecord>;

    /// Friends of a user, ordered by the time the friendship was added.
    async fn friends_of(&self, id: Uuid) -> AppResult<Vec<UserRecord>>;

    /// Add friendships and return the user's updated friend list.
    async fn add_friends(&self, id: Uuid, friend_ids: &[Uuid]) -> AppResult<Vec<UserRecord>>;
}
