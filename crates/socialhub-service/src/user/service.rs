//! User service: profiles, friendships, search, and online status.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use socialhub_core::error::{AppError, ErrorKind};
use socialhub_core::result::AppResult;
use socialhub_core::traits::{ChatStore, TokenLifetime, UserDirectory};
use socialhub_core::types::{Page, PageRequest, PolicyKind, UserRecord};
use socialhub_presence::{PresenceEngine, PresenceQuery};

/// A user together with their friend list.
#[derive(Debug, Clone)]
pub struct UserProfile {
    /// The user.
    pub user: UserRecord,
    /// Friends, in the order they were added.
    pub friends: Vec<UserRecord>,
}

/// A friend together with their current presence.
#[derive(Debug, Clone)]
pub struct FriendView {
    /// The friend.
    pub user: UserRecord,
    /// Whether the friend is online under the active policy.
    pub online: bool,
}

/// Handles profile, friendship, and UI-status operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User storage.
    directory: Arc<dyn UserDirectory>,
    /// Chats, purged along with their sender.
    chats: Arc<dyn ChatStore>,
    /// Presence write path.
    presence: PresenceEngine,
    /// Presence read path.
    query: PresenceQuery,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        chats: Arc<dyn ChatStore>,
        presence: PresenceEngine,
    ) -> Self {
        let query = PresenceQuery::new(presence.clone());
        Self {
            directory,
            chats,
            presence,
            query,
        }
    }

    /// Gets a user's profile with friends.
    pub async fn profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let user = self.find(user_id).await?;
        let friends = self.directory.friends_of(user_id).await?;
        Ok(UserProfile { user, friends })
    }

    /// Every registered user.
    pub async fn list(&self, page: &PageRequest) -> AppResult<Page<UserRecord>> {
        self.directory.list(page).await
    }

    /// Deletes the caller's own account.
    ///
    /// Chats the user sent go with it; chats they received stay with the
    /// sender. The presence record is left to expire.
    pub async fn destroy(&self, caller: Uuid, user_id: Uuid) -> AppResult<()> {
        ensure_self(caller, user_id)?;
        self.find(user_id).await?;
        self.chats.purge_user(user_id).await?;
        self.directory.delete(user_id).await?;
        info!(%user_id, "User account deleted");
        Ok(())
    }

    /// Friends of `user_id` whose first or last name contains `name`,
    /// ignoring case. The caller never appears in the results.
    pub async fn search(
        &self,
        caller: Uuid,
        user_id: Uuid,
        name: &str,
        page: &PageRequest,
    ) -> AppResult<Page<UserRecord>> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::validation("A name to search for is required"));
        }
        self.find(user_id).await?;

        let matches: Vec<UserRecord> = self
            .directory
            .friends_of(user_id)
            .await?
            .into_iter()
            .filter(|u| u.id != caller)
            .filter(|u| {
                u.first_name.to_lowercase().contains(&needle)
                    || u.last_name.to_lowercase().contains(&needle)
            })
            .collect();
        Ok(page.slice(matches))
    }

    /// Adds friends to the caller's own friend list and returns the new list.
    pub async fn add_friends(
        &self,
        caller: Uuid,
        user_id: Uuid,
        friend_ids: &[Uuid],
    ) -> AppResult<Vec<UserRecord>> {
        ensure_self(caller, user_id)?;
        let friends = self.directory.add_friends(user_id, friend_ids).await?;
        info!(%user_id, added = friend_ids.len(), total = friends.len(), "Friends added");
        Ok(friends)
    }

    /// Lists one page of a user's friends with their online status.
    ///
    /// One presence lookup per friend on the page.
    pub async fn friends(&self, user_id: Uuid, page: &PageRequest) -> AppResult<Page<FriendView>> {
        self.find(user_id).await?;
        let friends = page.slice(self.directory.friends_of(user_id).await?);
        let ids: Vec<Uuid> = friends.items.iter().map(|f| f.id).collect();
        let mut flags = self.query.online_flags(&ids).await.into_iter();

        Ok(friends.map(|user| FriendView {
            user,
            online: flags.next().unwrap_or(false),
        }))
    }

    /// Whether `user_id` is online under the active policy.
    pub async fn is_online(&self, user_id: Uuid) -> bool {
        self.query.is_online(user_id).await
    }

    /// Fails unless the caller may report UI status for `user_id` right now.
    ///
    /// The policy check comes first so that a wrong policy is reported
    /// regardless of the rest of the request.
    pub fn ensure_ui_status_allowed(&self, caller: Uuid, user_id: Uuid) -> AppResult<()> {
        let active = self.presence.active_kind();
        if active != PolicyKind::UiOpenIsOnline {
            return Err(AppError::method_not_allowed(format!(
                "UI online status is not used under the {active} policy"
            )));
        }
        ensure_self(caller, user_id)
    }

    /// Records whether the caller's UI is open.
    ///
    /// The presence record TTL is reset to what is left of `token`.
    pub async fn set_ui_status(
        &self,
        caller: Uuid,
        user_id: Uuid,
        token: &dyn TokenLifetime,
        ui_open: bool,
    ) -> AppResult<()> {
        self.ensure_ui_status_allowed(caller, user_id)?;

        match self.presence.set_online_status(user_id, token, ui_open).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind == ErrorKind::MethodNotAllowed => Err(e),
            Err(e) => {
                warn!(%user_id, error = %e, "UI status could not be recorded");
                Err(AppError::service_unavailable("Presence store is unavailable"))
            }
        }
    }

    async fn find(&self, user_id: Uuid) -> AppResult<UserRecord> {
        self.directory
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}

fn ensure_self(caller: Uuid, user_id: Uuid) -> AppResult<()> {
    if caller == user_id {
        Ok(())
    } else {
        Err(AppError::authorization("Users can only modify their own account"))
    }
}
