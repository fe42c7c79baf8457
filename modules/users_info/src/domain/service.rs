use std::sync::Arc;

use crate::contract::model::{DeleteStatus, NewUser, User, UserReply, UserUpdate};
use crate::domain::repo::UsersRepository;
use tracing::{debug, error, info, instrument};

/// Record store operations over the users table.
///
/// Storage errors never escape: each operation logs the error and answers
/// with one of the fixed sentinel replies instead.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    /// All users; an empty list on failure.
    #[instrument(name = "users_info.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Vec<User> {
        debug!("Listing users");

        match self.repo.list().await {
            Ok(users) => {
                debug!("Successfully listed {} users", users.len());
                users
            }
            Err(e) => {
                error!("Failed to list users: {:#}", e);
                Vec::new()
            }
        }
    }

    #[instrument(name = "users_info.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i64) -> UserReply {
        debug!("Getting user by id");

        match self.repo.find_by_id(id).await {
            Ok(Some(user)) => UserReply::Found(user),
            Ok(None) => {
                debug!("User not found");
                UserReply::NotFound
            }
            Err(e) => {
                error!("Failed to get user: {:#}", e);
                UserReply::LookupFailed
            }
        }
    }

    /// Insert, then read the row back by its new id.
    #[instrument(name = "users_info.service.add_user", skip(self, new_user))]
    pub async fn add_user(&self, new_user: NewUser) -> UserReply {
        info!("Creating new user");

        match self.repo.insert(&new_user).await {
            Ok(id) => {
                info!("Successfully created user with id={}", id);
                self.get_user(id).await
            }
            Err(e) => {
                error!("Failed to create user: {:#}", e);
                UserReply::Empty
            }
        }
    }

    /// Replace all fields, then read the row back. A missing id is not an
    /// error here; the read-back reports it as not found.
    #[instrument(
        name = "users_info.service.update_user",
        skip(self, update),
        fields(user_id = update.user_id)
    )]
    pub async fn update_user(&self, update: UserUpdate) -> UserReply {
        info!("Updating user");

        match self.repo.update(&update).await {
            Ok(rows) => {
                debug!("Update affected {} rows", rows);
                self.get_user(update.user_id).await
            }
            Err(e) => {
                error!("Failed to update user: {:#}", e);
                UserReply::Empty
            }
        }
    }

    /// Deleting an absent id still reports success.
    #[instrument(name = "users_info.service.delete_user", skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: i64) -> DeleteStatus {
        info!("Deleting user");

        match self.repo.delete(id).await {
            Ok(rows) => {
                debug!("Delete affected {} rows", rows);
                DeleteStatus::Deleted
            }
            Err(e) => {
                error!("Failed to delete user: {:#}", e);
                DeleteStatus::CannotDelete
            }
        }
    }
}
