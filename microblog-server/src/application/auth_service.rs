use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::User;
use crate::infrastructure::security::{SessionKeys, hash_password, verify_password};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: SessionKeys,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, keys: SessionKeys) -> Self {
        Self { users, keys }
    }

    pub fn keys(&self) -> &SessionKeys {
        &self.keys
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(id.to_string()))
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User, DomainError> {
        let hash = hash_password(&password).map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = User::new(username, email.to_lowercase(), hash);
        self.users.create(user).await
    }

    /// Checks the credentials and returns a signed session token for the
    /// cookie. Unknown usernames and wrong passwords are indistinguishable
    /// to the caller.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let valid =
            verify_password(password, &user.password_hash).map_err(|_| DomainError::Unauthorized)?;
        if !valid {
            return Err(DomainError::Unauthorized);
        }

        self.keys
            .issue(user.id)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }
}
