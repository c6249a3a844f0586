use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::UpdateCredentialsCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    async fn find_existing(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        let password_hash = self.password_hasher.hash(&command.password)?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            is_chirpy_red: false,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User created");

        Ok(created_user)
    }

    async fn update_credentials(
        &self,
        id: &UserId,
        command: UpdateCredentialsCommand,
    ) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;

        user.email = command.email;
        user.password_hash = self.password_hasher.hash(&command.password)?;
        user.updated_at = Utc::now();

        self.repository.update(user).await
    }

    async fn upgrade_to_chirpy_red(&self, id: &UserId) -> Result<User, UserError> {
        let mut user = self.find_existing(id).await?;

        if user.is_chirpy_red {
            return Ok(user);
        }

        user.is_chirpy_red = true;
        user.updated_at = Utc::now();

        let upgraded = self.repository.update(user).await?;
        tracing::info!(user_id = %upgraded.id, "User upgraded to Chirpy Red");

        Ok(upgraded)
    }
}
