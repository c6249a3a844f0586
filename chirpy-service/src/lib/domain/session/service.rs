use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;

use crate::domain::session::errors::ErrorKind;
use crate::domain::session::errors::SessionError;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::LoginResult;
use crate::domain::session::ports::RefreshTokenRepository;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::session::store::RefreshTokenStore;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service composing password checks, access tokens and refresh tokens.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: RefreshTokenStore<RR>,
    authenticator: Arc<Authenticator>,
    access_token_ttl: Duration,
    /// Hash of a random secret, verified against when the email is unregistered
    decoy_hash: Option<String>,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence, used to look up credentials
    /// * `refresh_tokens` - Refresh token persistence
    /// * `authenticator` - Password and access token primitives
    /// * `access_token_ttl` - Configured access token lifetime (clamped to the maximum)
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
        access_token_ttl: Duration,
    ) -> Self {
        let decoy_hash = auth::generate_refresh_token()
            .ok()
            .and_then(|secret| authenticator.hash_password(&secret).ok());

        Self {
            users,
            refresh_tokens: RefreshTokenStore::new(refresh_tokens),
            authenticator,
            access_token_ttl: auth::clamp_access_token_ttl(Some(access_token_ttl)),
            decoy_hash,
        }
    }

    async fn start_session(&self, command: LoginCommand) -> Result<LoginResult, SessionError> {
        let user = match self.users.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                // Spend the same Argon2 work as a wrong password would.
                if let Some(decoy_hash) = &self.decoy_hash {
                    let _ = self
                        .authenticator
                        .verify_password(&command.password, decoy_hash);
                }
                tracing::debug!("Login attempt for unregistered email");
                return Err(SessionError::InvalidCredentials);
            }
        };

        let ttl = match command.expires_in {
            Some(requested) => auth::clamp_access_token_ttl(Some(requested)),
            None => self.access_token_ttl,
        };

        let authenticated = self.authenticator.authenticate(
            &command.password,
            &user.password_hash,
            user.id.0,
            ttl,
        )?;

        let refresh_token = self.refresh_tokens.issue(&user.id).await?;
        tracing::info!(user_id = %user.id, "Session started");

        Ok(LoginResult {
            user,
            access_token: authenticated.access_token,
            refresh_token,
        })
    }

    async fn exchange(&self, refresh_token: &str) -> Result<String, SessionError> {
        let record = self.refresh_tokens.check(refresh_token).await?;

        Ok(self
            .authenticator
            .issue_access_token(record.user_id.0, self.access_token_ttl)?)
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<LoginResult, SessionError> {
        self.start_session(command).await.map_err(logged)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        self.exchange(refresh_token).await.map_err(logged)
    }

    async fn revoke(&self, refresh_token: &str) -> Result<(), SessionError> {
        let record = self
            .refresh_tokens
            .revoke(refresh_token)
            .await
            .map_err(logged)?;
        tracing::info!(user_id = %record.user_id, "Refresh token revoked");

        Ok(())
    }

    fn authorize(&self, access_token: &str) -> Result<UserId, SessionError> {
        self.authenticator
            .validate_access_token(access_token)
            .map(UserId)
            .map_err(|e| logged(SessionError::from(e)))
    }
}

fn logged(err: SessionError) -> SessionError {
    match err.kind() {
        ErrorKind::InternalFault => tracing::error!(error = %err, "Session operation failed"),
        ErrorKind::AuthFailure | ErrorKind::Validation => {
            tracing::warn!(error = %err, "Session request rejected")
        }
    }
    err
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::session::models::RefreshToken;
    use crate::domain::session::models::RefreshTokenRejection;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::user::errors::UserError;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
        }
    }

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError>;
            async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;
            async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>) -> Result<Option<RefreshToken>, SessionError>;
        }
    }

    fn user_with_password(password: &str) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new("a@b.com".to_string()).unwrap(),
            password_hash: auth::PasswordHasher::new().hash(password).unwrap(),
            is_chirpy_red: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn login_command(password: &str) -> LoginCommand {
        LoginCommand {
            email: EmailAddress::new("a@b.com".to_string()).unwrap(),
            password: password.to_string(),
            expires_in: None,
        }
    }

    fn service(
        users: MockTestUserRepository,
        refresh_tokens: MockTestRefreshTokenRepository,
    ) -> SessionService<MockTestUserRepository, MockTestRefreshTokenRepository> {
        SessionService::new(
            Arc::new(users),
            Arc::new(refresh_tokens),
            Arc::new(Authenticator::new(SECRET)),
            Duration::hours(1),
        )
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("correct-horse");
        let user_id = user.id;
        users
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));
        refresh_tokens
            .expect_create()
            .withf(move |record| record.user_id == user_id)
            .times(1)
            .returning(|record| Ok(record));

        let service = service(users, refresh_tokens);

        let result = service.login(login_command("correct-horse")).await.unwrap();

        assert_eq!(result.user.id, user_id);
        assert_eq!(service.authorize(&result.access_token).unwrap(), user_id);
        assert!(result.refresh_token.revoked_at.is_none());
        assert_eq!(
            result.refresh_token.expires_at - result.refresh_token.created_at,
            Duration::days(60)
        );
    }

    #[tokio::test]
    async fn test_login_wrong_password_issues_nothing() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("correct-horse");
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        refresh_tokens.expect_create().times(0);

        let service = service(users, refresh_tokens);

        let result = service.login(login_command("wrong-horse")).await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_looks_like_wrong_password() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        users.expect_find_by_email().returning(|_| Ok(None));
        refresh_tokens.expect_create().times(0);

        let service = service(users, refresh_tokens);

        let result = service.login(login_command("anything")).await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_password_check() {
        let mut users = MockTestUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let service = service(users, MockTestRefreshTokenRepository::new());

        let decoy_hash = service.decoy_hash.clone().expect("decoy hash is prepared");
        assert!(decoy_hash.starts_with("$argon2id$"));
        assert!(!Authenticator::new(SECRET)
            .verify_password("anything", &decoy_hash)
            .unwrap());

        let result = service.login(login_command("anything")).await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_corrupted_hash_is_internal_fault() {
        let mut users = MockTestUserRepository::new();
        let refresh_tokens = MockTestRefreshTokenRepository::new();

        let mut user = user_with_password("correct-horse");
        user.password_hash = "not-a-real-hash".to_string();
        users
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let service = service(users, refresh_tokens);

        let err = service
            .login(login_command("correct-horse"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Password(_)));
        assert_eq!(err.kind(), ErrorKind::InternalFault);
    }

    #[tokio::test]
    async fn test_login_twice_keeps_both_sessions() {
        let mut users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let user = user_with_password("correct-horse");
        users
            .expect_find_by_email()
            .times(2)
            .returning(move |_| Ok(Some(user.clone())));
        refresh_tokens
            .expect_create()
            .times(2)
            .returning(|record| Ok(record));
        refresh_tokens.expect_revoke().times(0);

        let service = service(users, refresh_tokens);

        let first = service.login(login_command("correct-horse")).await.unwrap();
        let second = service.login(login_command("correct-horse")).await.unwrap();
        assert_ne!(first.refresh_token.token, second.refresh_token.token);
    }

    #[tokio::test]
    async fn test_refresh_issues_access_token_for_owner() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let owner = UserId::new();
        refresh_tokens
            .expect_find_by_token()
            .returning(move |token| Ok(Some(RefreshToken::issue(token.to_string(), owner, Utc::now()))));

        let service = service(users, refresh_tokens);

        let access_token = service.refresh("live-token").await.unwrap();
        assert_eq!(service.authorize(&access_token).unwrap(), owner);
    }

    #[tokio::test]
    async fn test_refresh_reports_distinct_reasons() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens
            .expect_find_by_token()
            .returning(|token| match token {
                "expired" => Ok(Some(RefreshToken::issue(
                    token.to_string(),
                    UserId::new(),
                    Utc::now() - Duration::days(61),
                ))),
                "revoked" => {
                    let mut record =
                        RefreshToken::issue(token.to_string(), UserId::new(), Utc::now());
                    record.revoke(Utc::now());
                    Ok(Some(record))
                }
                _ => Ok(None),
            });

        let service = service(users, refresh_tokens);

        for (token, reason) in [
            ("expired", RefreshTokenRejection::Expired),
            ("revoked", RefreshTokenRejection::Revoked),
            ("unregistered", RefreshTokenRejection::Unknown),
        ] {
            let err = service.refresh(token).await.unwrap_err();
            assert!(
                matches!(err, SessionError::RefreshTokenRejected(r) if r == reason),
                "unexpected error for {}: {:?}",
                token,
                err
            );
            assert_eq!(err.kind(), ErrorKind::AuthFailure);
        }
    }

    #[tokio::test]
    async fn test_revoke_is_idempotent() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        let mut record = RefreshToken::issue("abc".to_string(), UserId::new(), Utc::now());
        record.revoke(Utc::now());
        refresh_tokens
            .expect_revoke()
            .times(2)
            .returning(move |_, _| Ok(Some(record.clone())));

        let service = service(users, refresh_tokens);

        assert!(service.revoke("abc").await.is_ok());
        assert!(service.revoke("abc").await.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_unknown_token() {
        let users = MockTestUserRepository::new();
        let mut refresh_tokens = MockTestRefreshTokenRepository::new();

        refresh_tokens.expect_revoke().returning(|_, _| Ok(None));

        let service = service(users, refresh_tokens);

        assert!(matches!(
            service.revoke("nope").await,
            Err(SessionError::RefreshTokenNotFound)
        ));
    }

    #[tokio::test]
    async fn test_authorize_rejects_expired_access_token() {
        let service = service(
            MockTestUserRepository::new(),
            MockTestRefreshTokenRepository::new(),
        );

        let token = Authenticator::new(SECRET)
            .issue_access_token(uuid::Uuid::new_v4(), Duration::seconds(-1))
            .unwrap();

        let err = service.authorize(&token).unwrap_err();
        assert!(matches!(
            err,
            SessionError::AccessTokenRejected(auth::AccessTokenError::TokenInvalid(
                auth::TokenRejection::Expired
            ))
        ));
    }
}
