#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use auth::ApiKeyValidator;
use auth::Authenticator;
use chirpy_service::domain::session::errors::SessionError;
use chirpy_service::domain::session::models::RefreshToken;
use chirpy_service::domain::session::ports::RefreshTokenRepository;
use chirpy_service::domain::session::service::SessionService;
use chirpy_service::domain::user::errors::UserError;
use chirpy_service::domain::user::models::EmailAddress;
use chirpy_service::domain::user::models::User;
use chirpy_service::domain::user::models::UserId;
use chirpy_service::domain::user::ports::UserRepository;
use chirpy_service::domain::user::service::UserService;
use chirpy_service::inbound::http::router::create_router;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const POLKA_API_KEY: &str = "f271c81ff7084ee5b99a5091b42d486e";
pub const PASSWORD: &str = "04234";

/// In-memory user repository for testing
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<UserId, User>,
    by_email: DashMap<String, UserId>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        match self.by_email.entry(user.email.as_str().to_string()) {
            Entry::Occupied(_) => Err(UserError::EmailAlreadyExists(user.email.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert(user.id, user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.get(id).map(|r| r.value().clone()))
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .by_email
            .get(email.as_str())
            .and_then(|id| self.users.get(id.value()).map(|r| r.value().clone())))
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let previous_email = match self.users.get(&user.id) {
            Some(existing) => existing.email.as_str().to_string(),
            None => return Err(UserError::NotFound(user.id.to_string())),
        };

        if previous_email != user.email.as_str() {
            match self.by_email.entry(user.email.as_str().to_string()) {
                Entry::Occupied(_) => {
                    return Err(UserError::EmailAlreadyExists(user.email.to_string()))
                }
                Entry::Vacant(slot) => {
                    slot.insert(user.id);
                }
            }
            self.by_email.remove(&previous_email);
        }

        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

/// In-memory refresh token repository for testing
#[derive(Default)]
pub struct InMemoryRefreshTokenRepository {
    tokens: DashMap<String, RefreshToken>,
}

impl InMemoryRefreshTokenRepository {
    /// Insert a record directly, bypassing issuance
    pub fn insert(&self, record: RefreshToken) {
        self.tokens.insert(record.token.clone(), record);
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError> {
        match self.tokens.entry(token.token.clone()) {
            Entry::Occupied(_) => Err(SessionError::DatabaseError(
                "duplicate refresh token".to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(token.clone());
                Ok(token)
            }
        }
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError> {
        Ok(self.tokens.get(token).map(|r| r.value().clone()))
    }

    async fn revoke(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, SessionError> {
        Ok(self.tokens.get_mut(token).map(|mut record| {
            record.revoke(revoked_at);
            record.value().clone()
        }))
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_repository = Arc::new(InMemoryUserRepository::default());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::default());

        let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
        let session_service = Arc::new(SessionService::new(
            user_repository,
            Arc::clone(&refresh_tokens),
            Arc::new(Authenticator::new(JWT_SECRET)),
            Duration::hours(1),
        ));
        let api_key_validator = Arc::new(ApiKeyValidator::new(POLKA_API_KEY));

        let router = create_router(user_service, session_service, api_key_validator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator: Authenticator::new(JWT_SECRET),
            refresh_tokens,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register a user and return the response data
    pub async fn create_user(&self, email: &str) -> Value {
        let response = self
            .post("/api/users")
            .json(&json!({ "email": email, "password": PASSWORD }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Log in and return the response data (user, token, refresh_token)
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in, returning (access token, refresh token)
    pub async fn signed_in_user(&self, email: &str) -> (String, String) {
        self.create_user(email).await;

        let response = self.login(email, PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        (
            body["data"]["token"].as_str().unwrap().to_string(),
            body["data"]["refresh_token"].as_str().unwrap().to_string(),
        )
    }
}
