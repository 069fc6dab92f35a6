use crate::{errors::AuthError, models::user::UserId, store::UserRepository};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::instrument;

#[derive(Clone, Debug)]
pub struct AuthService {
    repo: UserRepository,
}

impl AuthService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    /// Create an account. The id is only returned once the row is committed.
    #[instrument(
        name = "AuthService: Registration",
        skip(self, password, password_repeat),
        fields(user_email = %email)
    )]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        password_repeat: &str,
    ) -> Result<UserId, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if password != password_repeat {
            tracing::warn!("Registration rejected: passwords do not match");
            return Err(AuthError::PasswordMismatch);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                tracing::error!("Failed to hash password: {:?}", e);
                AuthError::Internal
            })?
            .to_string();

        match self.repo.create_user(email, &hash).await {
            Ok(Some(id)) => {
                tracing::info!(user_id = id, "User registered");
                Ok(id)
            }
            Ok(None) => {
                tracing::warn!("Registration rejected: email already exists");
                Err(AuthError::UserAlreadyExists)
            }
            Err(e) => {
                tracing::error!("Database error during registration: {:?}", e);
                Err(AuthError::Internal)
            }
        }
    }

    #[instrument(
        name = "AuthService: Login attempt",
        skip(self, password),
        fields(user_email = %email)
    )]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserId, AuthError> {
        let user = self.repo.find_by_email(email).await.map_err(|e| {
            tracing::error!("Database error during login: {:?}", e);
            AuthError::Internal
        })?;

        let user = match user {
            Some(u) => u,
            None => {
                tracing::warn!("Login failed: User not found");
                return Err(AuthError::WrongCredentials);
            }
        };

        let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|e| {
            tracing::error!("Critical: Failed to parse password hash from DB: {:?}", e);
            AuthError::Internal
        })?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            tracing::warn!("Login failed: Invalid password provided");
            return Err(AuthError::WrongCredentials);
        }

        tracing::info!("User authenticated successfully");
        Ok(user.id)
    }
}
