use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    validate_email, validate_password, validate_user_name, AuthSession, RepositoryError,
    ServiceError, ServiceResult, User, UserProfile,
};
use crate::repositories::AuthRepository;

/// Claims carried by a session token. The token is an unsigned, opaque
/// base64 envelope: this layer simulates auth, it does not provide it.
#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    id: String,
    email: String,
}

/// Service managing registration, login and token-based session lookup
pub struct AuthService {
    auth_repository: Arc<dyn AuthRepository>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(auth_repository: Arc<dyn AuthRepository>) -> Self {
        Self { auth_repository }
    }

    /// Register a new account and start a session
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<AuthSession> {
        validate_user_name(name)?;
        validate_email(email)?;
        validate_password(password)?;

        if self.auth_repository.find_by_email(email).await?.is_some() {
            return Err(ServiceError::EmailAlreadyRegistered {
                email: email.to_string(),
            });
        }

        let user = match self.auth_repository.create_user(name, email, password).await {
            Ok(user) => user,
            // a concurrent registration can still lose the race at the repository
            Err(RepositoryError::ConstraintViolation { .. }) => {
                return Err(ServiceError::EmailAlreadyRegistered {
                    email: email.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        info!("User registered");
        Ok(self.session_for(&user))
    }

    /// Log in with email and password
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<AuthSession> {
        let user = self.auth_repository.find_by_email(email).await?;

        match user {
            Some(user) if user.password == password => {
                info!("User logged in");
                Ok(self.session_for(&user))
            }
            _ => Err(ServiceError::InvalidCredentials),
        }
    }

    /// Resolve a session token to its user profile. Undecodable tokens and
    /// tokens for unknown users both yield `None`, never an error.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: &str) -> ServiceResult<Option<UserProfile>> {
        let claims = match decode_token(token) {
            Some(claims) => claims,
            None => {
                warn!("Rejected undecodable session token");
                return Ok(None);
            }
        };

        let user = self.auth_repository.find_by_id(&claims.id).await?;
        Ok(user.map(|user| user.profile()))
    }

    fn session_for(&self, user: &User) -> AuthSession {
        AuthSession {
            token: encode_token(user),
            user: user.profile(),
        }
    }
}

fn encode_token(user: &User) -> String {
    let claims = TokenClaims {
        id: user.id.clone(),
        email: user.email.clone(),
    };
    // serializing two strings cannot fail
    let payload = serde_json::to_vec(&claims).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(payload)
}

fn decode_token(token: &str) -> Option<TokenClaims> {
    let payload = URL_SAFE_NO_PAD.decode(token).ok()?;
    serde_json::from_slice(&payload).ok()
}
