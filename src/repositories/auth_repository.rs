use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use crate::models::{RepositoryError, RepositoryResult, User};

/// Trait defining the interface for account data access
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Create a new user, assigning its id
    async fn create_user(&self, name: &str, email: &str, password: &str) -> RepositoryResult<User>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Find a user by id
    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>>;
}

/// In-memory implementation of the AuthRepository trait with sequential ids
pub struct InMemoryAuthRepository {
    users: RwLock<Vec<User>>,
    next_id: AtomicU64,
}

impl InMemoryAuthRepository {
    /// Create a new empty in-memory auth repository
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for InMemoryAuthRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthRepository for InMemoryAuthRepository {
    #[instrument(skip(self, password), fields(email = %email))]
    async fn create_user(&self, name: &str, email: &str, password: &str) -> RepositoryResult<User> {
        let mut users = self.users.write().await;

        if users.iter().any(|user| user.email == email) {
            return Err(RepositoryError::ConstraintViolation {
                message: format!("Email already registered: {}", email),
            });
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst).to_string();
        let user = User::new(id, name, email, password);
        users.push(user.clone());

        info!("User created with id {}", user.id);
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_assigns_sequential_ids() {
        let repo = InMemoryAuthRepository::new();

        let first = repo
            .create_user("Ada", "ada@example.com", "hunter2222")
            .await
            .unwrap();
        let second = repo
            .create_user("Grace", "grace@example.com", "hunter2222")
            .await
            .unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryAuthRepository::new();
        repo.create_user("Ada", "ada@example.com", "hunter2222")
            .await
            .unwrap();

        let result = repo.create_user("Imposter", "ada@example.com", "other-pass").await;

        assert!(matches!(
            result,
            Err(RepositoryError::ConstraintViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_find_by_email_and_id() {
        let repo = InMemoryAuthRepository::new();
        let created = repo
            .create_user("Ada", "ada@example.com", "hunter2222")
            .await
            .unwrap();

        let by_email = repo.find_by_email("ada@example.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);

        let by_id = repo.find_by_id(&created.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "ada@example.com");

        assert!(repo.find_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(repo.find_by_id("999").await.unwrap().is_none());
    }
}
