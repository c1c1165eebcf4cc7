use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUserInput, UpdateEmailInput, UpdatePasswordInput, User, UserResponse};
use crate::password;
use crate::repository::UserRepository;

/// Service layer for User business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Generate an id, hash the password and persist.
    #[instrument(skip_all, fields(user_id = tracing::field::Empty))]
    pub async fn create_user(&self, input: CreateUserInput) -> UserResult<UserResponse> {
        let password_hash = hash(input.password).await?;
        let user = User::new(input.email, password_hash);
        tracing::Span::current().record("user_id", tracing::field::display(user.id));

        self.repository.create(user.clone()).await?;
        Ok(user.into())
    }

    /// Replace the email after re-checking the current password.
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_email(&self, id: Uuid, input: UpdateEmailInput) -> UserResult<UserResponse> {
        let mut user = self.repository.get(id).await?;
        self.authenticate(&user, input.password).await?;

        user.email = input.email;
        user.touch();

        self.repository.update(user.clone()).await?;
        Ok(user.into())
    }

    /// Replace the stored hash after re-checking the current password.
    #[instrument(skip(self, input), fields(user_id = %id))]
    pub async fn update_password(
        &self,
        id: Uuid,
        input: UpdatePasswordInput,
    ) -> UserResult<UserResponse> {
        let mut user = self.repository.get(id).await?;
        self.authenticate(&user, input.current_password).await?;

        user.password = hash(input.new_password).await?;
        user.touch();

        self.repository.update(user.clone()).await?;
        Ok(user.into())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<UserResponse> {
        let user = self.repository.get(id).await?;
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn get_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.get_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> UserResult<()> {
        self.repository.delete(id).await
    }

    async fn authenticate(&self, user: &User, candidate: String) -> UserResult<()> {
        if verify(user.password.clone(), candidate).await? {
            Ok(())
        } else {
            tracing::info!(user_id = %user.id, "Current password did not match");
            Err(UserError::InvalidCredentials {
                email: user.email.clone(),
            })
        }
    }
}

async fn hash(plain: String) -> UserResult<String> {
    tokio::task::spawn_blocking(move || password::hash_password(&plain))
        .await
        .map_err(|e| UserError::Internal(format!("hashing task failed: {e}")))?
}

async fn verify(hash: String, candidate: String) -> UserResult<bool> {
    tokio::task::spawn_blocking(move || password::verify_password(&hash, &candidate))
        .await
        .map_err(|e| UserError::Internal(format!("verification task failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use mockall::predicate;

    fn stored_user(email: &str, plain: &str) -> User {
        User::new(email.to_string(), password::hash_password(plain).unwrap())
    }

    #[tokio::test]
    async fn test_create_user_hashes_and_stamps() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .withf(|u| u.email == "a@b.com" && u.password.starts_with("$argon2id$"))
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(mock_repo);
        let created = service
            .create_user(CreateUserInput {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        assert!(!created.id.is_nil());
        assert_ne!(created.password, "secret");
        assert!(password::verify_password(&created.password, "secret"));
        assert_eq!(created.created_at, created.updated_at);
    }

    #[tokio::test]
    async fn test_create_user_ids_are_unique() {
        let service = UserService::new(InMemoryUserRepository::new());
        let input = CreateUserInput {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
        };

        let first = service.create_user(input.clone()).await.unwrap();
        let second = service.create_user(input).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_create_user_propagates_storage_error() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(UserError::Storage("connection refused".to_string())));

        let service = UserService::new(mock_repo);
        let err = service
            .create_user(CreateUserInput {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "connection refused");
    }

    #[tokio::test]
    async fn test_update_email_with_wrong_password_never_writes() {
        let user = stored_user("a@b.com", "secret");
        let id = user.id;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get()
            .with(predicate::eq(id))
            .returning(move |_| Ok(user.clone()));
        mock_repo.expect_update().never();

        let service = UserService::new(mock_repo);
        let err = service
            .update_email(
                id,
                UpdateEmailInput {
                    email: "c@d.com".to_string(),
                    password: "wrong".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "cannot update: a@b.com");
    }

    #[tokio::test]
    async fn test_update_email_with_correct_password() {
        let user = stored_user("a@b.com", "secret");
        let id = user.id;
        let created_at = user.created_at;

        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get()
            .with(predicate::eq(id))
            .returning(move |_| Ok(user.clone()));
        mock_repo
            .expect_update()
            .withf(move |u| u.id == id && u.email == "c@d.com")
            .times(1)
            .returning(|_| Ok(()));

        let service = UserService::new(mock_repo);
        let updated = service
            .update_email(
                id,
                UpdateEmailInput {
                    email: "c@d.com".to_string(),
                    password: "secret".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.email, "c@d.com");
        assert_eq!(updated.created_at, created_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_update_password_replaces_hash() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());
        let created = service
            .create_user(CreateUserInput {
                email: "a@b.com".to_string(),
                password: "old-secret".to_string(),
            })
            .await
            .unwrap();

        let updated = service
            .update_password(
                created.id,
                UpdatePasswordInput {
                    current_password: "old-secret".to_string(),
                    new_password: "new-secret".to_string(),
                },
            )
            .await
            .unwrap();

        let stored = repo.get(created.id).await.unwrap();
        assert_eq!(stored.password, updated.password);
        assert!(password::verify_password(&stored.password, "new-secret"));
        assert!(!password::verify_password(&stored.password, "old-secret"));
    }

    #[tokio::test]
    async fn test_update_password_with_wrong_password_leaves_record_unchanged() {
        let repo = InMemoryUserRepository::new();
        let service = UserService::new(repo.clone());
        let created = service
            .create_user(CreateUserInput {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        let before = repo.get(created.id).await.unwrap();

        let result = service
            .update_password(
                created.id,
                UpdatePasswordInput {
                    current_password: "wrong".to_string(),
                    new_password: "whatever".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::InvalidCredentials { .. })));
        assert_eq!(repo.get(created.id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_get()
            .returning(|id| Err(UserError::NotFound(id)));

        let service = UserService::new(mock_repo);
        let result = service
            .update_email(
                Uuid::now_v7(),
                UpdateEmailInput {
                    email: "c@d.com".to_string(),
                    password: "secret".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_users_empty() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_get_all().returning(|| Ok(vec![]));

        let service = UserService::new(mock_repo);
        assert!(service.get_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_round_trip_matches_except_password() {
        let service = UserService::new(InMemoryUserRepository::new());
        let created = service
            .create_user(CreateUserInput {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        let fetched = service.get_user(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_ne!(fetched.password, "secret");
    }

    #[tokio::test]
    async fn test_delete_user_then_get_fails() {
        let service = UserService::new(InMemoryUserRepository::new());
        let created = service
            .create_user(CreateUserInput {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        service.delete_user(created.id).await.unwrap();

        assert!(matches!(
            service.get_user(created.id).await,
            Err(UserError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_user(created.id).await,
            Err(UserError::NotFound(_))
        ));
    }
}
