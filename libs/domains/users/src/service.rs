use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, Pagination, UpdateUser, User};
use crate::repository::UserRepository;
use crate::validation::validate_candidate;

/// Service layer for User business logic
///
/// Inputs are validated here rather than in the extractors, so every caller
/// gets the same `Validation` outcome whether or not HTTP is involved.
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

    /// One page of users in insertion order. Never rejects a page: pages
    /// past the end are empty and non-positive values are clamped.
    pub async fn list_users(&self, pagination: Pagination) -> UserResult<Vec<User>> {
        self.repository
            .list(pagination.offset(), pagination.limit())
            .await
    }

    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    /// Validate and insert a new user.
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        ensure_valid(&input)?;
        self.repository.insert(input).await
    }

    /// Validate and overwrite `name`/`email` of user `id`.
    ///
    /// Email uniqueness is only enforced on create.
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<()> {
        ensure_valid(&input)?;
        self.repository.update(id, input).await?;
        Ok(())
    }

    pub async fn delete_user(&self, id: i64) -> UserResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

fn ensure_valid<T: validator::Validate>(candidate: &T) -> UserResult<()> {
    let violations = validate_candidate(candidate);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(UserError::Validation(violations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository, demo_users};
    use crate::validation::{EMAIL_INVALID, NAME_REQUIRED};

    fn seeded_service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::seeded())
    }

    fn new_user(id: i64, name: &str, email: &str) -> CreateUser {
        CreateUser {
            id: Some(id),
            name: name.into(),
            email: email.into(),
        }
    }

    #[tokio::test]
    async fn test_list_users_pages() {
        let service = seeded_service();

        assert_eq!(service.list_users(Pagination::default()).await.unwrap(), demo_users());
        assert!(service.list_users(Pagination::new(2, 5)).await.unwrap().is_empty());
        assert_eq!(
            service.list_users(Pagination::new(2, 1)).await.unwrap(),
            vec![demo_users()[1].clone()]
        );
    }

    #[tokio::test]
    async fn test_list_users_clamps_out_of_range_pagination() {
        let service = seeded_service();

        assert_eq!(service.list_users(Pagination::new(0, 5)).await.unwrap(), demo_users());
        assert_eq!(service.list_users(Pagination::new(-1, 5)).await.unwrap(), demo_users());
        assert!(service.list_users(Pagination::new(1, 0)).await.unwrap().is_empty());
        assert!(service.list_users(Pagination::new(1, -4)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input() {
        let service = seeded_service();

        let created = service
            .create_user(new_user(3, "Asha", "asha@example.com"))
            .await
            .unwrap();
        assert_eq!(created, User::new(3, "Asha", "asha@example.com"));
        assert_eq!(service.get_user(3).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_invalid_leaves_store_unchanged() {
        let service = seeded_service();

        let result = service.create_user(new_user(3, "  ", "nope")).await;
        match result {
            Err(UserError::Validation(violations)) => {
                assert_eq!(violations["name"], NAME_REQUIRED);
                assert_eq!(violations["email"], EMAIL_INVALID);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(matches!(service.get_user(3).await, Err(UserError::NotFound(3))));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_is_conflict() {
        let service = seeded_service();
        let result = service
            .create_user(new_user(3, "Copy", "vraj@example.com"))
            .await;
        assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
        assert_eq!(service.list_users(Pagination::default()).await.unwrap(), demo_users());
    }

    #[tokio::test]
    async fn test_update_does_not_check_email_uniqueness() {
        let service = seeded_service();

        service
            .update_user(
                2,
                UpdateUser {
                    name: "Twin".into(),
                    email: "vraj@example.com".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(service.get_user(2).await.unwrap().email, "vraj@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let service = seeded_service();
        let result = service
            .update_user(
                42,
                UpdateUser {
                    name: "Ghost".into(),
                    email: "ghost@example.com".into(),
                },
            )
            .await;
        assert!(matches!(result, Err(UserError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = seeded_service();

        service.delete_user(1).await.unwrap();
        assert!(matches!(service.get_user(1).await, Err(UserError::NotFound(1))));
        assert!(matches!(service.delete_user(1).await, Err(UserError::NotFound(1))));
    }

    #[tokio::test]
    async fn test_validation_runs_before_repository() {
        let mut repository = MockUserRepository::new();
        repository.expect_insert().never();
        repository.expect_update().never();

        let service = UserService::new(repository);
        assert!(service.create_user(CreateUser::default()).await.is_err());
        assert!(service.update_user(1, UpdateUser::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_by_id()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Err(UserError::Internal("connection reset".into())));

        let service = UserService::new(repository);
        assert!(matches!(service.get_user(1).await, Err(UserError::Internal(_))));
    }
}
