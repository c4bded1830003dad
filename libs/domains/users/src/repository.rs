use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
///
/// Implementations hold a single lock per call, so every operation is
/// atomic with respect to the others.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// A contiguous slice of users in insertion order.
    async fn list(&self, offset: usize, limit: usize) -> UserResult<Vec<User>>;

    /// Get a user by ID
    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Insert a user, assigning an id when none is supplied.
    ///
    /// Fails with `DuplicateEmail` or `DuplicateId` and leaves the store
    /// untouched.
    async fn insert(&self, input: CreateUser) -> UserResult<User>;

    /// Overwrite `name` and `email` of an existing user.
    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User>;

    /// Delete a user by ID. Returns `false` when it did not exist.
    async fn delete(&self, id: i64) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct UserTable {
    order: Vec<i64>,
    rows: HashMap<i64, User>,
}

impl UserTable {
    /// Exact, case-sensitive match.
    fn email_taken(&self, email: &str) -> bool {
        self.rows.values().any(|u| u.email == email)
    }

    /// One past the highest id in use, or `None` once `i64::MAX` is taken.
    fn next_id(&self) -> Option<i64> {
        self.rows.keys().max().copied().unwrap_or(0).checked_add(1)
    }

    /// Append `user`, refusing an id that is already stored.
    fn push(&mut self, user: User) -> bool {
        if self.rows.contains_key(&user.id) {
            return false;
        }
        self.order.push(user.id);
        self.rows.insert(user.id, user);
        true
    }
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<UserTable>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding `users` in the given order.
    ///
    /// Later entries whose id or email is already present are skipped.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let mut table = UserTable::default();
        for user in users {
            let user_id = user.id;
            if table.email_taken(&user.email) || !table.push(user) {
                tracing::warn!(user_id, "Skipping duplicate seed user");
            }
        }
        Self {
            users: Arc::new(RwLock::new(table)),
        }
    }

    /// Repository preloaded with [`demo_users`].
    pub fn seeded() -> Self {
        Self::with_users(demo_users())
    }
}

/// The two users the service starts with.
pub fn demo_users() -> Vec<User> {
    vec![
        User::new(1, "Vraj", "vraj@example.com"),
        User::new(2, "Vraj123", "vraj123@example.com"),
    ]
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self, offset: usize, limit: usize) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let page = users
            .order
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| users.rows.get(id).cloned())
            .collect();

        Ok(page)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.rows.get(&id).cloned())
    }

    async fn insert(&self, input: CreateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.email_taken(&input.email) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let id = match input.id {
            Some(id) if users.rows.contains_key(&id) => return Err(UserError::DuplicateId(id)),
            Some(id) => id,
            None => users
                .next_id()
                .ok_or_else(|| UserError::Internal("user id space exhausted".into()))?,
        };

        let user = User::new(id, input.name, input.email);
        if !users.push(user.clone()) {
            return Err(UserError::DuplicateId(id));
        }

        tracing::info!(user_id = user.id, email = %user.email, "Created user");
        Ok(user)
    }

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let user = users.rows.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.apply_update(input);

        tracing::info!(user_id = id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.rows.remove(&id).is_some() {
            users.order.retain(|existing| *existing != id);
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
