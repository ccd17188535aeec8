//! In-memory user store.

use tokio::sync::RwLock;

use crate::models::{CreateUserRequest, UpdateUserRequest, User};

/// User store holding its records in memory.
///
/// Deliberately non-durable: the seed records are reconstructed at every
/// process start. A durable variant would be a second backend behind the
/// same contract, selected at startup like the recipe backends.
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Create a store seeded with the fixed starter records.
    pub fn new() -> Self {
        let seed = ["Alice", "Bob", "Charlie", "Dave"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| User {
                id: i as i64 + 1,
                name: name.to_string(),
                email: None,
            })
            .collect();

        Self {
            users: RwLock::new(seed),
        }
    }

    /// All users.
    pub async fn list(&self) -> Vec<User> {
        self.users.read().await.clone()
    }

    /// One user by id, or `None` if absent.
    pub async fn get(&self, id: i64) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    /// Create a user with the next free id.
    pub async fn create(&self, request: CreateUserRequest) -> User {
        let mut users = self.users.write().await;
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        let user = User {
            id: next_id,
            name: request.name,
            email: request.email,
        };
        users.push(user.clone());

        user
    }

    /// Shallow-merge a partial update onto an existing user; `None` if absent.
    pub async fn update(&self, id: i64, request: UpdateUserRequest) -> Option<User> {
        let mut users = self.users.write().await;
        let user = users.iter_mut().find(|u| u.id == id)?;

        request.apply(user);
        Some(user.clone())
    }

    /// Delete a user; `false` if nothing matched.
    pub async fn delete(&self, id: i64) -> bool {
        let mut users = self.users.write().await;
        let before = users.len();
        users.retain(|u| u.id != id);
        users.len() != before
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
