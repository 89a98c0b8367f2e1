//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use larder_core::{LarderError, LarderResult, User, UserId, USER_RESOURCE};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL user repository backed by `user_table`.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn insert(&self, name: &str) -> LarderResult<User> {
        let result = sqlx::query("INSERT INTO user_table (name) VALUES (?)")
            .bind(name)
            .execute(self.pool.inner())
            .await?;

        let id = i32::try_from(result.last_insert_id()).map_err(|_| {
            LarderError::Database(format!(
                "Assigned id {} exceeds the id range",
                result.last_insert_id()
            ))
        })?;

        debug!("Inserted user {}", id);
        Ok(User::with_id(UserId::new(id), name))
    }

    async fn replace(&self, id: UserId, name: &str) -> LarderResult<User> {
        sqlx::query("UPDATE user_table SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        // MySQL reports zero affected rows for an unchanged name too, so
        // existence is confirmed with a read.
        self.find_by_id(id)
            .await?
            .ok_or_else(|| LarderError::not_found(USER_RESOURCE, id))
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i32,
    name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::with_id(UserId::new(row.id), row.name)
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn save(&self, user: &User) -> LarderResult<User> {
        match user.id {
            None => {
                debug!("Inserting new user");
                self.insert(&user.name).await
            }
            Some(id) => {
                debug!("Replacing user {}", id);
                self.replace(id, &user.name).await
            }
        }
    }

    async fn find_by_id(&self, id: UserId) -> LarderResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>("SELECT id, name FROM user_table WHERE id = ?")
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(User::from))
    }

    async fn delete_by_id(&self, id: UserId) -> LarderResult<()> {
        debug!("Deleting user by id: {}", id);

        let result = sqlx::query("DELETE FROM user_table WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() == 0 {
            debug!("No user {} to delete", id);
        }
        Ok(())
    }
}
