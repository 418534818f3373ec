use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use crate::users::{dto::UserPayload, repo_types::User};

/// The four repository operations over the `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every row, fully materialized. Any row error fails the whole call.
    async fn list(&self) -> anyhow::Result<Vec<User>>;
    /// Inserts a row and returns the id the store generated for it.
    async fn create(&self, user: &UserPayload) -> anyhow::Result<i64>;
    /// Overwrites name, department and email. Succeeds even when no row matches.
    async fn update(&self, id: i64, user: &UserPayload) -> anyhow::Result<()>;
    /// Hard delete. Succeeds even when no row matches.
    async fn delete(&self, id: i64) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, department, email
              FROM users
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        Ok(rows)
    }

    async fn create(&self, user: &UserPayload) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (name, department, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.department)
        .bind(&user.email)
        .fetch_one(&self.db)
        .await
        .context("insert user")?;
        Ok(id)
    }

    async fn update(&self, id: i64, user: &UserPayload) -> anyhow::Result<()> {
        let res = sqlx::query(
            r#"
            UPDATE users
               SET name = $1, department = $2, email = $3
             WHERE id = $4
            "#,
        )
        .bind(&user.name)
        .bind(&user.department)
        .bind(&user.email)
        .bind(id)
        .execute(&self.db)
        .await
        .context("update user")?;
        debug!(id, rows = res.rows_affected(), "update user");
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<()> {
        let res = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete user")?;
        debug!(id, rows = res.rows_affected(), "delete user");
        Ok(())
    }
}
