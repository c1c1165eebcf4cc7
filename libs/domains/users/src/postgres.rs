use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, Statement};
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

const SELECT_COLUMNS: &str = "SELECT id, email, password, created_at, updated_at FROM users";

/// PostgreSQL implementation of [`UserRepository`] over a pooled SeaORM connection.
///
/// Each operation is a single parameterized statement.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: Uuid,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            email: row.email,
            password: row.password,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: User) -> UserResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "INSERT INTO users (id, email, password, created_at, updated_at) VALUES ($1, $2, $3, $4, $5)",
            [
                user.id.into(),
                user.email.into(),
                user.password.into(),
                user.created_at.into(),
                user.updated_at.into(),
            ],
        );

        self.db.execute_raw(stmt).await?;

        tracing::info!(user_id = %user.id, "Created user");
        Ok(())
    }

    async fn update(&self, user: User) -> UserResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE users SET email = $1, password = $2, updated_at = $3 WHERE id = $4",
            [
                user.email.into(),
                user.password.into(),
                user.updated_at.into(),
                user.id.into(),
            ],
        );

        let result = self.db.execute_raw(stmt).await?;

        tracing::info!(user_id = %user.id, rows = result.rows_affected(), "Updated user");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> UserResult<User> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            format!("{SELECT_COLUMNS} WHERE id = $1"),
            [id.into()],
        );

        UserRow::find_by_statement(stmt)
            .one(&self.db)
            .await?
            .map(User::from)
            .ok_or(UserError::NotFound(id))
    }

    async fn get_all(&self) -> UserResult<Vec<User>> {
        let stmt = Statement::from_string(DbBackend::Postgres, SELECT_COLUMNS);

        let rows = UserRow::find_by_statement(stmt).all(&self.db).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn delete(&self, id: Uuid) -> UserResult<()> {
        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "DELETE FROM users WHERE id = $1",
            [id.into()],
        );

        let result = self.db.execute_raw(stmt).await?;
        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id));
        }

        tracing::info!(user_id = %id, "Deleted user");
        Ok(())
    }
}
