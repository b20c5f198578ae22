/// User model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id SERIAL PRIMARY KEY,
///     name TEXT NOT NULL,
///     email TEXT NOT NULL UNIQUE
/// );
/// ```
///
/// The table is provisioned outside this service. Ids are assigned by the
/// sequence and email uniqueness is enforced by the constraint; nothing here
/// checks either ahead of the statement.
///
/// # Example
///
/// ```no_run
/// use userbase_shared::models::user::{User, UserInput};
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// let user = User::create(&pool, &UserInput::new("Ada", "ada@example.com")).await?;
/// println!("Created user: {}", user.id);
///
/// let found = User::find_by_id(&pool, user.id).await?;
/// assert_eq!(found, Some(user));
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// A stored user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Storage-assigned id, immutable once created
    pub id: i32,

    /// Display name
    pub name: String,

    /// Email address, unique across all users
    pub email: String,
}

/// Request payload for create and update
///
/// Members absent from the JSON decode as empty strings. An `id` member is
/// accepted so clients can send back a full `User`, but it must still be an
/// integer and it never reaches storage: create lets the sequence pick the id
/// and update uses the id from the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    /// Ignored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,
}

impl UserInput {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Pairs the payload with an authoritative id
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
        }
    }
}

impl User {
    /// Lists every user ordered by ascending id
    ///
    /// An empty table yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// Inserts a user and returns it with the id chosen by the sequence
    ///
    /// # Errors
    ///
    /// Returns an error if the email is already taken (unique constraint
    /// violation) or the database is unreachable
    pub async fn create(pool: &PgPool, data: &UserInput) -> Result<Self, sqlx::Error> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (name, email)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .fetch_one(pool)
        .await?;

        Ok(data.clone().into_user(id))
    }

    /// Finds a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails; a missing row is `Ok(None)`
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrites name and email of the user with `id`
    ///
    /// # Returns
    ///
    /// Number of rows affected: 1 if the user existed, 0 otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the new email belongs to another user or the
    /// database is unreachable
    pub async fn update(pool: &PgPool, id: i32, data: &UserInput) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET name = $1, email = $2 WHERE id = $3")
            .bind(&data.name)
            .bind(&data.email)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Deletes the user with `id`
    ///
    /// # Returns
    ///
    /// Number of rows affected: 1 if the user existed, 0 otherwise
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable
    pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
