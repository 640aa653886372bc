use sqlx::PgPool;

use crate::auth::repo_types::{NewUser, User};
use crate::error::AppError;

const USER_COLUMNS: &str = r#"
    id, email, password_hash, name, is_active, created_at, updated_at,
    gender, height, weight, goal, target_weight, diet, experience, workout_frequency
"#;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(db)
            .await?;
        Ok(user)
    }

    /// Insert a new user. The UNIQUE constraint on email is the arbiter for
    /// concurrent registrations; its violation maps to `DuplicateEmail`.
    pub async fn create(db: &PgPool, new: NewUser<'_>) -> Result<User, AppError> {
        let query = format!(
            r#"
            INSERT INTO users (
                email, password_hash, name, gender, height, weight,
                goal, target_weight, diet, experience, workout_frequency
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {USER_COLUMNS}
            "#
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(new.email)
            .bind(new.password_hash)
            .bind(new.name)
            .bind(new.gender)
            .bind(new.height)
            .bind(new.weight)
            .bind(new.goal)
            .bind(new.target_weight)
            .bind(new.diet)
            .bind(new.experience)
            .bind(new.workout_frequency)
            .fetch_one(db)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    AppError::DuplicateEmail
                }
                _ => AppError::Internal(e.into()),
            })?;
        Ok(user)
    }

    /// Existence check for the pre-registration probe; never treats a miss
    /// as an error.
    pub async fn email_exists(db: &PgPool, email: &str) -> anyhow::Result<bool> {
        let exists: bool =
            sqlx::query_scalar(r#"SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)"#)
                .bind(email)
                .fetch_one(db)
                .await?;
        Ok(exists)
    }
}
