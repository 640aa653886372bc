use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database. Closed-set profile fields are stored as
/// their canonical strings; the request boundary enforces the sets.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, not exposed in JSON
    pub name: Option<String>,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
    pub target_weight: Option<f64>,
    pub diet: Option<String>,
    pub experience: Option<String>,
    pub workout_frequency: Option<String>,
}

/// Column values for a user insert; the id and timestamps come from the
/// database.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<&'a str>,
    pub target_weight: Option<f64>,
    pub diet: Option<&'a str>,
    pub experience: Option<&'a str>,
    pub workout_frequency: Option<&'a str>,
}

#[cfg(test)]
impl User {
    pub fn sample() -> Self {
        Self {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$fake".into(),
            name: Some("Alex".into()),
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
            gender: Some("male".into()),
            height: Some(180.0),
            weight: Some(82.5),
            goal: Some("lose_weight".into()),
            target_weight: Some(75.0),
            diet: None,
            experience: Some("less_than_year".into()),
            workout_frequency: Some("3-4".into()),
        }
    }
}
