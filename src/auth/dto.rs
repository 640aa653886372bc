use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::repo_types::User;

/// Closed-set profile values. Serde enforces the sets at the request
/// boundary; the database stores the canonical strings from `as_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseWeight,
    GainMuscle,
    GetEnergy,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::LoseWeight => "lose_weight",
            Goal::GainMuscle => "gain_muscle",
            Goal::GetEnergy => "get_energy",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    None,
    Vegan,
    Vegetarian,
}

impl Diet {
    pub fn as_str(self) -> &'static str {
        match self {
            Diet::None => "none",
            Diet::Vegan => "vegan",
            Diet::Vegetarian => "vegetarian",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    None,
    LessThanYear,
    OneToThreeYears,
    MoreThanThreeYears,
}

impl Experience {
    pub fn as_str(self) -> &'static str {
        match self {
            Experience::None => "none",
            Experience::LessThanYear => "less_than_year",
            Experience::OneToThreeYears => "one_to_three_years",
            Experience::MoreThanThreeYears => "more_than_three_years",
        }
    }
}

/// Weekly workout sessions, kept as the range labels the client shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkoutFrequency {
    #[serde(rename = "1-2")]
    OneToTwo,
    #[serde(rename = "3-4")]
    ThreeToFour,
    #[serde(rename = "4-5")]
    FourToFive,
    #[serde(rename = "6-7")]
    SixToSeven,
}

impl WorkoutFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutFrequency::OneToTwo => "1-2",
            WorkoutFrequency::ThreeToFour => "3-4",
            WorkoutFrequency::FourToFive => "4-5",
            WorkoutFrequency::SixToSeven => "6-7",
        }
    }
}

/// Request body for user registration. Profile fields are optional; absent
/// means unset.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub target_weight: Option<f64>,
    #[serde(default)]
    pub diet: Option<Diet>,
    #[serde(default)]
    pub experience: Option<Experience>,
    #[serde(default)]
    pub workout_frequency: Option<WorkoutFrequency>,
}

/// JSON login body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// OAuth2-style form login body (`POST /auth/token`).
#[derive(Debug, Deserialize)]
pub struct TokenForm {
    pub username: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckEmailQuery {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CheckEmailResponse {
    pub exists: bool,
}

/// Public part of the user returned to the client. Never carries the
/// password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
    pub target_weight: Option<f64>,
    pub diet: Option<String>,
    pub experience: Option<String>,
    pub workout_frequency: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            is_active: user.is_active,
            gender: user.gender,
            height: user.height,
            weight: user.weight,
            goal: user.goal,
            target_weight: user.target_weight,
            diet: user.diet,
            experience: user.experience,
            workout_frequency: user.workout_frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_enums_use_canonical_strings() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
        assert_eq!(
            serde_json::to_string(&Goal::GainMuscle).unwrap(),
            "\"gain_muscle\""
        );
        assert_eq!(serde_json::to_string(&Diet::None).unwrap(), "\"none\"");
        assert_eq!(
            serde_json::to_string(&Experience::MoreThanThreeYears).unwrap(),
            "\"more_than_three_years\""
        );
        assert_eq!(
            serde_json::to_string(&WorkoutFrequency::ThreeToFour).unwrap(),
            "\"3-4\""
        );
    }

    #[test]
    fn as_str_matches_serde_form() {
        for (goal, expected) in [
            (Goal::LoseWeight, "lose_weight"),
            (Goal::GainMuscle, "gain_muscle"),
            (Goal::GetEnergy, "get_energy"),
        ] {
            assert_eq!(goal.as_str(), expected);
            assert_eq!(
                serde_json::to_value(goal).unwrap(),
                serde_json::Value::String(expected.into())
            );
        }
    }

    #[test]
    fn register_request_rejects_unknown_goal() {
        let body = r#"{"email":"a@x.com","password":"pw123456","goal":"become_invisible"}"#;
        assert!(serde_json::from_str::<RegisterRequest>(body).is_err());
    }

    #[test]
    fn register_request_defaults_profile_to_unset() {
        let body = r#"{"email":"a@x.com","password":"pw123456"}"#;
        let req: RegisterRequest = serde_json::from_str(body).unwrap();
        assert!(req.gender.is_none());
        assert!(req.height.is_none());
        assert!(req.workout_frequency.is_none());
    }

    #[test]
    fn token_response_shape() {
        let res = TokenResponse {
            access_token: "abc".into(),
            token_type: "bearer".into(),
        };
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["access_token"], "abc");
        assert_eq!(json["token_type"], "bearer");
    }

    #[test]
    fn user_response_never_serializes_hash() {
        let user = User::sample();
        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("hash"));
    }
}
