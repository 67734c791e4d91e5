//! Request bodies and query strings.
//!
//! Write endpoints take `application/x-www-form-urlencoded` bodies except the birth-plan
//! selection, which is JSON. Optional fields set to `None` are left out of the encoded form.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

/// Body of both the add and the update visit endpoints; `visit_id` is only sent on update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VisitForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visit_id: Option<String>,
    pub user_id: String,
    pub visit_date: String,
    pub doctor_name: String,
    pub gestational_age: String,
    pub weight: String,
    pub blood_pressure: String,
    pub fetal_heart_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteVisitForm {
    pub user_id: String,
    pub visit_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VaccinationUpdateForm {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub id: i64,
    /// `1` when injected, `0` otherwise.
    #[serde(rename = "isInjected")]
    pub is_injected: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SaveActivityForm {
    pub action: String,
    pub user_id: String,
    pub activity_title: String,
    pub description: String,
    pub is_done: u8,
    pub activity_date: String,
}

/// Body of `save_pregnancy.php`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PregnancySummaryForm {
    pub user_id: String,
    pub week: u32,
    pub length: f64,
    pub weight: f64,
    pub due_date: String,
}

/// Body of `pregnancy_add.php`. Values are sent exactly as typed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GrowthRecordForm {
    pub user_id: String,
    pub week: String,
    pub weight: String,
    pub length: String,
    pub due_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendMessageForm {
    pub user_id: String,
    pub doctor_id: i64,
    pub sender: String,
    pub message: String,
}

/// JSON body of the birth-plan selection endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BirthPlanSelection {
    pub user_id: String,
    pub question_id: String,
    pub option_id: String,
    pub is_selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

/// The vaccination endpoints spell the user field `userId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccinationQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityQuery {
    pub user_id: String,
    pub activity_date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatQuery {
    pub user_id: String,
    pub doctor_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visit_form_omits_absent_id_and_notes() {
        let form = VisitForm {
            visit_id: None,
            user_id: "42".into(),
            visit_date: "2025-05-01".into(),
            doctor_name: "BS. Hà".into(),
            gestational_age: "20".into(),
            weight: "55".into(),
            blood_pressure: "110/70".into(),
            fetal_heart_rate: "140".into(),
            notes: None,
        };
        let encoded = serde_urlencoded::to_string(&form).unwrap();
        assert!(!encoded.contains("visit_id"));
        assert!(!encoded.contains("notes"));
        assert!(encoded.starts_with("user_id=42&visit_date=2025-05-01"));
    }

    #[test]
    fn test_vaccination_form_uses_camel_case_fields() {
        let form = VaccinationUpdateForm {
            user_id: "42".into(),
            id: 3,
            is_injected: 1,
        };
        assert_eq!(
            serde_urlencoded::to_string(&form).unwrap(),
            "userId=42&id=3&isInjected=1"
        );
    }
}
