//! Response records as the backend emits them.
//!
//! Field names follow the backend byte for byte: most endpoints use `snake_case`, while the
//! growth and vaccination endpoints use `camelCase`. Records carry no behaviour beyond a few
//! read-only accessors.

use crate::lenient;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Boolean-success envelope returned by most write endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl Envelope {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub user_id: Option<i64>,
}

/// One antenatal visit ("sổ khám thai" entry).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Visit {
    #[serde(deserialize_with = "lenient::text")]
    pub visit_id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub user_id: String,
    pub visit_date: String,
    pub doctor_name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub gestational_age: String,
    #[serde(deserialize_with = "lenient::text")]
    pub weight: String,
    pub blood_pressure: String,
    #[serde(deserialize_with = "lenient::text")]
    pub fetal_heart_rate: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Per-week foetal growth information.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GrowthRecord {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub week: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub length: Option<f64>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl GrowthRecord {
    /// The week as a number, when the backend sent a numeric week.
    pub fn week_number(&self) -> Option<u32> {
        self.week.as_deref().and_then(|w| w.trim().parse().ok())
    }
}

pub const DEFAULT_SUMMARY_WEEK: u32 = 20;
pub const DEFAULT_SUMMARY_LENGTH_CM: f64 = 25.0;
pub const DEFAULT_SUMMARY_WEIGHT_G: f64 = 300.0;
pub const DEFAULT_SUMMARY_DUE_DATE: &str = "2025-08-01";

fn default_week() -> u32 {
    DEFAULT_SUMMARY_WEEK
}

fn default_length() -> f64 {
    DEFAULT_SUMMARY_LENGTH_CM
}

fn default_weight() -> f64 {
    DEFAULT_SUMMARY_WEIGHT_G
}

fn default_due_date() -> String {
    DEFAULT_SUMMARY_DUE_DATE.to_string()
}

/// Current pregnancy snapshot shown on the home screen.
///
/// Absent fields fall back to the same placeholder values the home screen shows before the
/// first load completes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PregnancySummary {
    #[serde(default = "default_week")]
    pub week: u32,
    #[serde(default = "default_length", deserialize_with = "lenient::number")]
    pub length: f64,
    #[serde(default = "default_weight", deserialize_with = "lenient::number")]
    pub weight: f64,
    #[serde(default = "default_due_date")]
    pub due_date: String,
}

impl Default for PregnancySummary {
    fn default() -> Self {
        Self {
            week: DEFAULT_SUMMARY_WEEK,
            length: DEFAULT_SUMMARY_LENGTH_CM,
            weight: DEFAULT_SUMMARY_WEIGHT_G,
            due_date: default_due_date(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    pub vaccine_name: String,
    #[serde(default)]
    pub vaccination_date: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub is_injected: bool,
}

/// Daily prenatal-education activity as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActivityRecord {
    pub activity_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        default,
        deserialize_with = "lenient::flag",
        serialize_with = "lenient::flag_as_int"
    )]
    pub is_done: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompletionResponse {
    #[serde(deserialize_with = "lenient::int")]
    pub completion_percentage: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DayIndexResponse {
    #[serde(deserialize_with = "lenient::int")]
    pub day_index: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BirthPlanOption {
    pub id: String,
    pub text: String,
    #[serde(rename = "isSelected", default)]
    pub is_selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BirthPlanQuestion {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub options: Vec<BirthPlanOption>,
}

impl BirthPlanQuestion {
    pub fn option(&self, option_id: &str) -> Option<&BirthPlanOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CrisisWeek {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub week: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Nutrition handbook post.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FoodPost {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub nutrition: Option<String>,
    #[serde(default)]
    pub benefits: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReferenceProduct {
    #[serde(deserialize_with = "lenient::int")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vitamin {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub benefits: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub message: String,
    pub sender: String,
    #[serde(default)]
    pub time: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessagesResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}
