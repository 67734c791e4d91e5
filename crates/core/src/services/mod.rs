//! Per-resource backend services.
//!
//! Each service wraps a clone of the shared [`ApiClient`](crate::client::ApiClient) and exposes
//! one async method per backend endpoint. Services never retry and never override the global
//! timeout; failures surface as [`ClientError`](crate::ClientError) for the caller to present.

pub mod activities;
pub mod auth;
pub mod birth_plan;
pub mod chat;
pub mod content;
pub mod growth;
pub mod vaccinations;
pub mod visits;

pub use activities::ActivityService;
pub use auth::AuthService;
pub use birth_plan::BirthPlanService;
pub use chat::ChatService;
pub use content::ContentService;
pub use growth::GrowthService;
pub use vaccinations::VaccinationService;
pub use visits::VisitService;
