//! Per-screen state holders.
//!
//! A screen holder is built with the services it needs and the signed-in user, and owns its
//! state exclusively. Nothing is shared between screens: each holder loads fresh data on
//! `reload` and drops it when the holder is dropped.

pub mod activities;
pub mod auth;
pub mod birth_plan;
pub mod chat;
pub mod content;
pub mod growth;
pub mod pregnancy;
pub mod vaccinations;
pub mod visits;

pub use activities::{Activity, ActivitiesScreen, ActivityProgress};
pub use auth::{LoginScreen, RegisterScreen, Session};
pub use birth_plan::BirthPlanScreen;
pub use chat::ChatScreen;
pub use content::{
    ContentScreen, CrisisWeekSource, FoodPostSource, ReferenceProductSource, VitaminSource,
};
pub use growth::GrowthScreen;
pub use pregnancy::{PregnancyProgress, PregnancyScreen};
pub use vaccinations::VaccinationsScreen;
pub use visits::VisitsScreen;
