//! # API REST
//!
//! In-memory development backend for MomCare.
//!
//! Handles:
//! - Every client endpoint under `/mevabe_api/`, with the same form/query/JSON contract
//! - `GET /health` and the OpenAPI document at `/api-docs/openapi.json`
//! - A failure switch that makes every write answer with a failure envelope
//!
//! Uses `api-shared` for the wire types so client and backend cannot drift apart.

#![warn(rust_2018_idioms)]

pub mod handlers;
pub mod store;

use api_shared::endpoints;
use axum::{
    routing::{get, post},
    Json, Router,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;

pub use store::DevStore;

/// Application state for the development backend
///
/// Shared by all handlers. The store is only locked for the duration of a synchronous
/// read or write, never across an `.await`.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<DevStore>>,
    reject_mutations: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(store: DevStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            reject_mutations: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, DevStore> {
        // The store holds plain data; a handler panic cannot leave it half-updated.
        self.store
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make every write endpoint refuse (`true`) or accept (`false`) requests.
    pub fn set_reject_mutations(&self, reject: bool) {
        self.reject_mutations.store(reject, Ordering::SeqCst);
        tracing::info!(reject, "write refusal switched");
    }

    pub fn rejecting(&self) -> bool {
        self.reject_mutations.load(Ordering::SeqCst)
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::login,
        handlers::register,
        handlers::list_visits,
        handlers::add_visit,
        handlers::update_visit,
        handlers::delete_visit,
        handlers::list_growth,
        handlers::add_growth_record,
        handlers::get_summary,
        handlers::save_summary,
        handlers::list_vaccinations,
        handlers::update_vaccination,
        handlers::daily_activities,
        handlers::save_activity,
        handlers::completion,
        handlers::day_index,
        handlers::birth_plan_questions,
        handlers::save_birth_plan_selection,
        handlers::get_messages,
        handlers::send_message,
        handlers::crisis_weeks,
        handlers::food_posts,
        handlers::reference_products,
        handlers::vitamins,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::Envelope,
        api_shared::LoginResponse,
        api_shared::Visit,
        api_shared::GrowthRecord,
        api_shared::PregnancySummary,
        api_shared::Vaccination,
        api_shared::ActivityRecord,
        api_shared::CompletionResponse,
        api_shared::DayIndexResponse,
        api_shared::BirthPlanOption,
        api_shared::BirthPlanQuestion,
        api_shared::CrisisWeek,
        api_shared::FoodPost,
        api_shared::ReferenceProduct,
        api_shared::Vitamin,
        api_shared::ChatMessage,
        api_shared::MessagesResponse,
        api_shared::forms::LoginForm,
        api_shared::forms::RegisterForm,
        api_shared::forms::VisitForm,
        api_shared::forms::DeleteVisitForm,
        api_shared::forms::VaccinationUpdateForm,
        api_shared::forms::SaveActivityForm,
        api_shared::forms::PregnancySummaryForm,
        api_shared::forms::GrowthRecordForm,
        api_shared::forms::SendMessageForm,
        api_shared::forms::BirthPlanSelection,
    ))
)]
pub struct ApiDoc;

fn route(endpoint: &str) -> String {
    format!("/{endpoint}")
}

/// Build the full router: API endpoints nested under `/mevabe_api`, plus health and docs.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(&route(endpoints::LOGIN), post(handlers::login))
        .route(&route(endpoints::REGISTER), post(handlers::register))
        .route(&route(endpoints::VISITS_LIST), get(handlers::list_visits))
        .route(&route(endpoints::VISITS_ADD), post(handlers::add_visit))
        .route(&route(endpoints::VISITS_UPDATE), post(handlers::update_visit))
        .route(&route(endpoints::VISITS_DELETE), post(handlers::delete_visit))
        .route(&route(endpoints::GROWTH_LIST), get(handlers::list_growth))
        .route(&route(endpoints::PREGNANCY_ADD), post(handlers::add_growth_record))
        .route(&route(endpoints::PREGNANCY_GET), get(handlers::get_summary))
        .route(&route(endpoints::PREGNANCY_SAVE), post(handlers::save_summary))
        .route(&route(endpoints::VACCINATIONS_LIST), get(handlers::list_vaccinations))
        .route(&route(endpoints::VACCINATION_UPDATE), post(handlers::update_vaccination))
        .route(&route(endpoints::ACTIVITIES_DAILY), get(handlers::daily_activities))
        .route(&route(endpoints::ACTIVITY_SAVE), post(handlers::save_activity))
        .route(&route(endpoints::ACTIVITY_COMPLETION), get(handlers::completion))
        .route(&route(endpoints::ACTIVITY_DAY_INDEX), get(handlers::day_index))
        .route(&route(endpoints::BIRTH_PLAN_QUESTIONS), get(handlers::birth_plan_questions))
        .route(&route(endpoints::BIRTH_PLAN_SAVE), post(handlers::save_birth_plan_selection))
        .route(&route(endpoints::CHAT_MESSAGES), get(handlers::get_messages))
        .route(&route(endpoints::CHAT_SEND), post(handlers::send_message))
        .route(&route(endpoints::CRISIS_WEEKS), get(handlers::crisis_weeks))
        .route(&route(endpoints::FOOD_POSTS), get(handlers::food_posts))
        .route(&route(endpoints::REFERENCE_PRODUCTS), get(handlers::reference_products))
        .route(&route(endpoints::VITAMINS), get(handlers::vitamins));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest(&route(endpoints::API_PREFIX), api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the development backend on an already-bound listener until the process stops.
///
/// # Errors
///
/// Returns an error if the HTTP server fails while running.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "development backend listening");
    }
    axum::serve(listener, router(state)).await
}
