use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness response served at `/health`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Simple health service used by the development backend
///
/// The client also decodes `HealthRes` when probing a configured base URL.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "MomCare backend is alive".into(),
        }
    }
}
