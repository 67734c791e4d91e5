//! # API Shared
//!
//! Wire definitions shared by the MomCare client and the development backend.
//!
//! Contains:
//! - Response records exactly as the backend emits them (`wire` module)
//! - Form, query and JSON request bodies (`forms` module)
//! - Endpoint paths relative to the API base URL (`endpoints` module)
//! - Lenient field decoders for numbers and flags that arrive as text (`lenient` module)
//! - The health response and `HealthService`
//!
//! Used by `momcare-core` (client side) and `api-rest` (development backend) so both ends
//! agree on field names byte for byte.

pub mod endpoints;
pub mod forms;
pub mod health;
pub mod lenient;
pub mod wire;

pub use health::{HealthRes, HealthService};
pub use wire::*;
