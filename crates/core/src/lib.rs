//! # MomCare Core
//!
//! Client-side logic for the MomCare pregnancy tracker.
//!
//! This crate holds everything between the backend and a presentation surface:
//! - Client configuration resolved once at startup (`config`)
//! - The shared HTTP client every service is built on (`client`)
//! - One service per backend resource (`services`)
//! - Observable view-state with optimistic mutation and rollback (`state`)
//! - One state holder per screen (`screens`)
//! - Form validation, the local fallback store, and view/layout helpers
//!
//! **No rendering concerns**: terminal output lives in `momcare-cli`; wire types live in
//! `api-shared` so the development backend in `api-rest` speaks the same contract.

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod layout;
pub mod presentation;
pub mod screens;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use store::LocalStore;

/// Build a [`LocalStore`] inside the configured data directory.
///
/// # Errors
///
/// Returns `ClientError::Storage` if an existing store file cannot be read or decoded.
pub fn open_local_store(config: &ClientConfig) -> ClientResult<LocalStore> {
    let path = config.data_dir().join(constants::LOCAL_STORE_FILENAME);
    Ok(LocalStore::open(path)?)
}
