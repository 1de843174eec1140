//! Core domain logic for the userreg user registry.
//! This crate is the single source of truth for validation and storage rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod prompt;
pub mod service;
pub mod store;

pub use config::{StoreConfig, DATA_FILE_ENV, DEFAULT_DATA_FILE, DEFAULT_MAX_ATTEMPTS};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::rules::{is_valid_email, is_valid_name, is_valid_password};
pub use model::user::{Field, User, UserId, UserValidationError};
pub use prompt::{retry_input, LinePrompt, PromptError, PromptIo, PromptResult, RetryPrompt};
pub use service::registry_service::{
    RegisterRequest, RegistryError, RegistryResult, RegistryService,
};
pub use store::user_store::{JsonUserStore, UserStore};
pub use store::{StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
