//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, guarded prompting and store calls into
//!   use-case level APIs.
//! - Keep the console front end free of business rules.

pub mod registry_service;
