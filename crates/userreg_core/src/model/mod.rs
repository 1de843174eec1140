//! Domain model for registered users.
//!
//! # Responsibility
//! - Define the persisted user record and its stable identifier.
//! - Own the field validation rules applied at registration time.
//!
//! # Invariants
//! - Every user is identified by a `UserId` that is never reused or mutated.
//! - There is no update path: records are created once and deleted by id.

pub mod rules;
pub mod user;
