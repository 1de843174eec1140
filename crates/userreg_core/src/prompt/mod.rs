//! Bounded-retry prompting for guarded inputs.
//!
//! # Responsibility
//! - Abstract line-oriented operator I/O behind a small trait.
//! - Provide the prompt/validate/retry loop shared by every guarded field.
//!
//! # Invariants
//! - A guarded prompt never yields a value its predicate rejected.
//! - Exhaustion and closed input are result variants, never panics.

mod io;
mod retry;

pub use io::{LinePrompt, PromptIo};
pub use retry::{retry_input, PromptError, PromptResult, RetryPrompt};
