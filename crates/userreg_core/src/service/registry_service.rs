//! User registry use-case service.
//!
//! # Responsibility
//! - Register users from programmatic requests or guarded interactive prompts.
//! - Provide list, lookup, name search and delete entry points.
//!
//! # Invariants
//! - Registration persists only records whose three fields pass validation.
//! - Email uniqueness is checked while prompting and again at insert time.
//! - Every error is returned to the caller; none terminates the process.

use crate::config::DEFAULT_MAX_ATTEMPTS;
use crate::model::rules::{is_valid_email, is_valid_name, is_valid_password};
use crate::model::user::{Field, User, UserId, UserValidationError};
use crate::prompt::{retry_input, PromptError, PromptIo, RetryPrompt};
use crate::store::user_store::UserStore;
use crate::store::StoreError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

const NAME_LABEL: &str = "Enter name (only letters, min 3 chars)";
const NAME_ERROR: &str = "Name must be at least 3 characters and only letters!";
const EMAIL_LABEL: &str = "Enter email (e.g. user@example.com)";
const EMAIL_ERROR: &str = "Invalid or already used email! Example: user@example.com";
const PASSWORD_LABEL: &str = "Enter password:\n\
Password requirements:\n\
- At least 8 characters\n\
- At least one digit\n\
- At least one lowercase letter\n\
- At least one uppercase letter\n\
- At least one special character (@#$%^&+=)\n\
- No whitespace allowed\n\
Password:";
const PASSWORD_ERROR: &str = "Password does not meet requirements!";

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Service error for registry use-cases.
#[derive(Debug)]
pub enum RegistryError {
    /// A submitted field failed its rule.
    InvalidField(UserValidationError),
    /// Email is already registered.
    DuplicateEmail(String),
    /// No user carries this id.
    UserNotFound(UserId),
    /// Guarded prompt rejected every attempt.
    RetryExhausted { field: Field, message: String },
    /// Operator input ended mid-flow.
    InputClosed(Field),
    /// Operator I/O failed.
    Io(std::io::Error),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidField(err) => write!(f, "{err}"),
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::UserNotFound(id) => write!(f, "user not found: {id}"),
            Self::RetryExhausted { field, message } => {
                write!(f, "too many invalid {field} attempts: {message}")
            }
            Self::InputClosed(field) => write!(f, "input closed while reading {field}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<UserValidationError> for RegistryError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidField(value)
    }
}

impl From<StoreError> for RegistryError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Validation(err) => Self::InvalidField(err),
            StoreError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            StoreError::NotFound(id) => Self::UserNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<PromptError> for RegistryError {
    fn from(value: PromptError) -> Self {
        match value {
            PromptError::RetryExhausted { field, message } => {
                Self::RetryExhausted { field, message }
            }
            PromptError::InputClosed(field) => Self::InputClosed(field),
            PromptError::Io(err) => Self::Io(err),
        }
    }
}

/// Request model for registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Use-case service over a user store.
pub struct RegistryService<S: UserStore> {
    store: S,
    max_attempts: u32,
}

impl<S: UserStore> RegistryService<S> {
    /// Creates a service granting [`DEFAULT_MAX_ATTEMPTS`] per guarded prompt.
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Registers a user from already-collected field values.
    ///
    /// # Contract
    /// - Returns the stored record, including its generated id.
    /// - `InvalidField` names the first failing field (name, email, password).
    /// - `DuplicateEmail` leaves the store untouched.
    pub fn register(&self, request: &RegisterRequest) -> RegistryResult<User> {
        let user = User::new(
            request.name.as_str(),
            request.email.as_str(),
            request.password.as_str(),
        );
        user.validate()?;
        self.store.add_user(&user)?;
        info!(
            "event=user_register module=service status=ok user_id={}",
            user.id
        );
        Ok(user)
    }

    /// Registers a user by prompting for each field with bounded retries.
    ///
    /// The email prompt rejects addresses that are malformed or already
    /// registered at prompt time.
    ///
    /// # Contract
    /// - Returns `RetryExhausted` naming the field whose attempts ran out.
    /// - Nothing is written unless all three fields were accepted.
    pub fn register_interactive<P: PromptIo + ?Sized>(&self, io: &mut P) -> RegistryResult<User> {
        let result = self.collect_and_register(io);
        if let Err(RegistryError::RetryExhausted { field, .. }) = &result {
            info!(
                "event=user_register module=service status=aborted reason=retry_exhausted field={}",
                field
            );
        }
        result
    }

    fn collect_and_register<P: PromptIo + ?Sized>(&self, io: &mut P) -> RegistryResult<User> {
        let name = retry_input(io, &self.guarded(Field::Name), is_valid_name)?;

        // Why: one snapshot serves every email attempt; `add_user` re-checks
        // uniqueness against the file at insert time.
        let existing = self.store.list_users()?;
        let email = retry_input(io, &self.guarded(Field::Email), |candidate| {
            is_valid_email(candidate) && !existing.iter().any(|user| user.email == candidate)
        })?;

        let password = retry_input(io, &self.guarded(Field::Password), is_valid_password)?;

        self.register(&RegisterRequest {
            name,
            email,
            password,
        })
    }

    fn guarded(&self, field: Field) -> RetryPrompt {
        let (label, error_message) = match field {
            Field::Name => (NAME_LABEL, NAME_ERROR),
            Field::Email => (EMAIL_LABEL, EMAIL_ERROR),
            Field::Password => (PASSWORD_LABEL, PASSWORD_ERROR),
        };
        RetryPrompt::new(field, label, error_message).with_max_attempts(self.max_attempts)
    }

    /// Lists all users in persisted order.
    pub fn list_users(&self) -> RegistryResult<Vec<User>> {
        Ok(self.store.list_users()?)
    }

    /// Finds a user by exact email.
    pub fn find_by_email(&self, email: &str) -> RegistryResult<Option<User>> {
        Ok(self.store.find_by_email(email)?)
    }

    /// Finds a user by id.
    pub fn find_by_id(&self, id: &str) -> RegistryResult<Option<User>> {
        Ok(self.store.find_by_id(&UserId::from(id))?)
    }

    /// Finds users whose name contains `fragment`, ignoring case.
    pub fn search_by_name(&self, fragment: &str) -> RegistryResult<Vec<User>> {
        Ok(self.store.find_by_name(fragment)?)
    }

    /// Deletes a user by id and returns the removed record.
    ///
    /// Returns `UserNotFound` without writing when no record matches.
    pub fn delete_user(&self, id: &str) -> RegistryResult<User> {
        Ok(self.store.delete_user(&UserId::from(id))?)
    }
}
