//! User store contract and JSON file implementation.
//!
//! # Responsibility
//! - Provide list/add/find/delete APIs over the persisted user collection.
//! - Enforce email uniqueness at insertion time.
//!
//! # Invariants
//! - `add_user` validates the record and rejects duplicate emails before any
//!   write happens.
//! - Email comparison is exact and case-sensitive.
//! - Misses (`DuplicateEmail`, `NotFound`) never touch the document.

use super::document::{ensure_document, load_users, save_users};
use super::{StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::user::{User, UserId};
use log::info;
use std::path::{Path, PathBuf};

/// Repository interface for user records.
pub trait UserStore {
    /// Returns every record in persisted order.
    fn list_users(&self) -> StoreResult<Vec<User>>;
    /// Appends `user` unless its email is already registered.
    fn add_user(&self, user: &User) -> StoreResult<()>;
    /// Returns the record with exactly this email.
    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// Returns the record with this id.
    fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>>;
    /// Returns records whose name contains `fragment`, ignoring case.
    fn find_by_name(&self, fragment: &str) -> StoreResult<Vec<User>>;
    /// Removes the record with this id and returns it.
    fn delete_user(&self, id: &UserId) -> StoreResult<User>;
}

/// User store backed by a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonUserStore {
    path: PathBuf,
}

impl JsonUserStore {
    /// Opens the store at `path`, creating the document if absent.
    ///
    /// # Errors
    /// - Returns `StoreError::Write` when the document cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        ensure_document(&path)?;
        info!("event=store_open module=store status=ok");
        Ok(Self { path })
    }

    /// Opens the store configured by `config`.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        Self::open(config.data_file.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl UserStore for JsonUserStore {
    fn list_users(&self) -> StoreResult<Vec<User>> {
        load_users(&self.path)
    }

    fn add_user(&self, user: &User) -> StoreResult<()> {
        user.validate()?;

        let mut users = load_users(&self.path)?;
        if users.iter().any(|existing| existing.email == user.email) {
            info!("event=user_add module=store status=rejected reason=duplicate_email");
            return Err(StoreError::DuplicateEmail(user.email.clone()));
        }

        users.push(user.clone());
        save_users(&self.path, &users)?;
        info!(
            "event=user_add module=store status=ok user_id={} count={}",
            user.id,
            users.len()
        );
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(load_users(&self.path)?
            .into_iter()
            .find(|user| user.email == email))
    }

    fn find_by_id(&self, id: &UserId) -> StoreResult<Option<User>> {
        Ok(load_users(&self.path)?
            .into_iter()
            .find(|user| &user.id == id))
    }

    fn find_by_name(&self, fragment: &str) -> StoreResult<Vec<User>> {
        let needle = fragment.to_lowercase();
        Ok(load_users(&self.path)?
            .into_iter()
            .filter(|user| user.name.to_lowercase().contains(&needle))
            .collect())
    }

    fn delete_user(&self, id: &UserId) -> StoreResult<User> {
        let mut users = load_users(&self.path)?;
        let Some(index) = users.iter().position(|user| &user.id == id) else {
            info!("event=user_delete module=store status=not_found user_id={id}");
            return Err(StoreError::NotFound(id.clone()));
        };

        let removed = users.remove(index);
        save_users(&self.path, &users)?;
        info!(
            "event=user_delete module=store status=ok user_id={} count={}",
            id,
            users.len()
        );
        Ok(removed)
    }
}
