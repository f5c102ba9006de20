//! Contact persistence behind the [`ContactStore`] seam.
//!
//! Loading never fails: a missing or damaged contacts file falls back to
//! [`default_contacts`], so a fresh install can still call "Mom".

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{Contact, ContactsError};

/// Source of the contact list handed to the resolver.
pub trait ContactStore: Send + Sync {
    /// Load the current contact list.
    fn load(&self) -> Vec<Contact>;
}

/// Built-in contacts used when nothing has been saved yet.
pub fn default_contacts() -> Vec<Contact> {
    vec![
        Contact::new("Mom", "+15551230001"),
        Contact::new("Dad", "+15551230002"),
        Contact::new("Alice", "+15551230003"),
        Contact::new("Bob", "+15551230004"),
    ]
}

/// A fixed, in-memory contact list.
#[derive(Debug, Clone, Default)]
pub struct MemoryContactStore {
    contacts: Vec<Contact>,
}

impl MemoryContactStore {
    /// Wrap an existing list.
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

impl ContactStore for MemoryContactStore {
    fn load(&self) -> Vec<Contact> {
        self.contacts.clone()
    }
}

/// Contacts persisted as a JSON array of `{ "name", "number" }` objects.
#[derive(Debug, Clone)]
pub struct JsonContactStore {
    path: PathBuf,
}

impl JsonContactStore {
    /// Store backed by the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the backing file with `contacts`.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError::Io`] if the parent directory cannot be
    /// created or the file cannot be written.
    pub fn save(&self, contacts: &[Contact]) -> Result<(), ContactsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }
        let json = serde_json::to_string_pretty(contacts)?;
        std::fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        debug!(path = %self.path.display(), count = contacts.len(), "contacts saved");
        Ok(())
    }

    /// Read the backing file without falling back to defaults.
    ///
    /// Returns `Ok(None)` when the file is missing or blank.
    ///
    /// # Errors
    ///
    /// Returns [`ContactsError`] if the file cannot be read or is not a
    /// JSON array of contacts.
    pub fn try_load(&self) -> Result<Option<Vec<Contact>>, ContactsError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let contacts: Vec<Contact> = serde_json::from_str(&raw)?;
        Ok(Some(contacts))
    }

    fn io_error(&self, source: std::io::Error) -> ContactsError {
        ContactsError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl ContactStore for JsonContactStore {
    fn load(&self) -> Vec<Contact> {
        match self.try_load() {
            Ok(Some(contacts)) => contacts,
            Ok(None) => {
                debug!(path = %self.path.display(), "no saved contacts, using defaults");
                default_contacts()
            }
            Err(e) => {
                warn!(error = %e, "failed to load contacts, using defaults");
                default_contacts()
            }
        }
    }
}
