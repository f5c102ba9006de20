//! Contacts: the [`Contact`] value type, fuzzy name resolution, and storage.
//!
//! Resolution is pure. It never touches the store; callers load a contact
//! list (see [`store::ContactStore`]) and pass it in by reference.

pub mod store;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::similarity::{normalize_key, score};

/// Default minimum similarity for accepting a non-exact match.
pub const DEFAULT_FUZZY_MATCH_THRESHOLD: f64 = 0.5;

/// Default cap on query and name length fed to the scorer.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 256;

/// A person the user can call or message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, free text.
    pub name: String,
    /// Dialable number.
    pub number: String,
}

impl Contact {
    /// Build a contact from a name and a number.
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
        }
    }
}

/// Errors from the contacts subsystem.
#[derive(Debug, thiserror::Error)]
pub enum ContactsError {
    /// Filesystem operation failed.
    #[error("contacts file {path}: {source}")]
    Io {
        /// The file being read or written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The contacts document could not be encoded or decoded.
    #[error("contacts json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maps a free-text name onto a contact list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactResolver {
    /// Minimum score in `[0, 1]` a fuzzy match must reach.
    pub fuzzy_match_threshold: f64,
    /// Characters of query and contact name considered when scoring.
    pub max_query_chars: usize,
}

impl Default for ContactResolver {
    fn default() -> Self {
        Self {
            fuzzy_match_threshold: DEFAULT_FUZZY_MATCH_THRESHOLD,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

impl ContactResolver {
    /// Create a resolver with an explicit threshold and the default length cap.
    pub fn with_threshold(fuzzy_match_threshold: f64) -> Self {
        Self {
            fuzzy_match_threshold,
            ..Self::default()
        }
    }

    /// Find the contact best matching `query`.
    ///
    /// An exact match after normalization wins immediately, earliest in the
    /// list first. Otherwise the highest-scoring contact is returned if it
    /// reaches the threshold; ties keep the earlier contact.
    pub fn resolve<'a>(&self, contacts: &'a [Contact], query: &str) -> Option<&'a Contact> {
        let key = normalize_key(&self.cap(query));

        if let Some(exact) = contacts
            .iter()
            .find(|c| normalize_key(&self.cap(&c.name)) == key)
        {
            debug!(query, name = %exact.name, "contact exact match");
            return Some(exact);
        }

        let mut best: Option<&Contact> = None;
        let mut best_score = 0.0_f64;
        for contact in contacts {
            let s = score(&self.cap(&contact.name), &key);
            if s > best_score {
                best = Some(contact);
                best_score = s;
            }
        }

        match best {
            Some(contact) if best_score >= self.fuzzy_match_threshold => {
                debug!(query, name = %contact.name, score = best_score, "contact fuzzy match");
                Some(contact)
            }
            _ => {
                debug!(query, best_score, "no contact above threshold");
                None
            }
        }
    }

    fn cap(&self, s: &str) -> String {
        s.chars().take(self.max_query_chars).collect()
    }
}

/// Resolve `query` against `contacts` with the default threshold.
pub fn resolve<'a>(contacts: &'a [Contact], query: &str) -> Option<&'a Contact> {
    ContactResolver::default().resolve(contacts, query)
}
