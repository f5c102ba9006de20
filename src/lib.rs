//! Parley — a voice command interpreter.
//!
//! Turns an utterance ("call mom", "text alice running late") into an
//! [`intent::Intent`], resolves spoken contact names with an LCS-based
//! fuzzy match, and dispatches the result into an action a host can
//! perform. Everything here is synchronous and free of shared state.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;

pub mod apps;
pub mod contacts;
pub mod intent;
pub mod similarity;

pub mod dispatch;

pub use apps::lookup;
pub use contacts::{resolve, Contact};
pub use intent::{parse, Intent};
pub use similarity::score;
