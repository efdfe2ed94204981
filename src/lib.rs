//! # Newsdeck
//!
//! A category-driven news reading core with persisted preferences.
//!
//! ## Architecture
//!
//! ```text
//! Device theme ─┐
//!               ├─→ PreferenceResolver ─→ subscribers
//! Store ────────┘
//!
//! Category ─→ FeedController ─→ FeedClient ─→ article list
//! ```
//!
//! Two engines carry the interesting state:
//!
//! - [`prefs::PreferenceResolver`] reconciles the user's dark-mode override
//!   with the live device report, persists every preference, and fans
//!   resolved values out to all subscribers synchronously.
//! - [`feed::FeedController`] owns the selected category and the
//!   `Idle → Loading → {Loaded, Failed}` lifecycle, with sequence-number
//!   gating so a stale response can never overwrite a newer selection.
//!
//! ## Modules
//!
//! - [`app`]: Application context and error types
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration (`~/.config/newsdeck/config.toml`)
//! - [`domain`]: Core domain models (Article, Category)
//! - [`feed`]: Feed state machine, HTTP client and async driver
//! - [`prefs`]: Preference resolution and device-theme signal
//! - [`store`]: SQLite key-value persistence

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod feed;
pub mod prefs;
pub mod store;
