//! Domain model for step-by-step pages.
//!
//! # Responsibility
//! - Define the canonical page record shared by store, search and storage.
//! - Keep raw editor input separate from validated, derived records.
//!
//! # Invariants
//! - Every page is identified by a `PageId` unique within one store.
//! - `keywords` are derived data and never edited directly.

pub mod page;
