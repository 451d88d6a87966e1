//! Page search entry points.
//!
//! # Responsibility
//! - Narrow a page list by title substring or exact keyword.
//! - Offer keyword autocomplete from the aggregate keyword set.
//!
//! # Invariants
//! - Search never mutates pages and preserves input order.

pub mod filter;
