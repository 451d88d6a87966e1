//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate page derivation and persistence into use-case level APIs.
//! - Keep host/UI layers decoupled from storage details.

pub mod editor;
pub mod page_store;
