//! Padauk Core - Shared types and domain logic.
//!
//! This crate provides the types used across all Padauk Market components
//! plus the two pieces of logic that must be bit-exact everywhere:
//!
//! - [`cart`] - The session-scoped shopping cart state machine
//! - [`filter`] - Catalog search/category filtering
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP,
//! no async. Cart mutations are plain `&mut self` calls; a multi-threaded
//! host must serialize access itself (quantity updates are read-modify-write).
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   the validated `Product` schema
//! - [`cart`] - Line items, derived totals, and mutation events
//! - [`filter`] - Pure catalog filtering functions

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filter;
pub mod types;

pub use cart::{Cart, CartEvent, ItemSnapshot, LineItem};
pub use filter::CATEGORY_ALL;
pub use types::*;
