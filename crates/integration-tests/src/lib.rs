//! Integration tests for Padauk Market.
//!
//! This crate has no library code; the tests live in `tests/` and drive
//! the core cart/filter logic and the storefront services together.

#![cfg_attr(not(test), forbid(unsafe_code))]
