//! Test suite for lexfirm-rs
//!
//! - `common/` holds shared infrastructure: an in-memory SQLite application
//!   state and fixture factories.
//! - `integration/` exercises the database layer and the HTTP surface
//!   end to end against that state.
//!
//! Run with `cargo test`.

mod common;
mod integration;
