//! Integration tests
//!
//! `api` drives the full router against in-memory stores. `database` runs
//! the Postgres stores against a real server and is ignored by default.

pub mod api;
