//! Integration tests
//!
//! `router_tests` drive the router in-process and need no database.
//! `api_tests` talk to a running server and are ignored by default:
//! run them with `cargo test -- --ignored`.

mod api_tests;
mod router_tests;
