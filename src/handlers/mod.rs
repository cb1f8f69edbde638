//! Operation handlers for the todo service
//!
//! Each operation lives in its own file as an `impl TodoService` block.
//! Handlers validate input, call the store and annotate the results; they
//! know nothing about HTTP.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod stats;
pub mod update;
