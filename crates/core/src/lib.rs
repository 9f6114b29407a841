//! Domain types and rules for the research group site.
//!
//! This crate has no database or HTTP dependency so the repository layer,
//! the API server and the client library can all share it.

pub mod dashboard;
pub mod error;
pub mod listing;
pub mod media;
pub mod news;
pub mod ordering;
pub mod patent;
pub mod project;
pub mod publication;
pub mod research;
pub mod search;
pub mod team_member;
pub mod text_enum;
pub mod todo;
pub mod types;
pub mod user;
pub mod validation;
