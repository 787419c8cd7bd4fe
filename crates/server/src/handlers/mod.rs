//! # API Route Handlers
//!
//! Axum handlers for the server, split into logical sub-modules: the chat
//! pipeline endpoint, article lookup/creation, corpus import, and the
//! root/health probes.

pub mod articles;
pub mod chat;
pub mod general;

pub use articles::*;
pub use chat::*;
pub use general::*;
