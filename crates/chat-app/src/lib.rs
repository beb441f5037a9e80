#![deny(unsafe_code)]

//! Terminal chat over the Argo ocean-data assistant.

/// Conversation controller, reply lifecycle and image panel state.
pub mod chat;
pub mod error;
pub mod settings;
/// Line-oriented front-end.
pub mod terminal;

pub use error::{ChatError, ChatResult};
