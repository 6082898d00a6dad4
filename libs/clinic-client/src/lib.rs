//! Typed HTTP client for the scheduling API, used by the desktop front end.
//!
//! Holds no global state: the logged-in user and the failed-login counter
//! live in a [`Session`] owned by the caller.

pub mod challenge;
pub mod client;
pub mod error;
pub mod schedule;
pub mod session;

pub use challenge::Challenge;
pub use client::ApiClient;
pub use error::ClientError;
pub use session::Session;
