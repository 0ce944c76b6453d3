//! Client for the setlist API with a local, observable library cache.
//!
//! [`ApiClient`] speaks the HTTP API. [`Store`] wraps it and keeps a
//! [`LibraryState`] up to date: every operation dispatches [`Action`]s
//! through the pure [`reduce`] function, and observers receive state
//! snapshots over a `tokio::sync::watch` channel.

pub mod api;
pub mod error;
pub mod state;
pub mod store;

pub use api::ApiClient;
pub use error::ClientError;
pub use state::{reduce, Action, Collection, LibraryState, Status};
pub use store::Store;
