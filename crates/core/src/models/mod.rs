//! Row types and request DTOs shared by the server and the HTTP client.
//!
//! With the `sqlx` feature the row types also derive `FromRow`; the client
//! builds without it and never links the database driver.

pub mod set;
pub mod track;
