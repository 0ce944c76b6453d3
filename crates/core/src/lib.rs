//! Domain rules for the setlist library: identifiers, validation of track
//! metadata, the track filter predicate, set membership helpers, and the
//! track and set models exchanged over the API.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into it before touching storage.

pub mod error;
pub mod filter;
pub mod genre;
pub mod membership;
pub mod models;
pub mod music_key;
pub mod track;
pub mod types;
