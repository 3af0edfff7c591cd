//! Service layer for the user directory.
//! - `storage`: the `UserStore` abstraction and its in-memory implementation.
//! - `errors`: business errors surfaced to the HTTP layer.

pub mod errors;
pub mod storage;
