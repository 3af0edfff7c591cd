//! Domain records for the user directory.
//! - `user`: the `User` entity, request payloads and field validation
//! - `errors`: validation failures raised by this crate

pub mod errors;
pub mod user;
