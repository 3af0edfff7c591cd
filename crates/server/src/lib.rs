pub mod errors;
pub mod openapi;
pub mod routes;
pub mod startup;

pub use routes::AppState;
pub use startup::{run, run_with_shutdown};
