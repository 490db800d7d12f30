//! Chunk Radar HTTP server — REST handlers over the JSON stores.

pub mod error;
pub mod extract;
pub mod migrate;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::AppState;
