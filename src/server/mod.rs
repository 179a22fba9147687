//! HTTP surface of the humaniser.
//!
//! [`router::build_router`] wires the humanise and health endpoints behind a
//! permissive CORS layer; [`state::AppState`] carries the shared pipeline.

pub mod error;
pub mod handlers;
pub mod router;
pub mod schema;
pub mod state;

pub use self::error::ApiError;
pub use self::router::build_router;
pub use self::state::AppState;
