//! Web API module for pdfdrop.
//!
//! Thin axum adapters over the storage core:
//! - `POST /upload` - multipart PDF upload
//! - `GET /download/{name}` - stream a stored file
//! - `GET /files` - list stored files

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
