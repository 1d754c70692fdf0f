//! # HTTP Server Module
//!
//! Axum server exposing the patient store.
//!
//! # Endpoints
//!
//! - `GET /` and `GET /about` - static messages
//! - `GET /view` - every patient keyed by id
//! - `GET /patient/:id` - one patient
//! - `GET /sort?sort_by=&order_by=` - patients ordered by height, weight or bmi
//! - `POST /create`, `PUT /edit/:id`, `DELETE /delete/:id` - mutations

pub mod config;
pub mod errors;
pub mod patient_routes;
pub mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use patient_routes::{patient_routes, AppState, MessageResponse};
pub use server::HttpServer;
