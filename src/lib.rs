//! patientdb - Patient Management System API
//!
//! A file-backed patient store served over HTTP.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod patient;
pub mod store;
