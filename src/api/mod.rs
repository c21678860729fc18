//! API Module
//!
//! HTTP handlers and routing for the OTP service.
//!
//! # Endpoints
//! - `POST /otp/generate` - Issue an OTP for a key
//! - `POST /otp/validate` - Validate and consume an OTP
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
