//! # Userbase API Server Library
//!
//! HTTP routing and error mapping for the user CRUD service.
//!
//! ## Modules
//!
//! - `app`: Application state and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `extract`: Typed id and JSON body extractors
//! - `middleware`: CORS headers middleware
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
