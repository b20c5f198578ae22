/// Middleware modules for the API server
///
/// - `cors`: Cross-origin headers and `OPTIONS` short-circuit

pub mod cors;
