// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Account registration, token acquisition, and the health check.

pub mod auth;
pub mod system;
