// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer JWT required)

pub mod protected; // Tier 2: routed behind jwt_auth_middleware
pub mod public; // Tier 1: token acquisition and health check
pub mod utils;
