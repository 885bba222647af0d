// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here sits behind jwt_auth_middleware, which rejects the request
// before any handler runs and leaves an AuthUser in the request extensions.

pub mod auth;
pub mod resource;
