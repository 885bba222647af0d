use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::database::Repository;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::models::{Enrollment, Resource, Student, Subject};
use crate::state::AppState;

/// Full application router with its state attached.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .merge(auth_public_routes())
        // Protected API
        .merge(protected_routes(&state))
        .fallback(public::system::route_not_found)
        .layer(DefaultBodyLimit::max(state.config.api.max_request_size_bytes));

    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(public::auth::register))
        .route("/api/auth/login", post(public::auth::login))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(resource_routes::<Student>("/api/student"))
        .merge(resource_routes::<Enrollment>("/api/enrollment"))
        .merge(resource_routes::<Subject>("/api/subject"))
        .route("/api/auth/me", get(protected::auth::me))
        // route_layer: unmatched paths fall through to the 404 without a token
        .route_layer(middleware::from_fn_with_state(state.jwt.clone(), jwt_auth_middleware))
}

/// Collection and item routes for one resource.
fn resource_routes<T>(path: &str) -> Router<AppState>
where
    T: Resource,
    Repository<T>: FromRef<AppState>,
{
    use protected::resource;

    Router::new()
        .route(path, get(resource::list::<T>).post(resource::create::<T>))
        .route(
            &format!("{}/:id", path),
            get(resource::get::<T>)
                .put(resource::update::<T>)
                .delete(resource::delete::<T>),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
