//! Shared application state, built once at startup and cloned into every handler.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::JwtKeys;
use crate::config::AppConfig;
use crate::database::{DocumentStore, Repository};
use crate::models::{Credential, Enrollment, Student, Subject};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub students: Repository<Student>,
    pub enrollments: Repository<Enrollment>,
    pub subjects: Repository<Subject>,
    pub credentials: Repository<Credential>,
    pub jwt: JwtKeys,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: AppConfig) -> Self {
        let jwt = JwtKeys::new(&config.security.jwt_secret, config.security.jwt_expiry_hours);
        Self {
            students: Repository::new(Arc::clone(&store)),
            enrollments: Repository::new(Arc::clone(&store)),
            subjects: Repository::new(Arc::clone(&store)),
            credentials: Repository::new(Arc::clone(&store)),
            store,
            jwt,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for Repository<Student> {
    fn from_ref(state: &AppState) -> Self {
        state.students.clone()
    }
}

impl FromRef<AppState> for Repository<Enrollment> {
    fn from_ref(state: &AppState) -> Self {
        state.enrollments.clone()
    }
}

impl FromRef<AppState> for Repository<Subject> {
    fn from_ref(state: &AppState) -> Self {
        state.subjects.clone()
    }
}

impl FromRef<AppState> for Repository<Credential> {
    fn from_ref(state: &AppState) -> Self {
        state.credentials.clone()
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
