/**
 * Application State Management
 *
 * `AppState` is the single state container handed to the router. Handlers
 * and middleware extract only the part they need through the `FromRef`
 * implementations below, so a handler that takes `State<AuthService>`
 * never sees the product store and vice versa.
 *
 * Every field is cheap to clone: the stores sit behind `Arc`, and
 * `AuthService` and `TokenIssuer` share their internals the same way.
 */

use std::sync::Arc;
use std::time::Instant;

use axum::extract::FromRef;

use crate::backend::auth::{AuthService, TokenIssuer};
use crate::backend::products::Products;
use crate::shared::AppConfig;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication flows (login, registration, profile)
    pub auth: AuthService,

    /// Seller product catalog
    pub products: Products,

    /// Validated startup configuration
    pub config: Arc<AppConfig>,

    /// Process start, reported by the health check
    pub started_at: Instant,
}

impl FromRef<AppState> for AuthService {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.auth.tokens().clone()
    }
}

impl FromRef<AppState> for Products {
    fn from_ref(state: &AppState) -> Self {
        state.products.clone()
    }
}
