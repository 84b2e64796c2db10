/**
 * API Routes
 *
 * # Routes
 *
 * ## Authentication (`/api/auth`)
 * - `POST /login`, `POST /register/client`, `POST /register/seller` - public
 * - `POST /verify`, `POST /refresh`, `POST /logout` - authenticated
 * - `GET|PUT|DELETE /profile` - authenticated
 * - `GET /clients`, `GET /sellers`, `GET /users` - authenticated
 *
 * ## Products (`/api/products`)
 * - `GET|POST /`, `GET|PUT|DELETE /{id}`, `GET /barcode/{barcode}` -
 *   authenticated sellers only
 *
 * Gates are attached with `route_layer`, so unmatched paths fall through to
 * the JSON 404 instead of a 401.
 */

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::auth::handlers::{
    delete_profile, get_profile, list_clients, list_sellers, list_users, login, logout, refresh,
    register_client, register_seller, update_profile, verify,
};
use crate::backend::middleware::{auth_middleware, require_seller};
use crate::backend::products::handlers::{
    check_barcode, create_product, delete_product, get_product, list_products, update_product,
};
use crate::backend::server::state::AppState;

/// Authentication routes, relative to `/api/auth`
pub fn auth_routes(state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/login", post(login))
        .route("/register/client", post(register_client))
        .route("/register/seller", post(register_seller));

    let protected = Router::new()
        .route("/verify", post(verify))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/profile", get(get_profile).put(update_profile).delete(delete_profile))
        .route("/clients", get(list_clients))
        .route("/sellers", get(list_sellers))
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    public.merge(protected)
}

/// Seller product routes, relative to `/api/products`
///
/// The authentication gate is the outer layer, so a missing token is a 401
/// before the role check can answer 403.
pub fn product_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/{id}", get(get_product).put(update_product).delete(delete_product))
        .route("/barcode/{barcode}", get(check_barcode))
        .route_layer(middleware::from_fn(require_seller))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
}

/// Mount every API route group
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .nest("/api/auth", auth_routes(state))
        .nest("/api/products", product_routes(state))
}
