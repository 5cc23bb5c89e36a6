use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, put},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, middleware, state::AppState};

pub fn build_router(state: AppState) -> Router {
    // Outermost first. Cors needs a `Default` body from its inner service, so it sits
    // under Trace. Panics become tagged failures before the mapper renders them.
    let layers = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(from_fn_with_state(state.clone(), middleware::map_failures))
        .layer(CatchPanicLayer::custom(middleware::failure_for_panic));

    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route(
            "/api/accounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/api/accounts/:id",
            get(handlers::get_account).put(handlers::toggle_account_status),
        )
        .route(
            "/api/phonenumbers/account/:account_id",
            get(handlers::list_phone_numbers_by_account),
        )
        .route(
            "/api/phonenumbers/:id",
            put(handlers::assign_phone_number_to_account).delete(handlers::delete_phone_number),
        )
        .layer(layers)
        .with_state(state)
}
