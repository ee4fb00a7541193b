//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    AppState,
    auth::{auth_guard, basic_auth_middleware},
    cash_card::{create_cash_card_endpoint, get_cash_card_endpoint, list_cash_cards_endpoint},
    endpoints,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// Every cash card route requires Basic credentials from a card owner.
/// Bad credentials are rejected on every path, including ones that match no route.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            endpoints::CASH_CARDS,
            get(list_cash_cards_endpoint).post(create_cash_card_endpoint),
        )
        .route(endpoints::CASH_CARD, get(get_cash_card_endpoint))
        .route_layer(middleware::from_fn(auth_guard));

    protected_routes
        .fallback(get_404_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth_middleware,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{basic_auth, get_test_server};

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let server = get_test_server();

        let response = server
            .get("/cards")
            .add_header("authorization", basic_auth("sarah1", "abc123"))
            .await;

        response.assert_status_not_found();
        response.assert_text("");
    }

    #[tokio::test]
    async fn unknown_path_without_credentials_is_not_found() {
        let server = get_test_server();

        server.get("/cards").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn bad_credentials_on_unknown_path_are_unauthorized() {
        let server = get_test_server();

        for path in ["/cards", "/cashcards/99/extra"] {
            let response = server
                .get(path)
                .add_header("authorization", basic_auth("BAD-USER", "abc123"))
                .await;

            response.assert_status_unauthorized();
            response.assert_text("");
        }
    }

    #[tokio::test]
    async fn wrong_password_with_unsupported_method_is_unauthorized() {
        let server = get_test_server();

        server
            .delete("/cashcards/99")
            .add_header("authorization", basic_auth("sarah1", "BAD-PASSWORD"))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn unsupported_method_is_rejected() {
        let server = get_test_server();

        server
            .delete("/cashcards/99")
            .add_header("authorization", basic_auth("sarah1", "abc123"))
            .await
            .assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
    }
}
