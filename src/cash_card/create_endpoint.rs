//! Defines the endpoint for creating a new cash card.

use axum::{
    Extension, Json,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    Error,
    auth::Principal,
    cash_card::{CashCardState, CashCardStore, NewCashCard},
    endpoints::{self, format_endpoint},
};

/// The JSON body for creating a cash card.
///
/// Any `id` or `owner` sent by the client is ignored.
#[derive(Debug, Deserialize)]
pub struct CashCardRequest {
    /// The amount of money on the card.
    pub amount: f64,
}

/// A route handler for creating a new cash card owned by the caller.
///
/// Responds with 201 Created, a `Location` header pointing at the new cash
/// card and an empty body.
pub async fn create_cash_card_endpoint(
    State(mut state): State<CashCardState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CashCardRequest>,
) -> Result<Response, Error> {
    let cash_card = state.cash_card_store.insert(NewCashCard {
        amount: request.amount,
        owner: principal.username,
    })?;

    tracing::debug!(
        "Created cash card {} for user \"{}\"",
        cash_card.id,
        cash_card.owner
    );

    let location = format_endpoint(endpoints::CASH_CARD, cash_card.id);

    Ok((StatusCode::CREATED, [(LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        CashCard,
        test_utils::{basic_auth, get_test_server},
    };

    #[tokio::test]
    async fn creates_cash_card_at_location() {
        let server = get_test_server();

        let response = server
            .post("/cashcards")
            .add_header("authorization", basic_auth("sarah1", "abc123"))
            .json(&json!({"id": null, "amount": 250.00, "owner": null}))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        response.assert_text("");
        let location = response.header("location");
        let location = location.to_str().unwrap();

        let response = server
            .get(location)
            .add_header("authorization", basic_auth("sarah1", "abc123"))
            .await;

        response.assert_status_ok();
        let cash_card = response.json::<CashCard>();
        assert_eq!(location, format!("/cashcards/{}", cash_card.id));
        assert_eq!(cash_card.amount, 250.00);
        assert_eq!(cash_card.owner.as_str(), "sarah1");
    }

    #[tokio::test]
    async fn ignores_client_supplied_id_and_owner() {
        let server = get_test_server();

        let response = server
            .post("/cashcards")
            .add_header("authorization", basic_auth("sarah1", "abc123"))
            .json(&json!({"id": 102, "amount": 5.0, "owner": "kumar2"}))
            .await;

        response.assert_status(axum::http::StatusCode::CREATED);
        let location = response.header("location");
        assert_ne!(location, "/cashcards/102");

        let cash_card = server
            .get(location.to_str().unwrap())
            .add_header("authorization", basic_auth("sarah1", "abc123"))
            .await
            .json::<CashCard>();
        assert_eq!(cash_card.owner.as_str(), "sarah1");

        // The new card is not visible to the owner named in the request body.
        server
            .get(location.to_str().unwrap())
            .add_header("authorization", basic_auth("kumar2", "xyz789"))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn every_request_creates_a_new_card() {
        let server = get_test_server();

        let locations = post_twice(&server).await;

        assert_ne!(locations[0], locations[1]);
    }

    async fn post_twice(server: &axum_test::TestServer) -> Vec<String> {
        let mut locations = Vec::new();

        for _ in 0..2 {
            let response = server
                .post("/cashcards")
                .add_header("authorization", basic_auth("sarah1", "abc123"))
                .json(&json!({"amount": 10.0}))
                .await;
            response.assert_status(axum::http::StatusCode::CREATED);
            locations.push(response.header("location").to_str().unwrap().to_owned());
        }

        locations
    }

    #[tokio::test]
    async fn missing_amount_is_rejected() {
        let server = get_test_server();

        server
            .post("/cashcards")
            .add_header("authorization", basic_auth("sarah1", "abc123"))
            .json(&json!({"owner": "sarah1"}))
            .await
            .assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn requires_credentials() {
        let server = get_test_server();

        server
            .post("/cashcards")
            .json(&json!({"amount": 10.0}))
            .await
            .assert_status_unauthorized();
    }
}
