//! Defines the endpoint for fetching a single cash card.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    Error,
    auth::Principal,
    cash_card::{CashCard, CashCardId, CashCardState, CashCardStore},
};

/// A route handler for getting one of the caller's cash cards by its ID.
///
/// Responds with 404 and an empty body if the cash card does not exist or
/// belongs to another user, so callers cannot tell whether another user's
/// cash card exists.
pub async fn get_cash_card_endpoint(
    State(state): State<CashCardState>,
    Extension(principal): Extension<Principal>,
    Path(cash_card_id): Path<CashCardId>,
) -> Result<Json<CashCard>, Error> {
    state
        .cash_card_store
        .get_by_id_and_owner(cash_card_id, &principal.username)
        .map(Json)
}
