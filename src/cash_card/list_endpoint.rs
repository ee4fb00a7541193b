//! Defines the endpoint for listing the caller's cash cards a page at a time.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::{
    Error,
    auth::Principal,
    cash_card::{CashCard, CashCardState, CashCardStore},
    pagination::PageQuery,
};

/// A route handler for listing a page of the caller's cash cards.
///
/// Takes the query parameters `page`, `size` and `sort` (e.g. `sort=amount,desc`).
/// Without a `sort` the cash cards are sorted by ascending amount.
/// The response is a bare JSON array, callers reach the end of the data when
/// a page has fewer than `size` cash cards.
pub async fn list_cash_cards_endpoint(
    State(state): State<CashCardState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<CashCard>>, Error> {
    let page = query.resolve(&state.pagination_config)?;

    tracing::debug!(
        "Listing page {} (size {}, sort {}) for user \"{}\"",
        page.page,
        page.size,
        page.sort,
        principal.username
    );

    state
        .cash_card_store
        .list_page_by_owner(&principal.username, &page)
        .map(Json)
}
