//! The state shared by the cash card route handlers.

use axum::extract::FromRef;

use crate::{AppState, cash_card::SQLiteCashCardStore, pagination::PaginationConfig};

/// The state needed to create, fetch and list cash cards.
#[derive(Debug, Clone)]
pub struct CashCardState {
    /// The store the cash cards are saved in.
    pub cash_card_store: SQLiteCashCardStore,
    /// The defaults and limits for listing cash cards.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for CashCardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cash_card_store: state.cash_card_store.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}
