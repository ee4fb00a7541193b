//! Cash cards: the data model, the store that persists them and the route
//! handlers that expose them over HTTP.

mod core;
mod create_endpoint;
mod get_endpoint;
mod list_endpoint;
mod sqlite;
mod state;
mod store;

pub use self::core::{CashCard, CashCardId, NewCashCard, create_cash_card_table};
pub use create_endpoint::create_cash_card_endpoint;
pub use get_endpoint::get_cash_card_endpoint;
pub use list_endpoint::list_cash_cards_endpoint;
pub use sqlite::SQLiteCashCardStore;
pub use state::CashCardState;
pub use store::{CashCardStore, PageRequest, SortDirection, SortField, SortOrder};
