//! Defines the cash card store trait and the paging types it is queried with.

use std::{fmt::Display, str::FromStr};

use crate::{
    Error,
    cash_card::{CashCard, CashCardId, NewCashCard},
    user::Username,
};

/// Handles the creation and retrieval of cash cards.
pub trait CashCardStore {
    /// Retrieve a cash card by its ID, regardless of who owns it.
    fn get_by_id(&self, id: CashCardId) -> Result<CashCard, Error>;

    /// Retrieve a cash card by its ID if and only if it belongs to `owner`.
    ///
    /// Implementers must return [Error::NotFound] both when the card does not
    /// exist and when it belongs to someone else.
    fn get_by_id_and_owner(&self, id: CashCardId, owner: &Username) -> Result<CashCard, Error>;

    /// Retrieve one page of all cash cards.
    fn list_page(&self, page: &PageRequest) -> Result<Vec<CashCard>, Error>;

    /// Retrieve one page of the cash cards that belong to `owner`.
    fn list_page_by_owner(
        &self,
        owner: &Username,
        page: &PageRequest,
    ) -> Result<Vec<CashCard>, Error>;

    /// Save a new cash card. The store assigns the ID.
    fn insert(&mut self, cash_card: NewCashCard) -> Result<CashCard, Error>;
}

/// Which page of cash cards to fetch and in what order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    /// The zero-based page number.
    pub page: u64,
    /// The maximum number of cash cards on a page.
    pub size: u64,
    /// The order the cash cards are sorted in before paging.
    pub sort: SortOrder,
}

impl PageRequest {
    /// The number of rows to return, for SQL `LIMIT`.
    pub fn limit(&self) -> i64 {
        i64::try_from(self.size).unwrap_or(i64::MAX)
    }

    /// The number of rows to skip, for SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        i64::try_from(self.page.saturating_mul(self.size)).unwrap_or(i64::MAX)
    }
}

/// The field and direction to sort cash cards by.
///
/// Parsed from strings like `amount`, `amount,asc` or `id,desc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    /// The field to sort by.
    pub field: SortField,
    /// Which way to sort.
    pub direction: SortDirection,
}

impl Default for SortOrder {
    /// Ascending by amount.
    fn default() -> Self {
        Self {
            field: SortField::Amount,
            direction: SortDirection::Ascending,
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid_sort = || Error::InvalidSort(s.to_owned());
        let mut parts = s.split(',').map(str::trim);

        let field = match parts.next() {
            Some("id") => SortField::Id,
            Some("amount") => SortField::Amount,
            Some("owner") => SortField::Owner,
            _ => return Err(invalid_sort()),
        };

        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => SortDirection::Ascending,
            Some("desc") => SortDirection::Descending,
            Some(_) => return Err(invalid_sort()),
        };

        if parts.next().is_some() {
            return Err(invalid_sort());
        }

        Ok(Self { field, direction })
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.field.column(), self.direction.keyword())
    }
}

/// The cash card fields that can be sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Sort by ID.
    Id,
    /// Sort by amount.
    Amount,
    /// Sort by owner username.
    Owner,
}

impl SortField {
    /// The name of the column in the cash card table.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Amount => "amount",
            SortField::Owner => "owner",
        }
    }
}

/// The order to sort cash cards in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

impl SortDirection {
    /// The query string spelling of the direction, which is also the SQL keyword.
    pub fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        cash_card::{PageRequest, SortDirection, SortField, SortOrder},
    };

    #[test]
    fn parses_field_without_direction_as_ascending() {
        assert_eq!(
            "owner".parse(),
            Ok(SortOrder {
                field: SortField::Owner,
                direction: SortDirection::Ascending,
            })
        );
    }

    #[test]
    fn direction_is_case_insensitive() {
        assert_eq!(
            "amount,DESC".parse(),
            Ok(SortOrder {
                field: SortField::Amount,
                direction: SortDirection::Descending,
            })
        );
    }

    #[test]
    fn rejects_unknown_direction() {
        assert_eq!(
            "amount,sideways".parse::<SortOrder>(),
            Err(Error::InvalidSort("amount,sideways".to_owned()))
        );
    }

    #[test]
    fn rejects_trailing_parts() {
        assert!("amount,asc,id".parse::<SortOrder>().is_err());
        assert!("".parse::<SortOrder>().is_err());
    }

    #[test]
    fn displays_as_query_value() {
        assert_eq!(SortOrder::default().to_string(), "amount,asc");
    }

    #[test]
    fn offset_is_page_times_size() {
        let page = PageRequest {
            page: 2,
            size: 5,
            sort: SortOrder::default(),
        };

        assert_eq!(page.limit(), 5);
        assert_eq!(page.offset(), 10);
    }

    #[test]
    fn huge_offset_saturates() {
        let page = PageRequest {
            page: u64::MAX,
            size: 2,
            sort: SortOrder::default(),
        };

        assert_eq!(page.offset(), i64::MAX);
    }
}
