//! This modules defines the common functionality for paging data.

use serde::Deserialize;

use crate::{
    Error,
    cash_card::{PageRequest, SortOrder},
};

/// The config for pagination
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationConfig {
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a client may ask for. Larger sizes are clamped to this value.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 2000,
        }
    }
}

/// The raw paging query parameters, e.g. `?page=0&size=1&sort=amount,asc`.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// The zero-based page number.
    pub page: Option<u64>,
    /// The number of items per page.
    pub size: Option<u64>,
    /// The sort as `field` or `field,direction`.
    pub sort: Option<String>,
}

impl PageQuery {
    /// Fill in defaults from `config` and parse the sort parameter.
    ///
    /// A missing or zero `size` uses the default page size and sizes over the
    /// maximum are clamped. A missing `sort` sorts by ascending amount.
    ///
    /// # Errors
    /// Returns [Error::InvalidSort] if `sort` names an unknown field or direction.
    pub fn resolve(self, config: &PaginationConfig) -> Result<PageRequest, Error> {
        let size = match self.size {
            None | Some(0) => config.default_page_size,
            Some(size) => size.min(config.max_page_size),
        };

        let sort = match self.sort.as_deref() {
            None => SortOrder::default(),
            Some(sort) => sort.parse()?,
        };

        Ok(PageRequest {
            page: self.page.unwrap_or(0),
            size,
            sort,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        cash_card::{PageRequest, SortDirection, SortField, SortOrder},
        pagination::{PageQuery, PaginationConfig},
    };

    fn parse(query: &str) -> Result<PageRequest, Error> {
        let query: PageQuery = serde_urlencoded::from_str(query).unwrap();

        query.resolve(&PaginationConfig::default())
    }

    #[test]
    fn empty_query_uses_defaults() {
        let want = PageRequest {
            page: 0,
            size: 20,
            sort: SortOrder {
                field: SortField::Amount,
                direction: SortDirection::Ascending,
            },
        };

        assert_eq!(parse(""), Ok(want));
    }

    #[test]
    fn parses_page_size_and_sort() {
        let want = PageRequest {
            page: 3,
            size: 1,
            sort: SortOrder {
                field: SortField::Id,
                direction: SortDirection::Descending,
            },
        };

        assert_eq!(parse("page=3&size=1&sort=id,desc"), Ok(want));
    }

    #[test]
    fn zero_size_uses_default() {
        assert_eq!(parse("size=0").unwrap().size, 20);
    }

    #[test]
    fn large_size_is_clamped() {
        assert_eq!(parse("size=100000").unwrap().size, 2000);
    }

    #[test]
    fn unknown_sort_field_is_rejected() {
        assert_eq!(
            parse("sort=colour,asc"),
            Err(Error::InvalidSort("colour,asc".to_owned()))
        );
    }

    #[test]
    fn uses_custom_config() {
        let config = PaginationConfig {
            default_page_size: 5,
            max_page_size: 10,
        };

        let got = PageQuery::default().resolve(&config).unwrap();
        assert_eq!(got.size, 5);

        let got = PageQuery {
            size: Some(50),
            ..Default::default()
        }
        .resolve(&config)
        .unwrap();
        assert_eq!(got.size, 10);
    }
}
