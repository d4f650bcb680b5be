//! This modules defines the envelopes for lists and pages of data.

use serde::{Deserialize, Serialize};

use crate::Error;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 0,
            default_page_size: 20,
        }
    }
}

/// The raw `page` and `size` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// The zero-based page index.
    pub page: Option<u64>,
    /// The number of items per page.
    pub size: Option<u64>,
}

/// A validated request for one page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The zero-based page index.
    pub page: u64,
    /// The number of items per page, always greater than zero.
    pub size: u64,
}

impl PageRequest {
    /// Create a page request.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if `size` is zero.
    pub fn new(page: u64, size: u64) -> Result<Self, Error> {
        if size == 0 {
            return Err(Error::Validation(vec![
                "size must be greater than zero".to_owned(),
            ]));
        }

        Ok(Self { page, size })
    }

    /// Fill in missing query parameters from `config`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Validation] if the resulting page size is zero.
    pub fn from_query(query: PageQuery, config: &PaginationConfig) -> Result<Self, Error> {
        Self::new(
            query.page.unwrap_or(config.default_page),
            query.size.unwrap_or(config.default_page_size),
        )
    }

    /// The number of items that come before this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

/// One page of items plus the metadata needed to navigate to its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The zero-based page index.
    pub page: u64,
    /// The requested number of items per page.
    pub size: u64,
    /// The number of items across all pages.
    pub total_elements: u64,
    /// The number of pages needed to hold `total_elements` items.
    pub total_pages: u64,
    /// A link to the next page, if there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    /// A link to the previous page, if there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page: Option<String>,
}

impl<T> Page<T> {
    /// Wrap `items` for `request`, building navigation links from `base_path`.
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: u64, base_path: &str) -> Self {
        let total_pages = total_elements.div_ceil(request.size);
        let link = |page: u64| format!("{base_path}?page={page}&size={}", request.size);

        let next_page = request
            .page
            .checked_add(1)
            .filter(|next| *next < total_pages)
            .map(link);
        let previous_page = request.page.checked_sub(1).map(link);

        Self {
            items,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            next_page,
            previous_page,
        }
    }
}

/// A complete, unpaginated list of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemList<T> {
    /// The length of `items`.
    pub number_of_items: usize,
    /// Every item.
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            number_of_items: items.len(),
            items,
        }
    }
}
