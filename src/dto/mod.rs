//! JSON shapes returned by the HTTP API.

use serde::Serialize;

pub mod categories;
pub mod responses;

/// Envelope for list endpoints. `total` is the number of items on this page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListDto<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

impl<T> ListDto<T> {
    pub fn new<I, U>(items: I, skip: usize, limit: usize) -> Self
    where
        I: IntoIterator<Item = U>,
        T: From<U>,
    {
        let items: Vec<T> = items.into_iter().map(T::from).collect();
        Self {
            total: items.len(),
            items,
            skip,
            limit,
        }
    }
}
