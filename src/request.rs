use crate::core::models::common::Pagination as QueryPagination;
use crate::error::Error;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Pagination {
    /// No page size means the whole list.
    pub fn to_query(&self) -> Result<Option<QueryPagination>, Error> {
        match self.size {
            None => Ok(None),
            Some(size) => QueryPagination::page(self.page.unwrap_or(1), size)
                .map(Some)
                .ok_or_else(|| Error::BusinessError(format!("invalid page {} of size {}", self.page.unwrap_or(1), size))),
        }
    }
}

/// Query string of the list endpoints: an optional status filter plus paging.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub status: Option<bool>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl ListParams {
    pub fn pagination(&self) -> Result<Option<QueryPagination>, Error> {
        Pagination { page: self.page, size: self.size }.to_query()
    }
}
