//! Pagination query parameter extractor and the paginated list response.

use axum::Json;
use axum::extract::{FromRequestParts, OriginalUri, Query};
use axum::http::request::Parts;
use axum::http::{HeaderName, HeaderValue};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use socialhub_core::error::AppError;
use socialhub_core::types::pagination::DEFAULT_PAGE_SIZE;
use socialhub_core::types::{Page, PageRequest};

/// Total number of items across all pages.
pub const COUNT_HEADER: &str = "count";
/// Link to the next page, absent on the last one.
pub const NEXT_HEADER: &str = "next";
/// Link to the previous page, absent on the first one.
pub const PREVIOUS_HEADER: &str = "previous";

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
    /// Items per page (default: 10, capped at 20).
    pub page_size: Option<u64>,
}

/// The requested page plus the URI it was requested on, for building links.
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Page to return.
    pub request: PageRequest,
    path: String,
    query: String,
}

impl<S: Send + Sync> FromRequestParts<S> for Pagination {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        if params.page == Some(0) || params.page_size == Some(0) {
            return Err(AppError::validation("page and page_size start at 1"));
        }

        let uri = match OriginalUri::from_request_parts(parts, state).await {
            Ok(OriginalUri(uri)) => uri,
            Err(never) => match never {},
        };

        Ok(Self {
            request: PageRequest::new(
                params.page.unwrap_or(1),
                params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            ),
            path: uri.path().to_string(),
            query: uri.query().unwrap_or_default().to_string(),
        })
    }
}

impl Pagination {
    /// Wraps one page of results into a response.
    pub fn respond<T: Serialize>(&self, page: Page<T>) -> Paginated<T> {
        let next = page.has_next().then(|| self.link(page.page + 1, page.page_size));
        let previous = page
            .has_previous()
            .then(|| self.link(page.page - 1, page.page_size));
        Paginated {
            total: page.total,
            next,
            previous,
            items: page.items,
        }
    }

    /// Same path and filters, different page.
    fn link(&self, page: u64, page_size: u64) -> String {
        let mut pairs: Vec<&str> = self
            .query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter(|pair| {
                let key = pair.split('=').next().unwrap_or_default();
                key != "page" && key != "page_size"
            })
            .collect();
        let paging = format!("page={page}&page_size={page_size}");
        pairs.push(&paging);
        format!("{}?{}", self.path, pairs.join("&"))
    }
}

/// A JSON array body with `count`, `next` and `previous` headers.
#[derive(Debug, Clone)]
pub struct Paginated<T> {
    items: Vec<T>,
    total: u64,
    next: Option<String>,
    previous: Option<String>,
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.items).into_response();
        let headers = response.headers_mut();
        headers.insert(HeaderName::from_static(COUNT_HEADER), HeaderValue::from(self.total));
        for (name, link) in [(NEXT_HEADER, self.next), (PREVIOUS_HEADER, self.previous)] {
            if let Some(value) = link.and_then(|l| HeaderValue::from_str(&l).ok()) {
                headers.insert(HeaderName::from_static(name), value);
            }
        }
        response
    }
}
