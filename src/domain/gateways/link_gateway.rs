//! Gateway trait for link data held by the backend.

use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::domain::query::{ListQuery, PageResult};
use crate::error::AppError;
use async_trait::async_trait;

/// Backend interface for listing, creating and deleting links.
///
/// Every call is a suspension point: implementations perform exactly one
/// request and never retry on their own.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLinkGateway`] - REST implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkGateway: Send + Sync {
    /// Fetches one page of records matching the query's search term.
    ///
    /// # Returns
    ///
    /// An empty page with `total_pages = 0` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fetch`] on network or HTTP failure.
    async fn list_page(&self, query: ListQuery) -> Result<PageResult, AppError>;

    /// Fetches the full, unpaginated record set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Fetch`] on network or HTTP failure.
    async fn list_all(&self) -> Result<Vec<LinkRecord>, AppError>;

    /// Creates a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on a malformed URL or duplicate alias.
    /// Returns [`AppError::Fetch`] on network or HTTP failure.
    async fn create(&self, new_link: NewLinkRecord) -> Result<LinkRecord, AppError>;

    /// Deletes a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id is absent.
    /// Returns [`AppError::Fetch`] on network or HTTP failure.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}
