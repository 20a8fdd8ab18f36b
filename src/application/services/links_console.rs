//! Links page: paginated table, search, create form and delete buttons.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::store::{ListStore, ListView};
use crate::domain::entities::{LinkRecord, NewLinkRecord};
use crate::domain::gateways::LinkGateway;
use crate::error::AppError;
use crate::utils::url_input::{short_url, validate_original_url};

const DELETE_FAILED: &str = "Failed to delete link.";

/// Per-page controller on top of the shared [`ListStore`].
///
/// Owns the form error of the links page. Fetch failures stay in the store;
/// [`Self::display_error`] merges the two for rendering.
pub struct LinksConsole<G: LinkGateway> {
    store: Arc<ListStore<G>>,
    base_url: String,
    form_error: Option<String>,
}

impl<G: LinkGateway> LinksConsole<G> {
    /// `base_url` is the backend origin used to build public short links.
    pub fn new(store: Arc<ListStore<G>>, base_url: impl Into<String>) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            form_error: None,
        }
    }

    /// Current page of the table.
    pub fn view(&self) -> ListView {
        self.store.snapshot().list
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Form error first, then the store's fetch error.
    pub fn display_error(&self) -> Option<String> {
        self.form_error
            .clone()
            .or_else(|| self.store.snapshot().error)
    }

    pub fn short_url(&self, record: &LinkRecord) -> String {
        short_url(&self.base_url, &record.short_code)
    }

    /// Validates and submits the create form, then shows the first page
    /// with no search so the new link is visible.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a non-http(s) URL without
    /// contacting the backend. Backend errors are passed through. In both
    /// cases the message becomes the form error.
    pub async fn create(
        &mut self,
        original_url: &str,
        custom_alias: Option<&str>,
    ) -> Result<LinkRecord, AppError> {
        self.form_error = None;

        let result = match validate_original_url(original_url) {
            Ok(url) => {
                self.store
                    .create_and_show(NewLinkRecord::new(url, custom_alias), 1, "")
                    .await
            }
            Err(e) => Err(e),
        };

        result.inspect_err(|e| {
            debug!(error = %e, "Create form rejected");
            self.form_error = Some(e.message().to_string());
        })
    }

    /// Deletes a link. The row disappears immediately and comes back if the
    /// backend refuses.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the form error is set to a fixed message.
    pub async fn delete(&mut self, id: &str) -> Result<(), AppError> {
        self.form_error = None;
        self.store.delete(id).await.inspect_err(|_| {
            self.form_error = Some(DELETE_FAILED.to_string());
        })
    }

    /// Searches from the first page.
    pub async fn search(&mut self, term: &str) -> bool {
        self.store.set_query(1, term).await
    }

    /// Advances one page. No-op on the last page.
    pub async fn next_page(&mut self) -> bool {
        let snapshot = self.store.snapshot();
        let page = snapshot.query.page;
        if page >= snapshot.list.total_pages {
            return false;
        }
        info!(page = page + 1, "Next page");
        self.store.set_page(page + 1).await
    }

    /// Goes back one page. No-op on the first page.
    pub async fn previous_page(&mut self) -> bool {
        let page = self.store.snapshot().query.page;
        if page <= 1 {
            return false;
        }
        info!(page = page - 1, "Previous page");
        self.store.set_page(page - 1).await
    }
}
