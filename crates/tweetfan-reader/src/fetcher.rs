use std::future::Future;

use crate::error::FetchError;
use crate::types::RawPage;

/// Page source for exactly one account.
///
/// `fetch_page` is expected to request one more item than the first page did,
/// so the page may start with the item whose id equals `after_id`. Callers
/// exclude it.
pub trait RawFetcher: Send + Sync {
    /// Identifies the source in logs and errors (the screen name for HTTP).
    fn source_identifier(&self) -> &str;

    fn fetch_first_page(&self) -> impl Future<Output = Result<RawPage, FetchError>> + Send;

    fn fetch_page(
        &self,
        after_id: &str,
    ) -> impl Future<Output = Result<RawPage, FetchError>> + Send;
}
