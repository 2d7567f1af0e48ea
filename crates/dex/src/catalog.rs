use crate::error::{ErrorKind, Result};
use crate::models::CatalogEntry;
use crate::models::wire::CatalogPage;
use exn::ResultExt;
use pokevault_client::{TransportHandle, Url, fetch_json};
use tracing::instrument;

/// The list URL for the first `limit` entities under `base`.
pub fn catalog_url(base: &Url, limit: u32) -> String {
    format!("{}/pokemon?limit={limit}", base.as_str().trim_end_matches('/'))
}

/// Fetch the catalog in a single round trip.
///
/// The page size is whatever `list_url` asks for; a `next` cursor in the
/// response is not followed. Any failure here is fatal to a refresh, so it is
/// returned rather than logged.
#[instrument(skip(transport))]
pub async fn fetch_catalog(transport: &TransportHandle, list_url: &str) -> Result<Vec<CatalogEntry>> {
    let page: CatalogPage = fetch_json(transport.as_ref(), list_url).await.or_raise(|| ErrorKind::Catalog)?;
    if page.next.is_some() {
        tracing::debug!("catalog has further pages which will not be fetched");
    }
    let entries: Vec<CatalogEntry> = page.results.into_iter().map(CatalogEntry::from).collect();
    tracing::info!(count = entries.len(), "fetched catalog");
    Ok(entries)
}
