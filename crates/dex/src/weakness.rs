use crate::error::ErrorKind;
use crate::models::TypeRef;
use crate::models::wire::TypeDetail;
use exn::ResultExt;
use futures::future::join_all;
use pokevault_client::{TransportHandle, fetch_json};
use std::collections::BTreeSet;

/// Every type that deals double damage to at least one of `types`.
///
/// Lookups run concurrently. A type whose lookup fails contributes nothing
/// rather than failing the caller, so the result may be smaller than the
/// truth but never contains anything false.
pub async fn resolve_weaknesses(transport: &TransportHandle, types: &[TypeRef]) -> BTreeSet<String> {
    let lookups = types.iter().map(|kind| async move {
        match fetch_json::<TypeDetail>(transport.as_ref(), &kind.detail_uri)
            .await
            .or_raise(|| ErrorKind::Type(kind.name.clone()))
        {
            Ok(detail) => {
                let from = detail.damage_relations.double_damage_from;
                from.into_iter().map(|weak| weak.name).collect::<Vec<_>>()
            },
            Err(e) => {
                tracing::warn!(kind = %kind.name, error = ?e, "type lookup failed; its weaknesses are omitted");
                Vec::new()
            },
        }
    });
    join_all(lookups).await.into_iter().flatten().collect()
}
