use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::evolution::resolve_chain;
use crate::models::wire::{Pokemon, Species};
use crate::models::{CatalogEntry, CompositeDetail, SpeciesInfo, TypeRef};
use crate::text::clean_flavor_text;
use crate::weakness::resolve_weaknesses;
use exn::ResultExt;
use pokevault_client::{TransportHandle, fetch_json};
use tracing::instrument;

/// Resolve one catalog entry into a [`CompositeDetail`].
///
/// The base detail and species metadata are fetched one after the other
/// (the species URL comes from the detail); the evolution chain and the
/// weakness set are then resolved concurrently. Failing to fetch the detail,
/// the species or the chain document fails the whole entry. Weakness and
/// evolution stage lookups only degrade it.
#[instrument(skip_all, fields(name = %entry.name))]
pub async fn resolve_entry(
    transport: &TransportHandle,
    ctx: &Context,
    entry: &CatalogEntry,
) -> Result<CompositeDetail> {
    let pokemon: Pokemon = fetch_json(transport.as_ref(), &entry.reference).await.or_raise(|| ErrorKind::Detail)?;
    let species: Species = fetch_json(transport.as_ref(), &pokemon.species.url).await.or_raise(|| ErrorKind::Species)?;
    let info = species_info(&pokemon.species.name, &species, ctx.language());

    let types: Vec<TypeRef> = pokemon.types.iter().cloned().map(TypeRef::from).collect();
    let (stages, weaknesses) = futures::join!(
        resolve_chain(transport, ctx, &species.evolution_chain.url),
        resolve_weaknesses(transport, &types)
    );
    let stages = stages?;

    tracing::debug!(stages = stages.len(), weaknesses = weaknesses.len(), "resolved entry");
    Ok(CompositeDetail::assemble(pokemon, info, types, weaknesses, stages))
}

/// Pick flavor text and genus in `language`, falling back to whichever entry
/// the API lists first.
fn species_info(name: &str, species: &Species, language: &str) -> SpeciesInfo {
    let flavor_text = species
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.as_ref().is_some_and(|lang| lang.name == language))
        .or_else(|| species.flavor_text_entries.first())
        .map(|entry| clean_flavor_text(&entry.flavor_text))
        .unwrap_or_default();
    let genus = species
        .genera
        .iter()
        .find(|genus| genus.language.name == language)
        .or_else(|| species.genera.first())
        .map(|genus| genus.genus.clone())
        .unwrap_or_default();
    SpeciesInfo {
        name: name.to_string(),
        capture_rate: species.capture_rate,
        growth_rate: species.growth_rate.name.clone(),
        color: species.color.name.clone(),
        flavor_text,
        genus,
    }
}
