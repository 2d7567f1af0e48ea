//! Evolution chain resolution.
//!
//! A chain is fetched once per entity, flattened in pre-order, then each
//! stage is looked up concurrently for its Pokédex number and artwork.
//!
//! Stages are looked up by species id where the chain provides one: the
//! default form is served under that id even when its name differs from the
//! species name (`toxtricity` is `toxtricity-amped`).

use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::models::wire::{EvolutionChain, PokemonArtwork};
use crate::models::{EvolutionLink, EvolutionNode, EvolutionStage};
use exn::ResultExt;
use futures::future::join_all;
use pokevault_client::{TransportHandle, fetch_json};
use tracing::instrument;

/// Flatten `root` in pre-order: a node, then each child subtree in
/// declaration order. Every node appears exactly once; names are not
/// deduplicated.
pub fn extract_chain(root: &EvolutionNode) -> Vec<EvolutionLink> {
    let mut links = vec![EvolutionLink {
        name: root.species_name.clone(),
        species_id: root.species_id,
        min_level: root.min_level,
    }];
    for child in &root.children {
        links.extend(extract_chain(child));
    }
    links
}

/// Look up every link concurrently.
///
/// A link whose lookup fails is logged and dropped; the rest keep the order
/// of `links` regardless of which request finished first.
pub async fn resolve_artworks(
    transport: &TransportHandle,
    ctx: &Context,
    links: Vec<EvolutionLink>,
) -> Vec<EvolutionStage> {
    let lookups = links.into_iter().map(|link| async move {
        let url = match link.species_id {
            Some(id) => ctx.pokemon_url(&format!("{id}/")),
            None => ctx.pokemon_url(&link.name),
        };
        match fetch_json::<PokemonArtwork>(transport.as_ref(), &url)
            .await
            .or_raise(|| ErrorKind::Artwork(link.name.clone()))
        {
            Ok(pokemon) => Some(EvolutionStage {
                pokedex_number: pokemon.id,
                artwork_url: pokemon.sprites.artwork(),
                name: link.name,
                min_level: link.min_level,
            }),
            Err(e) => {
                tracing::warn!(stage = %link.name, error = ?e, "dropping evolution stage");
                None
            },
        }
    });
    join_all(lookups).await.into_iter().flatten().collect()
}

/// Fetch the chain document at `chain_url` and resolve every stage in it.
///
/// Only the chain document itself is essential; failing to fetch it fails
/// the owning entity.
#[instrument(skip(transport, ctx))]
pub async fn resolve_chain(transport: &TransportHandle, ctx: &Context, chain_url: &str) -> Result<Vec<EvolutionStage>> {
    let chain: EvolutionChain = fetch_json(transport.as_ref(), chain_url).await.or_raise(|| ErrorKind::Evolution)?;
    let root = EvolutionNode::from(chain.chain);
    Ok(resolve_artworks(transport, ctx, extract_chain(&root)).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        API, artwork_url, chain_root, chain_step, chain_url, ctx, pokemon_url, route_chain, route_pokemon,
    };
    use pokevault_client::{MockResponse, MockTransport};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn names(links: &[EvolutionLink]) -> Vec<(&str, Option<u32>)> {
        links.iter().map(|link| (link.name.as_str(), link.min_level)).collect()
    }

    #[test]
    fn test_extract_single_node() {
        let root = EvolutionNode::new("tauros", None);
        assert_eq!(names(&extract_chain(&root)), [("tauros", None)]);
    }

    #[test]
    fn test_extract_branching() {
        let root = EvolutionNode::new("a", None)
            .with_child(EvolutionNode::new("b", Some(16)))
            .with_child(EvolutionNode::new("c", Some(34)));
        assert_eq!(names(&extract_chain(&root)), [("a", None), ("b", Some(16)), ("c", Some(34))]);
    }

    #[test]
    fn test_extract_is_pre_order() {
        let root = EvolutionNode::new("a", None)
            .with_child(EvolutionNode::new("b", Some(1)).with_child(EvolutionNode::new("d", Some(2))))
            .with_child(EvolutionNode::new("c", Some(3)));
        assert_eq!(names(&extract_chain(&root)), [("a", None), ("b", Some(1)), ("d", Some(2)), ("c", Some(3))]);
    }

    #[test]
    fn test_extract_keeps_duplicates() {
        let root = EvolutionNode::new("a", None)
            .with_child(EvolutionNode::new("b", Some(1)))
            .with_child(EvolutionNode::new("b", Some(2)));
        assert_eq!(extract_chain(&root).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_artworks_keeps_chain_order() {
        let mock = Arc::new(MockTransport::default().with_latency(Duration::from_millis(10)));
        route_pokemon(&mock, 1, "bulbasaur", &["grass"]);
        route_pokemon(&mock, 2, "ivysaur", &["grass"]);
        route_pokemon(&mock, 3, "venusaur", &["grass"]);
        let transport: TransportHandle = mock.clone();

        let links = vec![
            EvolutionLink::new("bulbasaur", None),
            EvolutionLink::new("ivysaur", Some(16)),
            EvolutionLink::new("venusaur", Some(32)),
        ];
        let stages = resolve_artworks(&transport, &ctx(), links).await;

        let expected = vec![
            EvolutionStage {
                pokedex_number: 1,
                name: "bulbasaur".to_string(),
                artwork_url: Some(artwork_url(1)),
                min_level: None,
            },
            EvolutionStage {
                pokedex_number: 2,
                name: "ivysaur".to_string(),
                artwork_url: Some(artwork_url(2)),
                min_level: Some(16),
            },
            EvolutionStage {
                pokedex_number: 3,
                name: "venusaur".to_string(),
                artwork_url: Some(artwork_url(3)),
                min_level: Some(32),
            },
        ];
        assert_eq!(stages, expected);
        assert_eq!(mock.peak_in_flight(), 3);
    }

    #[tokio::test]
    async fn test_resolve_artworks_drops_failed_stage() {
        let mock = Arc::new(MockTransport::default());
        route_pokemon(&mock, 1, "a", &[]);
        mock.route(pokemon_url("b"), MockResponse::Status(500));
        route_pokemon(&mock, 3, "c", &[]);
        let transport: TransportHandle = mock;

        let links = vec![
            EvolutionLink::new("a", None),
            EvolutionLink::new("b", Some(16)),
            EvolutionLink::new("c", Some(34)),
        ];
        let stages = resolve_artworks(&transport, &ctx(), links).await;

        let got: Vec<_> = stages.iter().map(|stage| (stage.pokedex_number, stage.name.as_str())).collect();
        assert_eq!(got, [(1, "a"), (3, "c")]);
    }

    #[tokio::test]
    async fn test_resolve_chain() {
        let mock = Arc::new(MockTransport::default());
        route_chain(&mock, 1, chain_root("a", vec![chain_step("b", 16, vec![]), chain_step("c", 34, vec![])]));
        route_pokemon(&mock, 10, "a", &[]);
        route_pokemon(&mock, 11, "b", &[]);
        route_pokemon(&mock, 12, "c", &[]);
        let transport: TransportHandle = mock;

        let stages = resolve_chain(&transport, &ctx(), &chain_url(1)).await.unwrap();

        let got: Vec<_> = stages
            .iter()
            .map(|stage| (stage.name.as_str(), stage.pokedex_number, stage.min_level))
            .collect();
        assert_eq!(got, [("a", 10, None), ("b", 11, Some(16)), ("c", 12, Some(34))]);
    }

    #[test]
    fn test_extract_carries_species_id() {
        let root = EvolutionNode::new("toxel", None)
            .with_species_id(848)
            .with_child(EvolutionNode::new("toxtricity", Some(30)).with_species_id(849));
        let links = extract_chain(&root);
        assert_eq!(links[0], EvolutionLink::new("toxel", None).with_species_id(848));
        assert_eq!(links[1], EvolutionLink::new("toxtricity", Some(30)).with_species_id(849));
    }

    #[tokio::test]
    async fn test_resolve_chain_looks_stages_up_by_species_id() {
        let mock = Arc::new(MockTransport::default());
        let species = |name: &str, id: u32| json!({"name": name, "url": format!("{API}pokemon-species/{id}/")});
        route_chain(
            &mock,
            447,
            json!({
                "species": species("toxel", 848),
                "evolution_details": [],
                "evolves_to": [{
                    "species": species("toxtricity", 849),
                    "evolution_details": [{"min_level": 30, "trigger": {"name": "level-up"}}],
                    "evolves_to": []
                }]
            }),
        );
        // The default toxtricity form is named toxtricity-amped; only the id route exists.
        for id in [848, 849] {
            mock.route_json(
                format!("{API}pokemon/{id}/"),
                &json!({"id": id, "sprites": {"other": {"official-artwork": {"front_default": artwork_url(id)}}}}),
            );
        }
        let transport: TransportHandle = mock.clone();

        let stages = resolve_chain(&transport, &ctx(), &chain_url(447)).await.unwrap();

        let got: Vec<_> = stages
            .iter()
            .map(|stage| (stage.name.as_str(), stage.pokedex_number, stage.artwork_url.clone()))
            .collect();
        assert_eq!(got, [("toxel", 848, Some(artwork_url(848))), ("toxtricity", 849, Some(artwork_url(849)))]);
        assert_eq!(mock.hits(&pokemon_url("toxtricity")), 0);
    }

    #[tokio::test]
    async fn test_resolve_chain_document_failure_is_an_error() {
        let mock = Arc::new(MockTransport::default());
        mock.route(chain_url(1), MockResponse::Unreachable);
        let transport: TransportHandle = mock;

        let err = resolve_chain(&transport, &ctx(), &chain_url(1)).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Evolution);
    }
}
