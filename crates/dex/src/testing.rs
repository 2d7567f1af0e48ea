//! Canned API documents for unit tests.

use crate::Context;
use crate::models::{CatalogEntry, CompositeDetail, SpeciesInfo, Sprites};
use pokevault_client::{MockTransport, Url};
use serde_json::{Value, json};
use std::collections::BTreeSet;

pub(crate) const API: &str = "https://pokeapi.test/api/v2/";

pub(crate) fn ctx() -> Context {
    Context::new(Url::parse(API).unwrap())
}

pub(crate) fn pokemon_url(name: &str) -> String {
    format!("{API}pokemon/{name}")
}

pub(crate) fn species_url(id: u32) -> String {
    format!("{API}pokemon-species/{id}/")
}

pub(crate) fn type_url(name: &str) -> String {
    format!("{API}type/{name}/")
}

pub(crate) fn chain_url(id: u32) -> String {
    format!("{API}evolution-chain/{id}/")
}

pub(crate) fn artwork_url(id: u32) -> String {
    format!("https://img.test/artwork/{id}.png")
}

pub(crate) fn entry(name: &str) -> CatalogEntry {
    CatalogEntry { name: name.to_string(), reference: pokemon_url(name) }
}

/// Route `pokemon/<name>` to a detail document whose species is `species/<id>`.
pub(crate) fn route_pokemon(mock: &MockTransport, id: u32, name: &str, types: &[&str]) {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(slot, kind)| json!({"slot": slot + 1, "type": {"name": kind, "url": type_url(kind)}}))
        .collect();
    mock.route_json(
        pokemon_url(name),
        &json!({
            "id": id,
            "name": name,
            "abilities": [{"ability": {"name": "overgrow", "url": format!("{API}ability/65/")}}],
            "species": {"name": name, "url": species_url(id)},
            "sprites": {"other": {
                "official-artwork": {"front_default": artwork_url(id)},
                "showdown": {"front_default": format!("https://img.test/showdown/{id}.gif")}
            }},
            "stats": [
                {"base_stat": 45, "effort": 0, "stat": {"name": "hp"}},
                {"base_stat": 49, "effort": 0, "stat": {"name": "attack"}},
                {"base_stat": 45, "effort": 1, "stat": {"name": "speed"}}
            ],
            "types": types,
            "weight": 69,
            "height": 7,
            "base_experience": 64
        }),
    );
}

pub(crate) fn route_species(mock: &MockTransport, id: u32, chain: u32) {
    mock.route_json(
        species_url(id),
        &json!({
            "capture_rate": 45,
            "growth_rate": {"name": "medium-slow"},
            "color": {"name": "green"},
            "evolution_chain": {"url": chain_url(chain)},
            "flavor_text_entries": [
                {
                    "flavor_text": "Une étrange graine\na été plantée.",
                    "language": {"name": "fr"},
                    "version": {"name": "x"}
                },
                {
                    "flavor_text": "A strange seed was\nplanted on its\u{000C}back at birth.",
                    "language": {"name": "en"},
                    "version": {"name": "red"}
                }
            ],
            "genera": [
                {"genus": "Pokémon Graine", "language": {"name": "fr"}},
                {"genus": "Seed Pokémon", "language": {"name": "en"}}
            ]
        }),
    );
}

pub(crate) fn route_type(mock: &MockTransport, name: &str, weak_to: &[&str]) {
    let from: Vec<Value> = weak_to.iter().map(|kind| json!({"name": kind, "url": type_url(kind)})).collect();
    mock.route_json(type_url(name), &json!({"damage_relations": {"double_damage_from": from, "half_damage_from": []}}));
}

pub(crate) fn route_chain(mock: &MockTransport, id: u32, root: Value) {
    mock.route_json(chain_url(id), &json!({"id": id, "chain": root}));
}

/// A chain node nothing evolves into.
pub(crate) fn chain_root(name: &str, evolves_to: Vec<Value>) -> Value {
    json!({
        "species": {"name": name, "url": format!("{API}pokemon-species/{name}/")},
        "evolution_details": [],
        "evolves_to": evolves_to
    })
}

/// A chain node reached by levelling up to `min_level`.
pub(crate) fn chain_step(name: &str, min_level: u32, evolves_to: Vec<Value>) -> Value {
    json!({
        "species": {"name": name, "url": format!("{API}pokemon-species/{name}/")},
        "evolution_details": [{"min_level": min_level, "trigger": {"name": "level-up"}}],
        "evolves_to": evolves_to
    })
}

/// Route a complete single-entity world: detail, species, a one-node chain
/// and the entity's own artwork lookup.
pub(crate) fn route_standalone(mock: &MockTransport, id: u32, name: &str, types: &[&str]) {
    route_pokemon(mock, id, name, types);
    route_species(mock, id, id);
    route_chain(mock, id, chain_root(name, vec![]));
}

pub(crate) fn composite(id: u32, name: &str) -> CompositeDetail {
    CompositeDetail {
        id,
        name: name.to_string(),
        abilities: vec![],
        stats: vec![],
        types: vec![],
        height: 0,
        weight: 0,
        base_experience: None,
        species: SpeciesInfo {
            name: name.to_string(),
            capture_rate: 0,
            growth_rate: String::new(),
            color: String::new(),
            flavor_text: String::new(),
            genus: String::new(),
        },
        sprites: Sprites::default(),
        weaknesses: BTreeSet::new(),
        evolution_stages: vec![],
    }
}
