use super::evolution::EvolutionStage;
use super::wire;
use crate::stats::{StatKind, StatRange};
use crate::text::sentence_case;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One row of the catalog: a name and the URL of its full detail document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub reference: String,
}

impl From<wire::NamedResource> for CatalogEntry {
    fn from(resource: wire::NamedResource) -> Self {
        Self { name: resource.name, reference: resource.url }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub detail_uri: String,
}

impl From<wire::TypeSlot> for TypeRef {
    fn from(slot: wire::TypeSlot) -> Self {
        Self { name: slot.kind.name, detail_uri: slot.kind.url }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base: u32,
    pub effort: u32,
}

impl From<wire::StatSlot> for Stat {
    fn from(slot: wire::StatSlot) -> Self {
        Self { name: slot.stat.name, base: slot.base_stat, effort: slot.effort }
    }
}

/// Image URLs worth keeping. Either may be absent for alternate forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub artwork: Option<String>,
    pub showdown: Option<String>,
}

impl From<&wire::Sprites> for Sprites {
    fn from(sprites: &wire::Sprites) -> Self {
        Self { artwork: sprites.artwork(), showdown: sprites.showdown() }
    }
}

/// Species metadata merged into a [`CompositeDetail`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesInfo {
    pub name: String,
    pub capture_rate: u32,
    pub growth_rate: String,
    pub color: String,
    /// Already cleaned with [`clean_flavor_text`](crate::text::clean_flavor_text).
    pub flavor_text: String,
    pub genus: String,
}

/// Everything known about one entity after aggregation.
///
/// Built once by [`resolve_entry`](crate::aggregate::resolve_entry) and never
/// mutated afterwards. `weaknesses` is a set, so its iteration order is
/// alphabetical rather than the order the type lookups finished in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeDetail {
    pub id: u32,
    pub name: String,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
    pub types: Vec<TypeRef>,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub species: SpeciesInfo,
    pub sprites: Sprites,
    pub weaknesses: BTreeSet<String>,
    pub evolution_stages: Vec<EvolutionStage>,
}

impl CompositeDetail {
    pub(crate) fn assemble(
        pokemon: wire::Pokemon,
        species: SpeciesInfo,
        types: Vec<TypeRef>,
        weaknesses: BTreeSet<String>,
        evolution_stages: Vec<EvolutionStage>,
    ) -> Self {
        Self {
            id: pokemon.id,
            sprites: Sprites::from(&pokemon.sprites),
            name: pokemon.name,
            abilities: pokemon.abilities.into_iter().map(|slot| slot.ability.name).collect(),
            stats: pokemon.stats.into_iter().map(Stat::from).collect(),
            types,
            height: pokemon.height,
            weight: pokemon.weight,
            base_experience: pokemon.base_experience,
            species,
            weaknesses,
            evolution_stages,
        }
    }

    /// The species color, used by presentation layers as a theme.
    pub fn theme_color(&self) -> &str {
        &self.species.color
    }

    /// Flavor text in sentence case, ready for display.
    pub fn description(&self) -> String {
        sentence_case(&self.species.flavor_text)
    }

    /// Growth rate label for display, e.g. `medium-slow` as `Medium slow`.
    pub fn growth_rate_label(&self) -> String {
        sentence_case(&self.species.growth_rate.replace('-', " "))
    }

    /// Level 100 ranges for every stat the entity carries, in canonical order.
    pub fn stat_ranges(&self) -> Vec<StatRange> {
        StatKind::ALL
            .iter()
            .filter_map(|kind| {
                let stat = self.stats.iter().find(|stat| stat.name == kind.key())?;
                Some(kind.range(stat.base))
            })
            .collect()
    }
}
