use super::wire;
use serde::{Deserialize, Serialize};

/// A node in an evolution tree.
///
/// The tree is owned top-down: every node owns its children and there are no
/// back references. `min_level` is `None` only on the root, which nothing
/// evolves into; a node reached by a trigger other than levelling up (trade,
/// item, friendship) carries `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    pub species_name: String,
    /// Id of the species, taken from its reference URL.
    pub species_id: Option<u32>,
    pub min_level: Option<u32>,
    pub children: Vec<EvolutionNode>,
}

impl EvolutionNode {
    pub fn new(species_name: impl Into<String>, min_level: Option<u32>) -> Self {
        Self { species_name: species_name.into(), species_id: None, min_level, children: Vec::new() }
    }

    pub fn with_species_id(mut self, species_id: u32) -> Self {
        self.species_id = Some(species_id);
        self
    }

    pub fn with_child(mut self, child: EvolutionNode) -> Self {
        self.children.push(child);
        self
    }
}

impl From<wire::ChainLink> for EvolutionNode {
    fn from(link: wire::ChainLink) -> Self {
        let min_level = link.evolution_details.first().map(|detail| detail.min_level.unwrap_or(0));
        Self {
            species_id: link.species.trailing_id(),
            species_name: link.species.name,
            min_level,
            children: link.evolves_to.into_iter().map(Self::from).collect(),
        }
    }
}

/// A flattened tree node: what [`extract_chain`](crate::evolution::extract_chain)
/// produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionLink {
    pub name: String,
    pub species_id: Option<u32>,
    pub min_level: Option<u32>,
}

impl EvolutionLink {
    pub fn new(name: impl Into<String>, min_level: Option<u32>) -> Self {
        Self { name: name.into(), species_id: None, min_level }
    }

    pub fn with_species_id(mut self, species_id: u32) -> Self {
        self.species_id = Some(species_id);
        self
    }
}

/// An evolution stage ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionStage {
    pub pokedex_number: u32,
    pub name: String,
    pub artwork_url: Option<String>,
    pub min_level: Option<u32>,
}
