//! Domain records and the wire documents they are built from.

mod detail;
mod evolution;
pub mod wire;

pub use self::detail::{CatalogEntry, CompositeDetail, SpeciesInfo, Sprites, Stat, TypeRef};
pub use self::evolution::{EvolutionLink, EvolutionNode, EvolutionStage};
