//! Response documents as the remote API sends them.
//!
//! Only the fields the pipeline reads are declared; serde ignores the rest.
//! Collections default to empty so that a sparse document still decodes.

use serde::Deserialize;

/// A `{ name, url }` pair, the API's universal cross-reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// The numeric id ending `url`, if it has one (`.../pokemon-species/849/`).
    pub fn trailing_id(&self) -> Option<u32> {
        self.url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Name {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    pub url: String,
}

/// One page of the entity list. `next` is the pagination cursor.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    pub species: NamedResource,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
}

/// The subset of [`Pokemon`] an evolution stage needs.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonArtwork {
    pub id: u32,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbilitySlot {
    pub ability: Name,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

impl Sprites {
    pub fn artwork(&self) -> Option<String> {
        self.other.as_ref()?.official_artwork.as_ref()?.front_default.clone()
    }

    pub fn showdown(&self) -> Option<String> {
        self.other.as_ref()?.showdown.as_ref()?.front_default.clone()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<FrontSprite>,
    #[serde(default)]
    pub showdown: Option<FrontSprite>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrontSprite {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: Name,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Species {
    pub capture_rate: u32,
    pub growth_rate: Name,
    pub color: Name,
    pub evolution_chain: Link,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub genera: Vec<Genus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    #[serde(default)]
    pub language: Option<Name>,
    #[serde(default)]
    pub version: Option<Name>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: Name,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionChain {
    pub chain: ChainLink,
}

/// A node of the evolution tree. `evolves_to` nests to arbitrary depth.
#[derive(Debug, Clone, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub min_level: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeDetail {
    pub damage_relations: DamageRelations,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DamageRelations {
    #[serde(default)]
    pub double_damage_from: Vec<NamedResource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pokemon_decodes_sprites_and_ignores_unknown_fields() {
        let pokemon: Pokemon = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "bulbasaur",
            "order": 1,
            "abilities": [{"ability": {"name": "overgrow", "url": "x"}, "is_hidden": false}],
            "species": {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/"},
            "sprites": {"front_default": "ignored", "other": {
                "official-artwork": {"front_default": "https://img.test/1.png"},
                "showdown": {"front_default": null}
            }},
            "stats": [{"base_stat": 45, "effort": 0, "stat": {"name": "hp"}}],
            "types": [{"slot": 1, "type": {"name": "grass", "url": "https://pokeapi.co/api/v2/type/12/"}}],
            "weight": 69,
            "height": 7,
            "base_experience": 64
        }))
        .unwrap();

        assert_eq!(pokemon.sprites.artwork().as_deref(), Some("https://img.test/1.png"));
        assert_eq!(pokemon.sprites.showdown(), None);
        assert_eq!(pokemon.abilities[0].ability.name, "overgrow");
        assert_eq!(pokemon.types[0].kind.name, "grass");
        assert_eq!(pokemon.base_experience, Some(64));
    }

    #[test]
    fn test_pokemon_without_artwork_decodes() {
        let pokemon: PokemonArtwork = serde_json::from_value(serde_json::json!({
            "id": 10001,
            "sprites": {"other": null}
        }))
        .unwrap();
        assert_eq!(pokemon.sprites.artwork(), None);
    }

    #[test]
    fn test_chain_link_nests() {
        let chain: EvolutionChain = serde_json::from_value(serde_json::json!({
            "chain": {
                "species": {"name": "a", "url": "u"},
                "evolution_details": [],
                "evolves_to": [{
                    "species": {"name": "b", "url": "u"},
                    "evolution_details": [{"min_level": 16, "trigger": {"name": "level-up"}}],
                    "evolves_to": []
                }]
            }
        }))
        .unwrap();
        assert_eq!(chain.chain.evolves_to[0].species.name, "b");
        assert_eq!(chain.chain.evolves_to[0].evolution_details[0].min_level, Some(16));
    }
}
