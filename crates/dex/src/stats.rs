//! Level 100 stat ranges.
//!
//! Minimums assume no individual value, no effort and a hindering nature;
//! maximums assume 31 IVs, 252 EVs and a helpful nature. Natures don't apply
//! to HP.

use serde::Serialize;

const LEVEL: u32 = 100;
const MAX_IV: u32 = 31;
const MAX_EV: u32 = 252;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatKind {
    Hp,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl StatKind {
    pub const ALL: [StatKind; 6] =
        [Self::Hp, Self::Attack, Self::Defense, Self::SpecialAttack, Self::SpecialDefense, Self::Speed];

    /// The name the API uses for this stat.
    pub fn key(self) -> &'static str {
        match self {
            Self::Hp => "hp",
            Self::Attack => "attack",
            Self::Defense => "defense",
            Self::SpecialAttack => "special-attack",
            Self::SpecialDefense => "special-defense",
            Self::Speed => "speed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Hp => "HP",
            Self::Attack => "Attack",
            Self::Defense => "Defense",
            Self::SpecialAttack => "Sp. Atk",
            Self::SpecialDefense => "Sp. Def",
            Self::Speed => "Speed",
        }
    }

    pub fn range(self, base: u32) -> StatRange {
        let (min, max) = match self {
            Self::Hp => (hp(base, 0, 0), hp(base, MAX_IV, MAX_EV)),
            _ => (hindered(raw(base, 0, 0)), helped(raw(base, MAX_IV, MAX_EV))),
        };
        StatRange { kind: self, base, min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatRange {
    pub kind: StatKind,
    pub base: u32,
    pub min: u32,
    pub max: u32,
}

fn hp(base: u32, iv: u32, ev: u32) -> u32 {
    ((2 * base + iv + ev / 4) * LEVEL) / 100 + LEVEL + 10
}

fn raw(base: u32, iv: u32, ev: u32) -> u32 {
    ((2 * base + iv + ev / 4) * LEVEL) / 100 + 5
}

fn hindered(value: u32) -> u32 {
    value * 9 / 10
}

fn helped(value: u32) -> u32 {
    value * 11 / 10
}
