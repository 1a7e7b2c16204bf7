//! Special abilities a player picks at the start of the game.
use std::fmt;

use enumflags2::BitFlags;
use serde::{Deserialize, Serialize};

/// Ability codes. Each player selects two before placing ships and can use each once.
#[allow(clippy::upper_case_acronyms)]
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Ability {
    SP = 0b0001,
    /// Fires at two chosen cells in one move.
    RF = 0b0010,
    SD = 0b0100,
    /// Board-wide strike. Needs no target.
    HS = 0b1000,
}

/// A set of abilities, e.g. the ones a player still has available.
pub type AbilitySet = BitFlags<Ability>;

impl Ability {
    /// Every ability code, in wire order.
    pub const ALL: &'static [Ability] = &[Ability::SP, Ability::RF, Ability::SD, Ability::HS];

    /// The wire code of this ability.
    pub fn code(self) -> &'static str {
        match self {
            Ability::SP => "SP",
            Ability::RF => "RF",
            Ability::SD => "SD",
            Ability::HS => "HS",
        }
    }

    /// Look up an ability by its wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.code() == code)
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for &ability in Ability::ALL {
            assert_eq!(Ability::from_code(ability.code()), Some(ability));
            assert_eq!(
                serde_json::to_string(&ability).unwrap(),
                format!("\"{}\"", ability.code())
            );
        }
        assert_eq!(Ability::from_code("XX"), None);
    }

    #[test]
    fn sets_track_membership() {
        let mut set = AbilitySet::empty();
        set.insert(Ability::HS);
        assert!(set.contains(Ability::HS));
        assert!(!set.contains(Ability::RF));
        set |= Ability::RF;
        assert!(set.contains(Ability::RF | Ability::HS));
    }
}
