//! Closed enums over the open-ended string vocabularies of the wire format.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// A string enumeration whose upstream vocabulary may grow without notice.
///
/// Decoding never fails on an unrecognised value: it degrades to
/// [`WireEnum::FALLBACK`] so newer clients keep working against this decoder.
pub trait WireEnum: Copy + Sized + 'static {
    /// Value used for any string outside [`WireEnum::KNOWN`].
    const FALLBACK: Self;
    /// Every recognised member, fallback excluded.
    const KNOWN: &'static [Self];
    /// Type name used in diagnostics.
    const NAME: &'static str;

    fn as_wire(&self) -> &'static str;
}

/// Match `raw` against the known set of `T`, falling back on a miss.
pub fn decode_enum<T: WireEnum>(raw: &str) -> T {
    if let Some(value) = T::KNOWN.iter().find(|value| value.as_wire() == raw) {
        return *value;
    }
    if raw != T::FALLBACK.as_wire() {
        tracing::debug!(
            target: "gsi::decode",
            kind = T::NAME,
            value = raw,
            "enum.unknown=fallback"
        );
    }
    T::FALLBACK
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            fallback: $fallback:ident = $fallback_wire:literal,
            $($variant:ident = $wire:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            #[default]
            $fallback,
            $($variant,)+
        }

        impl WireEnum for $name {
            const FALLBACK: Self = $name::$fallback;
            const KNOWN: &'static [Self] = &[$($name::$variant,)+];
            const NAME: &'static str = stringify!($name);

            fn as_wire(&self) -> &'static str {
                match self {
                    $name::$fallback => $fallback_wire,
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = Option::<std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
                Ok(raw.map_or($name::$fallback, |raw| decode_enum(&raw)))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_wire())
            }
        }
    };
}

wire_enum! {
    /// Phase of the match as reported by the game rules.
    GameState {
        fallback: Undefined = "",
        Disconnect = "DOTA_GAMERULES_STATE_DISCONNECT",
        GameInProgress = "DOTA_GAMERULES_STATE_GAME_IN_PROGRESS",
        HeroSelection = "DOTA_GAMERULES_STATE_HERO_SELECTION",
        Init = "DOTA_GAMERULES_STATE_INIT",
        Last = "DOTA_GAMERULES_STATE_LAST",
        PostGame = "DOTA_GAMERULES_STATE_POST_GAME",
        PreGame = "DOTA_GAMERULES_STATE_PRE_GAME",
        StrategyTime = "DOTA_GAMERULES_STATE_STRATEGY_TIME",
        WaitForPlayers = "DOTA_GAMERULES_STATE_WAIT_FOR_PLAYERS",
        TeamShowcase = "DOTA_GAMERULES_STATE_TEAM_SHOWCASE",
        CustomGameSetup = "DOTA_GAMERULES_STATE_CUSTOM_GAME_SETUP",
    }
}

wire_enum! {
    /// Side of the map. Custom games may report values outside this set.
    Team {
        fallback: Undefined = "",
        None = "none",
        Dire = "dire",
        Radiant = "radiant",
    }
}

wire_enum! {
    /// What the logged-in user is doing. Not exhaustive upstream.
    PlayerActivity {
        fallback: None = "",
        Menu = "menu",
        Playing = "playing",
    }
}

wire_enum! {
    /// Rune stored in a bottle.
    RuneType {
        fallback: None = "",
        DoubleDamage = "double_damage",
        Haste = "haste",
        Illusion = "illusion",
        Invisibility = "invisibility",
        Regeneration = "regeneration",
        Bounty = "bounty",
        Arcane = "arcane",
        Water = "water",
        Wisdom = "wisdom",
        Shield = "shield",
    }
}

impl GameState {
    /// True while heroes are on the map and the clock is meaningful.
    pub fn is_live(self) -> bool {
        matches!(self, GameState::PreGame | GameState::GameInProgress)
    }
}
