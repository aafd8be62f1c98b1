//! Decoder for the game state integration payloads pushed by the Dota 2 client.
//!
//! The client reports its state as loosely-typed JSON: slots as numbered keys,
//! empty items as a placeholder name, times as integer seconds and enums as
//! open-ended strings. [`decode_snapshot`] turns that into a [`Snapshot`] with
//! fixed-size slot collections, `chrono` durations and closed enums, and it
//! never fails on vocabulary the decoder has not seen before.

mod collapse;
mod decode;
mod enums;
mod error;
mod model;
mod raw;
mod scalar;
mod sentinel;
mod slots;

pub use collapse::{collapse_if_default, IsDefault};
pub use decode::{decode_snapshot, decode_snapshot_str, decode_value, MAX_DELTA_DEPTH};
pub use enums::{decode_enum, GameState, PlayerActivity, RuneType, Team, WireEnum};
pub use error::DecodeError;
pub use model::{
    Abilities, Ability, Attributes, Auth, GameStats, HeroState, Item, Items, MapState,
    PlayerState, Provider, Snapshot, DEATH_GOLD_PER_LEVEL,
};
pub use scalar::{decode_duration, decode_instant};
pub use sentinel::{normalize_slot, EMPTY_ITEM_NAME};
pub use slots::{map_slots, Slots, SLOT_COUNT};
