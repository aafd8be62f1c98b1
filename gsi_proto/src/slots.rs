use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::raw::strip_nulls;

/// Number of ability, inventory and stash positions reported by the client.
pub const SLOT_COUNT: usize = 6;

/// Fixed-length positional collection where the index is the slot identity.
///
/// Unoccupied positions stay in place as `None`; nothing is compacted.
#[derive(Debug, Clone, PartialEq)]
pub struct Slots<T>([Option<T>; SLOT_COUNT]);

impl<T> Slots<T> {
    pub fn new(slots: [Option<T>; SLOT_COUNT]) -> Self {
        Self(slots)
    }

    pub fn empty() -> Self {
        Self(std::array::from_fn(|_| None))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Always [`SLOT_COUNT`].
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no position is occupied.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    /// Every position in order, occupied or not.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.0.iter().map(Option::as_ref)
    }

    /// Occupied positions with their index.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))
    }

    pub fn into_array(self) -> [Option<T>; SLOT_COUNT] {
        self.0
    }

    /// Apply `f` to every position, keeping the index.
    pub fn map<U>(self, mut f: impl FnMut(Option<T>) -> Option<U>) -> Slots<U> {
        let mut source = self.0.into_iter();
        Slots(std::array::from_fn(|_| source.next().and_then(&mut f)))
    }
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<[Option<T>; SLOT_COUNT]> for Slots<T> {
    fn from(slots: [Option<T>; SLOT_COUNT]) -> Self {
        Self(slots)
    }
}

/// Gather `"{prefix}0"` through `"{prefix}5"` from a section object.
///
/// A missing key or an explicit `null` leaves the position empty. Keys past
/// the last index and keys with other prefixes are ignored. `parent` is the
/// dotted path of the section, used to name the offending key on failure.
pub fn map_slots<T>(
    section: &Map<String, Value>,
    prefix: &str,
    parent: &str,
) -> Result<Slots<T>, DecodeError>
where
    T: DeserializeOwned,
{
    let mut slots = Slots::empty();
    for (index, slot) in slots.0.iter_mut().enumerate() {
        let key = format!("{prefix}{index}");
        match section.get(&key) {
            None | Some(Value::Null) => {}
            Some(value) => {
                let decoded = T::deserialize(strip_nulls(value).as_ref())
                    .map_err(|source| DecodeError::section(format!("{parent}.{key}"), source))?;
                *slot = Some(decoded);
            }
        }
    }
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn sparse_indices_keep_their_position() {
        let section = object(json!({
            "slot0": {"name": "blink"},
            "slot4": {"name": "bottle"},
        }));
        let slots: Slots<Named> = map_slots(&section, "slot", "items").expect("slots decode");

        assert_eq!(slots.len(), SLOT_COUNT);
        assert_eq!(slots.get(0).map(|named| named.name.as_str()), Some("blink"));
        assert_eq!(slots.get(4).map(|named| named.name.as_str()), Some("bottle"));
        for index in [1, 2, 3, 5] {
            assert!(slots.get(index).is_none(), "slot {index} should be empty");
        }
        let occupied: Vec<usize> = slots.occupied().map(|(index, _)| index).collect();
        assert_eq!(occupied, vec![0, 4]);
    }

    #[test]
    fn empty_section_yields_six_empty_positions() {
        let slots: Slots<Named> = map_slots(&Map::new(), "ability", "abilities").expect("slots decode");
        assert_eq!(slots.len(), SLOT_COUNT);
        assert!(slots.is_empty());
        assert_eq!(slots.iter().count(), SLOT_COUNT);
    }

    #[test]
    fn foreign_and_overflow_keys_are_ignored() {
        let section = object(json!({
            "stash2": {"name": "ward"},
            "slot6": {"name": "overflow"},
            "teleport0": {"name": "tpscroll"},
            "slot1": null,
        }));
        let slots: Slots<Named> = map_slots(&section, "slot", "items").expect("slots decode");
        assert!(slots.is_empty());

        let stash: Slots<Named> = map_slots(&section, "stash", "items").expect("stash decodes");
        assert_eq!(stash.occupied().count(), 1);
        assert!(stash.get(2).is_some());
    }

    #[test]
    fn malformed_slot_reports_its_key() {
        let section = object(json!({ "ability3": 17 }));
        let err = map_slots::<Named>(&section, "ability", "added.abilities")
            .expect_err("number is not a slot");
        assert_eq!(err.path(), Some("added.abilities.ability3"));
    }

    #[test]
    fn map_preserves_positions() {
        let slots = Slots::from([Some(1), None, Some(3), None, None, Some(6)]);
        let mapped = slots.map(|slot| slot.filter(|value| *value != 3));
        assert_eq!(mapped.into_array(), [Some(1), None, None, None, None, Some(6)]);
    }
}
