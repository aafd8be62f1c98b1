use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::collapse::collapse_if_default;
use crate::error::{json_kind, DecodeError};
use crate::model::{Abilities, Auth, HeroState, Items, MapState, PlayerState, Provider, Snapshot};
use crate::raw::{
    strip_nulls, RawAbility, RawAttributes, RawAuth, RawHero, RawItem, RawMap, RawPlayer,
    RawProvider, RawTimestamp,
};
use crate::sentinel::normalize_slot;
use crate::slots::map_slots;

/// Deepest level at which `previous`/`added` are still decoded.
///
/// The top-level snapshot sits at depth 0 and its deltas at depth 1. Delta
/// keys nested below that are dropped.
pub const MAX_DELTA_DEPTH: usize = 1;

/// Decode one payload as pushed by the game client.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, DecodeError> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_value(&value)
}

pub fn decode_snapshot_str(text: &str) -> Result<Snapshot, DecodeError> {
    decode_snapshot(text.as_bytes())
}

/// Decode an already-parsed payload.
pub fn decode_value(value: &Value) -> Result<Snapshot, DecodeError> {
    let root = as_object(value, "")?;
    assemble(root, "", 0)
}

fn assemble(root: &Map<String, Value>, path: &str, depth: usize) -> Result<Snapshot, DecodeError> {
    let mut snapshot = Snapshot {
        auth: section::<RawAuth>(root, path, "auth")?.map(Auth::from),
        provider: provider(root, path)?,
        map: section::<RawMap>(root, path, "map")?.map(MapState::from),
        player: player(root, path)?,
        hero: section::<RawHero>(root, path, "hero")?.map(HeroState::from),
        abilities: abilities(root, path)?,
        items: items(root, path)?,
        previous: None,
        added: None,
    };

    for (key, slot) in [("previous", &mut snapshot.previous), ("added", &mut snapshot.added)] {
        let Some(nested) = present(root, key) else {
            continue;
        };
        let nested_path = join(path, key);
        if depth >= MAX_DELTA_DEPTH {
            warn!(
                target: "gsi::decode",
                path = %nested_path,
                depth,
                "delta.dropped=depth_limit"
            );
            continue;
        }
        let nested_root = as_object(nested, &nested_path)?;
        *slot = Some(Box::new(assemble(nested_root, &nested_path, depth + 1)?));
    }

    Ok(snapshot)
}

/// Look up `key`, treating an explicit `null` as missing.
fn present<'a>(root: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    root.get(key).filter(|value| !value.is_null())
}

fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, DecodeError> {
    value.as_object().ok_or_else(|| DecodeError::NotAnObject {
        path: if path.is_empty() { "$".to_string() } else { path.to_string() },
        found: json_kind(value),
    })
}

fn section<T>(root: &Map<String, Value>, parent: &str, key: &str) -> Result<Option<T>, DecodeError>
where
    T: DeserializeOwned,
{
    let Some(value) = present(root, key) else {
        return Ok(None);
    };
    T::deserialize(strip_nulls(value).as_ref())
        .map(Some)
        .map_err(|source| DecodeError::section(join(parent, key), source))
}

/// The timestamp sits next to the visible provider fields, so it is read in
/// a second pass over the same section.
fn provider(root: &Map<String, Value>, parent: &str) -> Result<Option<Provider>, DecodeError> {
    let Some(raw) = section::<RawProvider>(root, parent, "provider")? else {
        return Ok(None);
    };
    let stamp = section::<RawTimestamp>(root, parent, "provider")?.unwrap_or_default();
    Ok(Some(Provider {
        name: raw.name,
        app_id: raw.appid,
        version: raw.version,
        timestamp: stamp.timestamp,
    }))
}

fn player(root: &Map<String, Value>, parent: &str) -> Result<Option<PlayerState>, DecodeError> {
    let Some(raw) = section::<RawPlayer>(root, parent, "player")? else {
        return Ok(None);
    };
    let (mut identity, stats) = raw.split();
    identity.stats = collapse_if_default(stats);
    if identity.stats.is_none() {
        trace!(target: "gsi::decode", path = %join(parent, "player"), "player.stats=absent");
    }
    Ok(Some(identity))
}

fn abilities(root: &Map<String, Value>, parent: &str) -> Result<Option<Abilities>, DecodeError> {
    let Some(value) = present(root, "abilities") else {
        return Ok(None);
    };
    let path = join(parent, "abilities");
    let body = as_object(value, &path)?;
    let slots = map_slots::<RawAbility>(body, "ability", &path)?.map(|slot| slot.map(Into::into));
    let attributes = section::<RawAttributes>(body, &path, "attributes")?.map(Into::into);
    Ok(Some(Abilities { slots, attributes }))
}

fn items(root: &Map<String, Value>, parent: &str) -> Result<Option<Items>, DecodeError> {
    let Some(value) = present(root, "items") else {
        return Ok(None);
    };
    let path = join(parent, "items");
    let body = as_object(value, &path)?;
    let inventory = map_slots::<RawItem>(body, "slot", &path)?
        .map(|slot| normalize_slot(slot.map(Into::into)));
    let stash = map_slots::<RawItem>(body, "stash", &path)?
        .map(|slot| normalize_slot(slot.map(Into::into)));
    Ok(Some(Items { inventory, stash }))
}
