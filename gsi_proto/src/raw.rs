//! Wire-shaped records, named exactly as the game client names them.
//!
//! Every field defaults when missing: delta sections only carry the fields
//! that changed. A field set to `null` counts as missing.

use std::borrow::Cow;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::enums::{GameState, PlayerActivity, RuneType, Team};
use crate::model::{
    Ability, Attributes, Auth, GameStats, HeroState, Item, MapState, PlayerState,
};
use crate::scalar::{epoch_seconds, seconds};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawAuth {
    token: String,
}

impl From<RawAuth> for Auth {
    fn from(raw: RawAuth) -> Self {
        Auth { token: raw.token }
    }
}

/// The visible provider record. The timestamp is read separately.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawProvider {
    pub name: String,
    pub appid: i32,
    pub version: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawTimestamp {
    #[serde(deserialize_with = "epoch_seconds")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Drop `null`-valued fields from a record so they take their defaults.
/// Anything other than an object passes through untouched.
pub(crate) fn strip_nulls(value: &Value) -> Cow<'_, Value> {
    match value {
        Value::Object(fields) if fields.values().any(Value::is_null) => Cow::Owned(Value::Object(
            fields
                .iter()
                .filter(|(_, field)| !field.is_null())
                .map(|(key, field)| (key.clone(), field.clone()))
                .collect(),
        )),
        _ => Cow::Borrowed(value),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawMap {
    name: String,
    #[serde(deserialize_with = "match_id")]
    matchid: u64,
    #[serde(deserialize_with = "seconds")]
    game_time: TimeDelta,
    #[serde(deserialize_with = "seconds")]
    clock_time: TimeDelta,
    daytime: bool,
    nightstalker_night: bool,
    game_state: GameState,
    win_team: Team,
    customgamename: String,
    #[serde(deserialize_with = "seconds")]
    ward_purchase_cooldown: TimeDelta,
}

impl From<RawMap> for MapState {
    fn from(raw: RawMap) -> Self {
        MapState {
            name: raw.name,
            match_id: raw.matchid,
            game_time: raw.game_time,
            clock_time: raw.clock_time,
            daytime: raw.daytime,
            nightstalker_night: raw.nightstalker_night,
            game_state: raw.game_state,
            win_team: raw.win_team,
            custom_game_name: raw.customgamename,
            ward_purchase_cooldown: raw.ward_purchase_cooldown,
        }
    }
}

/// Newer clients send the match id as a decimal string.
fn match_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(0),
        Some(NumberOrString::Number(value)) => Ok(value),
        Some(NumberOrString::String(text)) => text.parse().map_err(serde::de::Error::custom),
    }
}

/// Identity and match counters arrive in one flat record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawPlayer {
    steamid: String,
    name: String,
    activity: PlayerActivity,
    kills: i32,
    deaths: i32,
    assists: i32,
    last_hits: i32,
    denies: i32,
    kill_streak: i32,
    team_name: Team,
    gold_reliable: i32,
    gold_unreliable: i32,
    gpm: i32,
    xpm: i32,
}

impl RawPlayer {
    /// Split the flat record into identity and stats. Stats are returned
    /// as-is; collapsing them is the caller's decision.
    pub fn split(self) -> (PlayerState, GameStats) {
        let stats = GameStats {
            kills: self.kills,
            deaths: self.deaths,
            assists: self.assists,
            last_hits: self.last_hits,
            denies: self.denies,
            kill_streak: self.kill_streak,
            team: self.team_name,
            reliable_gold: self.gold_reliable,
            unreliable_gold: self.gold_unreliable,
            gpm: self.gpm,
            xpm: self.xpm,
        };
        let identity = PlayerState {
            steam_id: self.steamid,
            name: self.name,
            activity: self.activity,
            stats: None,
        };
        (identity, stats)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawHero {
    id: i32,
    name: String,
    level: i32,
    alive: bool,
    #[serde(deserialize_with = "seconds")]
    respawn_seconds: TimeDelta,
    buyback_cost: i32,
    #[serde(deserialize_with = "seconds")]
    buyback_cooldown: TimeDelta,
    health: i32,
    max_health: i32,
    health_percent: i32,
    mana: i32,
    max_mana: i32,
    mana_percent: i32,
    silenced: bool,
    stunned: bool,
    disarmed: bool,
    magicimmune: bool,
    hexed: bool,
    muted: bool,
    #[serde(rename = "break")]
    broken: bool,
    has_debuff: bool,
}

impl From<RawHero> for HeroState {
    fn from(raw: RawHero) -> Self {
        HeroState {
            id: raw.id,
            name: raw.name,
            level: raw.level,
            alive: raw.alive,
            respawn: raw.respawn_seconds,
            buyback_cost: raw.buyback_cost,
            buyback_cooldown: raw.buyback_cooldown,
            health: raw.health,
            max_health: raw.max_health,
            health_percent: raw.health_percent,
            mana: raw.mana,
            max_mana: raw.max_mana,
            mana_percent: raw.mana_percent,
            silenced: raw.silenced,
            stunned: raw.stunned,
            disarmed: raw.disarmed,
            magic_immune: raw.magicimmune,
            hexed: raw.hexed,
            muted: raw.muted,
            broken: raw.broken,
            debuffed: raw.has_debuff,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawAbility {
    name: String,
    level: i32,
    #[serde(deserialize_with = "seconds")]
    cooldown: TimeDelta,
    can_cast: bool,
    ability_active: bool,
    passive: bool,
    ultimate: bool,
}

impl From<RawAbility> for Ability {
    fn from(raw: RawAbility) -> Self {
        Ability {
            name: raw.name,
            level: raw.level,
            cooldown: raw.cooldown,
            can_cast: raw.can_cast,
            active: raw.ability_active,
            passive: raw.passive,
            ultimate: raw.ultimate,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawAttributes {
    level: i32,
}

impl From<RawAttributes> for Attributes {
    fn from(raw: RawAttributes) -> Self {
        Attributes { level: raw.level }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawItem {
    name: String,
    contains_rune: RuneType,
    charges: i32,
    #[serde(deserialize_with = "seconds")]
    cooldown: TimeDelta,
    can_cast: bool,
    passive: bool,
}

impl From<RawItem> for Item {
    fn from(raw: RawItem) -> Self {
        Item {
            name: raw.name,
            contains_rune: raw.contains_rune,
            charges: raw.charges,
            cooldown: raw.cooldown,
            can_cast: raw.can_cast,
            passive: raw.passive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_id_accepts_number_or_string() {
        let numeric: RawMap = serde_json::from_str(r#"{"matchid": 7423181121}"#).unwrap();
        assert_eq!(numeric.matchid, 7_423_181_121);

        let text: RawMap = serde_json::from_str(r#"{"matchid": "7423181121"}"#).unwrap();
        assert_eq!(text.matchid, 7_423_181_121);

        assert!(serde_json::from_str::<RawMap>(r#"{"matchid": "abc"}"#).is_err());
    }

    #[test]
    fn player_split_keeps_deaths_separate_from_kills() {
        let raw: RawPlayer =
            serde_json::from_str(r#"{"kills": 4, "deaths": 9, "team_name": "dire"}"#).unwrap();
        let (identity, stats) = raw.split();
        assert_eq!(stats.kills, 4);
        assert_eq!(stats.deaths, 9);
        assert_eq!(stats.team, Team::Dire);
        assert!(identity.stats.is_none());
    }

    #[test]
    fn hero_break_flag_uses_reserved_word_key() {
        let raw: RawHero = serde_json::from_str(r#"{"break": true, "magicimmune": true}"#).unwrap();
        let hero = HeroState::from(raw);
        assert!(hero.broken);
        assert!(hero.magic_immune);
        assert!(!hero.debuffed);
    }

    #[test]
    fn null_fields_are_stripped() {
        let record = serde_json::json!({
            "name": "item_bottle",
            "charges": null,
            "contains_rune": null,
        });
        let stripped = strip_nulls(&record);
        assert!(matches!(stripped, Cow::Owned(_)));
        assert_eq!(*stripped, serde_json::json!({"name": "item_bottle"}));

        let raw = RawItem::deserialize(stripped.as_ref()).unwrap();
        let item = Item::from(raw);
        assert_eq!(item.charges, 0);
        assert_eq!(item.contains_rune, RuneType::None);

        let clean = serde_json::json!({"level": 3});
        assert!(matches!(strip_nulls(&clean), Cow::Borrowed(_)));
        assert!(matches!(strip_nulls(&Value::Null), Cow::Borrowed(Value::Null)));
    }

    #[test]
    fn null_match_id_is_zero() {
        let map: RawMap = serde_json::from_str(r#"{"matchid": null}"#).unwrap();
        assert_eq!(map.matchid, 0);
    }

    #[test]
    fn missing_fields_default() {
        let raw: RawItem = serde_json::from_str("{}").unwrap();
        let item = Item::from(raw);
        assert_eq!(item, Item::default());
    }
}
