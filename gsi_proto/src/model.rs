//! Canonical, strongly-typed game state produced by [`crate::decode_snapshot`].

use chrono::{DateTime, TimeDelta, Utc};

use crate::enums::{GameState, PlayerActivity, RuneType, Team};
use crate::slots::Slots;

/// Unreliable gold lost per hero level on death.
pub const DEATH_GOLD_PER_LEVEL: i32 = 30;

/// One decoded update from the game client.
///
/// Every section is optional: a section missing from the payload is `None`
/// here rather than a zero-filled block. `previous` and `added` describe the
/// change since the last update using the same shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    pub auth: Option<Auth>,
    pub provider: Option<Provider>,
    pub map: Option<MapState>,
    pub player: Option<PlayerState>,
    pub hero: Option<HeroState>,
    pub abilities: Option<Abilities>,
    pub items: Option<Items>,
    pub previous: Option<Box<Snapshot>>,
    pub added: Option<Box<Snapshot>>,
}

/// Token configured in the client's integration file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Auth {
    pub token: String,
}

/// Identity of the application producing the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub app_id: i32,
    pub version: i32,
    /// `None` when the client omitted the timestamp.
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapState {
    pub name: String,
    pub match_id: u64,
    pub game_time: TimeDelta,
    pub clock_time: TimeDelta,
    pub daytime: bool,
    pub nightstalker_night: bool,
    pub game_state: GameState,
    pub win_team: Team,
    pub custom_game_name: String,
    pub ward_purchase_cooldown: TimeDelta,
}

/// The Steam user logged in to the client.
///
/// `stats` is `None` outside an active match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerState {
    pub steam_id: String,
    pub name: String,
    pub activity: PlayerActivity,
    pub stats: Option<GameStats>,
}

/// Per-match performance counters for the logged-in player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameStats {
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub last_hits: i32,
    pub denies: i32,
    pub kill_streak: i32,
    pub team: Team,
    pub reliable_gold: i32,
    pub unreliable_gold: i32,
    pub gpm: i32,
    pub xpm: i32,
}

/// The hero controlled by the connected client.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeroState {
    pub id: i32,
    pub name: String,
    pub level: i32,
    pub alive: bool,
    pub respawn: TimeDelta,
    pub buyback_cost: i32,
    pub buyback_cooldown: TimeDelta,
    pub health: i32,
    pub max_health: i32,
    pub health_percent: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub mana_percent: i32,
    pub silenced: bool,
    pub stunned: bool,
    pub disarmed: bool,
    pub magic_immune: bool,
    pub hexed: bool,
    pub muted: bool,
    pub broken: bool,
    pub debuffed: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ability {
    pub name: String,
    pub level: i32,
    pub cooldown: TimeDelta,
    pub can_cast: bool,
    pub active: bool,
    pub passive: bool,
    pub ultimate: bool,
}

/// Level of the generic attribute-bonus upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Attributes {
    pub level: i32,
}

/// Ability bar of the hero. Unlearned abilities are present at level 0; an
/// empty position means the hero has nothing in that slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Abilities {
    pub slots: Slots<Ability>,
    pub attributes: Option<Attributes>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub name: String,
    pub contains_rune: RuneType,
    pub charges: i32,
    pub cooldown: TimeDelta,
    pub can_cast: bool,
    pub passive: bool,
}

/// Inventory and stash. An empty position holds no item.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Items {
    pub inventory: Slots<Item>,
    pub stash: Slots<Item>,
}

impl Snapshot {
    /// Player stats and hero together, when both are reported.
    fn match_figures(&self) -> Option<(&GameStats, &HeroState)> {
        let stats = self.player.as_ref()?.stats.as_ref()?;
        let hero = self.hero.as_ref()?;
        Some((stats, hero))
    }

    /// Unreliable gold left after the hero dies, never negative.
    ///
    /// Returns 0 when hero or player data is missing. Custom games use other
    /// death penalties.
    pub fn unreliable_gold_after_death(&self) -> i32 {
        let Some((stats, hero)) = self.match_figures() else {
            return 0;
        };
        let death_gold = DEATH_GOLD_PER_LEVEL.saturating_mul(hero.level);
        stats.unreliable_gold.saturating_sub(death_gold).max(0)
    }

    /// Total gold the player keeps if the hero dies now.
    pub fn gold_after_death(&self) -> i32 {
        let Some((stats, _)) = self.match_figures() else {
            return 0;
        };
        stats
            .reliable_gold
            .saturating_add(self.unreliable_gold_after_death())
    }

    /// Whether the gold left after death covers buyback. Ignores the buyback
    /// cooldown.
    pub fn can_afford_buyback(&self) -> bool {
        let Some((_, hero)) = self.match_figures() else {
            return false;
        };
        hero.buyback_cost < self.gold_after_death()
    }

    /// True when the player block carries match stats.
    pub fn is_in_match(&self) -> bool {
        self.player
            .as_ref()
            .is_some_and(|player| player.stats.is_some())
    }

    pub fn hero_level(&self) -> Option<i32> {
        self.hero.as_ref().map(|hero| hero.level)
    }
}

impl PlayerState {
    pub fn kills(&self) -> Option<i32> {
        self.stats.as_ref().map(|stats| stats.kills)
    }

    pub fn deaths(&self) -> Option<i32> {
        self.stats.as_ref().map(|stats| stats.deaths)
    }

    pub fn assists(&self) -> Option<i32> {
        self.stats.as_ref().map(|stats| stats.assists)
    }

    pub fn team(&self) -> Option<Team> {
        self.stats.as_ref().map(|stats| stats.team)
    }

    pub fn reliable_gold(&self) -> Option<i32> {
        self.stats.as_ref().map(|stats| stats.reliable_gold)
    }

    pub fn unreliable_gold(&self) -> Option<i32> {
        self.stats.as_ref().map(|stats| stats.unreliable_gold)
    }

    pub fn gold(&self) -> Option<i32> {
        self.stats
            .as_ref()
            .map(|stats| stats.reliable_gold.saturating_add(stats.unreliable_gold))
    }
}

impl Abilities {
    /// First ability flagged as the ultimate.
    pub fn ultimate(&self) -> Option<&Ability> {
        self.slots
            .occupied()
            .map(|(_, ability)| ability)
            .find(|ability| ability.ultimate)
    }

    pub fn with_name(&self, name: &str) -> Option<&Ability> {
        self.slots
            .occupied()
            .map(|(_, ability)| ability)
            .find(|ability| ability.name == name)
    }

    /// Attribute bonus level, 0 when the client did not report it.
    pub fn attribute_level(&self) -> i32 {
        self.attributes.map_or(0, |attributes| attributes.level)
    }
}

impl Items {
    /// Every inventory then stash item with the given name.
    pub fn with_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Item> + 'a {
        self.inventory
            .occupied()
            .chain(self.stash.occupied())
            .map(|(_, item)| item)
            .filter(move |item| item.name == name)
    }
}
