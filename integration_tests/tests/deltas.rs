mod common;

use chrono::TimeDelta;
use gsi_proto::{decode_snapshot_str, GameState, RuneType, Team, SLOT_COUNT};

#[test]
fn added_is_a_fully_decoded_snapshot() {
    let snapshot = common::decode_fixture("in_match.json");
    let added = snapshot.added.as_deref().expect("added present");

    let map = added.map.as_ref().expect("added map");
    assert_eq!(map.game_state, GameState::StrategyTime);
    assert_eq!(map.match_id, 7_423_181_121);
    assert_eq!(map.game_time, TimeDelta::seconds(90));
    assert_eq!(map.clock_time, TimeDelta::seconds(90));

    let stats = added
        .player
        .as_ref()
        .and_then(|player| player.stats.as_ref())
        .expect("added stats");
    assert_eq!(stats.team, Team::Dire);

    let hero = added.hero.as_ref().expect("added hero");
    assert_eq!(hero.respawn, TimeDelta::seconds(90));
    assert_eq!(hero.buyback_cooldown, TimeDelta::seconds(90));

    let abilities = added.abilities.as_ref().expect("added abilities");
    assert_eq!(abilities.slots.len(), SLOT_COUNT);
    assert_eq!(
        abilities.slots.get(3).map(|ability| ability.cooldown),
        Some(TimeDelta::seconds(90))
    );
    assert_eq!(abilities.attribute_level(), 1);

    let items = added.items.as_ref().expect("added items");
    assert_eq!(
        items.inventory.get(4).map(|item| item.cooldown),
        Some(TimeDelta::seconds(90))
    );
    assert!(items.inventory.get(5).is_none(), "placeholder collapsed");
    assert_eq!(
        items.stash.get(0).map(|item| item.contains_rune),
        Some(RuneType::None)
    );

    // level 5, 600 reliable, 400 unreliable: 600 + (400 - 150)
    assert_eq!(added.unreliable_gold_after_death(), 250);
    assert_eq!(added.gold_after_death(), 850);
    assert!(added.can_afford_buyback());
    assert!(added.added.is_none());
}

#[test]
fn previous_holds_only_changed_fields() {
    let snapshot = common::decode_fixture("in_match.json");
    let previous = snapshot.previous.as_deref().expect("previous present");

    let hero = previous.hero.as_ref().expect("previous hero");
    assert_eq!(hero.level, 9);
    assert_eq!(hero.buyback_cost, 420);
    assert!(hero.name.is_empty());

    assert!(previous.player.is_none());
    assert!(previous.map.is_none());
    assert_eq!(previous.gold_after_death(), 0);

    let items = previous.items.as_ref().expect("previous items");
    let occupied: Vec<usize> = items.inventory.occupied().map(|(index, _)| index).collect();
    assert_eq!(occupied, vec![3]);
    assert!(items.stash.is_empty());
}

#[test]
fn nested_deltas_are_bounded() {
    let snapshot = decode_snapshot_str(
        r#"{
            "added": {
                "hero": {"level": 3},
                "added": {"hero": {"level": 2}, "added": {"hero": {"level": 1}}},
                "previous": {"hero": {"level": 0}}
            }
        }"#,
    )
    .unwrap();
    let added = snapshot.added.expect("first level decoded");
    assert_eq!(added.hero_level(), Some(3));
    assert!(added.added.is_none());
    assert!(added.previous.is_none());
}

#[test]
fn errors_inside_deltas_propagate() {
    let err = decode_snapshot_str(r#"{"previous": {"map": {"game_time": "late"}}}"#).unwrap_err();
    assert_eq!(err.path(), Some("previous.map"));
}
