use crate::model::GameStats;

/// Aggregates that can tell whether every field still holds its default.
///
/// Implementations destructure the whole struct so that adding a field fails
/// to compile until the predicate covers it.
pub trait IsDefault {
    fn is_default(&self) -> bool;
}

/// Replace an all-default aggregate with `None`.
pub fn collapse_if_default<T: IsDefault>(value: T) -> Option<T> {
    if value.is_default() {
        None
    } else {
        Some(value)
    }
}

fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

impl IsDefault for GameStats {
    fn is_default(&self) -> bool {
        let GameStats {
            kills,
            deaths,
            assists,
            last_hits,
            denies,
            kill_streak,
            team,
            reliable_gold,
            unreliable_gold,
            gpm,
            xpm,
        } = self;

        is_zero(kills)
            && is_zero(deaths)
            && is_zero(assists)
            && is_zero(last_hits)
            && is_zero(denies)
            && is_zero(kill_streak)
            && is_zero(team)
            && is_zero(reliable_gold)
            && is_zero(unreliable_gold)
            && is_zero(gpm)
            && is_zero(xpm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Team;

    #[test]
    fn all_default_collapses() {
        assert_eq!(collapse_if_default(GameStats::default()), None);
    }

    #[test]
    fn any_single_field_keeps_the_block() {
        let variants = [
            GameStats { kills: 1, ..GameStats::default() },
            GameStats { deaths: 1, ..GameStats::default() },
            GameStats { assists: 1, ..GameStats::default() },
            GameStats { last_hits: 1, ..GameStats::default() },
            GameStats { denies: 1, ..GameStats::default() },
            GameStats { kill_streak: 1, ..GameStats::default() },
            GameStats { team: Team::Radiant, ..GameStats::default() },
            GameStats { reliable_gold: 1, ..GameStats::default() },
            GameStats { unreliable_gold: 1, ..GameStats::default() },
            GameStats { gpm: 1, ..GameStats::default() },
            GameStats { xpm: 1, ..GameStats::default() },
        ];
        for stats in variants {
            let kept = collapse_if_default(stats.clone());
            assert_eq!(kept, Some(stats));
        }
    }

    #[test]
    fn known_team_none_is_not_default() {
        let stats = GameStats {
            team: Team::None,
            ..GameStats::default()
        };
        assert!(!stats.is_default());
    }
}
