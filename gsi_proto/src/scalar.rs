//! Integer codecs for the time-bearing fields of the wire format.
//!
//! The game client reports every cooldown, clock and timestamp as a whole
//! number of seconds. These helpers lift those integers into `chrono` values
//! so nothing downstream has to remember the unit.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer};

/// Interpret `raw` as seconds since the Unix epoch.
///
/// Values outside chrono's representable range saturate to the nearest bound.
pub fn decode_instant(raw: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(raw, 0).unwrap_or(if raw < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Interpret `raw` as a signed count of seconds.
///
/// The map clock counts up from a negative value during the pre-game, so the
/// sign is preserved. Out-of-range values saturate.
pub fn decode_duration(raw: i64) -> TimeDelta {
    TimeDelta::try_seconds(raw).unwrap_or(if raw < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

/// `deserialize_with` adapter for integer-second duration fields. `null`
/// reads as zero.
pub fn seconds<'de, D>(deserializer: D) -> Result<TimeDelta, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(|raw| decode_duration(raw.unwrap_or_default()))
}

/// `deserialize_with` adapter for epoch-second timestamp fields. `null`
/// reads as no timestamp at all.
pub fn epoch_seconds<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(|raw| raw.map(decode_instant))
}
