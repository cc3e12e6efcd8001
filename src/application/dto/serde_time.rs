//! RFC 3339 timestamps with millisecond precision and a `Z` suffix.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.filter(|s| !s.trim().is_empty())
            .map(|s| {
                DateTime::parse_from_rfc3339(s.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Stamp {
        #[serde(with = "super")]
        at: DateTime<Utc>,
        #[serde(default, with = "super::option")]
        follow_up: Option<DateTime<Utc>>,
    }

    #[test]
    fn writes_millisecond_utc() {
        let stamp = Stamp {
            at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            follow_up: None,
        };
        let json = serde_json::to_value(&stamp).unwrap();
        assert_eq!(json["at"], "2024-05-01T08:00:00.000Z");
        assert!(json["follow_up"].is_null());
    }

    #[test]
    fn reads_offsets_and_blank_optionals() {
        let stamp: Stamp =
            serde_json::from_str(r#"{"at":"2024-05-01T10:00:00+02:00","follow_up":""}"#).unwrap();
        assert_eq!(stamp.at, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
        assert!(stamp.follow_up.is_none());
    }
}
