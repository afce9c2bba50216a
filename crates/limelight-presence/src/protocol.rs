//! Activity payload types for the rich-presence service.
//!
//! These mirror the JSON activity object the service expects in a
//! set-activity request. The envelope around them (opcodes, framing,
//! nonces) belongs to the transport and is not modeled here.
//!
//! Building an [`Activity`] from a [`PresenceRecord`] is where unset
//! fields are normalized away: empty strings and zero timestamps become
//! absent JSON fields, never empty objects.

use serde::{Deserialize, Serialize};

use crate::record::PresenceRecord;

// ---------------------------------------------------------------------------
// Payload types
// ---------------------------------------------------------------------------

/// The activity object submitted to the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<ActivityTimestamps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<ActivityAssets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<ActivityParty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets: Option<ActivitySecrets>,
    #[serde(default)]
    pub instance: bool,
}

/// Start/end of the activity, epoch seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityTimestamps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Image keys and hover texts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityAssets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_text: Option<String>,
}

/// Party membership. `size` is `[current, max]` on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityParty {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[i32; 2]>,
}

/// Join/spectate/match tokens. Opaque to this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySecrets {
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_secret: Option<String>,
    #[serde(rename = "join", skip_serializing_if = "Option::is_none")]
    pub join_secret: Option<String>,
    #[serde(rename = "spectate", skip_serializing_if = "Option::is_none")]
    pub spectate_secret: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Empty string means unset.
fn opt_str(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Zero timestamp means unset.
fn opt_ts(t: i64) -> Option<i64> {
    if t == 0 {
        None
    } else {
        Some(t)
    }
}

impl From<&PresenceRecord> for Activity {
    fn from(record: &PresenceRecord) -> Self {
        let timestamps = match (opt_ts(record.start_timestamp), opt_ts(record.end_timestamp)) {
            (None, None) => None,
            (start, end) => Some(ActivityTimestamps { start, end }),
        };

        let assets = ActivityAssets {
            large_image: opt_str(&record.large_image_key),
            large_text: opt_str(&record.large_image_text),
            small_image: opt_str(&record.small_image_key),
            small_text: opt_str(&record.small_image_text),
        };
        let assets = (assets != ActivityAssets::default()).then_some(assets);

        // A party exists if any of its fields is set. The size pair only
        // goes on the wire when both halves are meaningful.
        let party = if !record.party_id.is_empty()
            || record.party_size > 0
            || record.party_max > 0
        {
            Some(ActivityParty {
                id: opt_str(&record.party_id),
                size: (record.party_size > 0 && record.party_max > 0)
                    .then_some([record.party_size, record.party_max]),
            })
        } else {
            None
        };

        let secrets = ActivitySecrets {
            match_secret: opt_str(&record.match_secret),
            join_secret: opt_str(&record.join_secret),
            spectate_secret: opt_str(&record.spectate_secret),
        };
        let secrets = (secrets != ActivitySecrets::default()).then_some(secrets);

        Activity {
            state: opt_str(&record.state),
            details: opt_str(&record.details),
            timestamps,
            assets,
            party,
            secrets,
            instance: record.instance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_record() -> PresenceRecord {
        PresenceRecord {
            state: "In a Group".into(),
            details: "Competitive - Ranked".into(),
            start_timestamp: 1_507_665_886,
            end_timestamp: 1_507_669_486,
            large_image_key: "canary-large".into(),
            large_image_text: "Fortress of Solitude".into(),
            small_image_key: "ptb-small".into(),
            small_image_text: "Level 100".into(),
            party_id: "ae488379-351d-4a4f-ad32-2b9b01c91657".into(),
            party_size: 3,
            party_max: 6,
            match_secret: "MmhuZToxMjMxMjM6cWl3amR3MWlo".into(),
            join_secret: "MTI4NzM0OjFpMmhuZToxMjMxMjM".into(),
            spectate_secret: "MTIzNDV8MTIzNDV8MTMyNDU0".into(),
            instance: true,
        }
    }

    #[test]
    fn default_record_serializes_to_bare_payload() {
        let activity = Activity::from(&PresenceRecord::default());
        let json = serde_json::to_value(&activity).unwrap();
        // Unset fields are absent, not empty objects.
        assert_eq!(json, serde_json::json!({ "instance": false }));
    }

    #[test]
    fn empty_strings_and_zero_timestamps_are_absent() {
        let record = PresenceRecord {
            state: "".into(),
            details: "".into(),
            start_timestamp: 0,
            ..Default::default()
        };
        let activity = Activity::from(&record);
        assert!(activity.state.is_none());
        assert!(activity.details.is_none());
        assert!(activity.timestamps.is_none());
        assert!(activity.assets.is_none());
        assert!(activity.party.is_none());
        assert!(activity.secrets.is_none());
    }

    #[test]
    fn start_only_timestamp_keeps_end_absent() {
        let record = PresenceRecord {
            start_timestamp: 1_507_665_886,
            ..Default::default()
        };
        let activity = Activity::from(&record);
        let ts = activity.timestamps.unwrap();
        assert_eq!(ts.start, Some(1_507_665_886));
        assert!(ts.end.is_none());

        let json = serde_json::to_value(Activity::from(&record)).unwrap();
        assert!(json["timestamps"].get("end").is_none());
    }

    #[test]
    fn party_without_counts_has_no_size_pair() {
        let record = PresenceRecord {
            party_id: "party-1".into(),
            ..Default::default()
        };
        let activity = Activity::from(&record);
        let party = activity.party.unwrap();
        assert_eq!(party.id.as_deref(), Some("party-1"));
        assert!(party.size.is_none());
    }

    #[test]
    fn party_size_pair_needs_both_halves() {
        let record = PresenceRecord {
            party_id: "party-1".into(),
            party_size: 2,
            party_max: 0,
            ..Default::default()
        };
        assert!(Activity::from(&record).party.unwrap().size.is_none());

        let record = PresenceRecord {
            party_size: 2,
            party_max: 5,
            ..Default::default()
        };
        let party = Activity::from(&record).party.unwrap();
        assert!(party.id.is_none());
        assert_eq!(party.size, Some([2, 5]));
    }

    #[test]
    fn secrets_use_service_field_names() {
        let record = PresenceRecord {
            join_secret: "MTI4NzM0OjFpMmhuZToxMjMxMjM".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(Activity::from(&record)).unwrap();
        assert_eq!(json["secrets"]["join"], "MTI4NzM0OjFpMmhuZToxMjMxMjM");
        assert!(json["secrets"].get("match").is_none());
        assert!(json["secrets"].get("join_secret").is_none());
    }

    #[test]
    fn full_record_round_trips() {
        let activity = Activity::from(&full_record());
        let json = serde_json::to_string(&activity).unwrap();
        let back: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(back, activity);

        // Spot-check the nested wire shape.
        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["party"]["size"], serde_json::json!([3, 6]));
        assert_eq!(value["assets"]["large_image"], "canary-large");
        assert_eq!(value["timestamps"]["end"], 1_507_669_486);
        assert_eq!(value["instance"], true);
    }
}
