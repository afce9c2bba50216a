//! The editable presence snapshot.

use serde::{Deserialize, Serialize};

/// One rich-presence payload as the host edits it.
///
/// Every field has a defined "unset" value (empty string, zero timestamp,
/// zero party count) and the facade accepts any mix of set and unset
/// fields without complaint. The record carries no identity of its own; it
/// is whatever the host currently wants displayed, read only at the moment
/// it is submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceRecord {
    /// The player's current party status, e.g. "Looking to Play".
    pub state: String,
    /// What the player is currently doing, e.g. "Competitive - Ranked".
    pub details: String,
    /// Epoch seconds the activity started; 0 means unset. When set the
    /// service shows elapsed time.
    pub start_timestamp: i64,
    /// Epoch seconds the activity ends; 0 means unset. When set the
    /// service shows remaining time.
    pub end_timestamp: i64,
    pub large_image_key: String,
    pub large_image_text: String,
    pub small_image_key: String,
    pub small_image_text: String,
    /// Identifier tying party members together; opaque to this layer.
    pub party_id: String,
    /// Current party size; 0 means no party.
    pub party_size: i32,
    /// Maximum party size; 0 means no party cap.
    pub party_max: i32,
    pub match_secret: String,
    pub join_secret: String,
    pub spectate_secret: String,
    /// Marks the presence as an instanced session. Forwarded opaquely;
    /// its effect is defined by the service.
    pub instance: bool,
}

impl PresenceRecord {
    /// True when every field still holds its unset default.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
