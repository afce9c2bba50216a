//! Convenience layer pairing a client with a working presence record.
//!
//! Hosts that don't want to juggle a [`PresenceRecord`] themselves keep a
//! session instead: edit the owned record through the setters, then
//! [`apply`](PresenceSession::apply) it. Everything here delegates to the
//! facade; no presence logic of its own.

use limelight_common::unix_now;
use tracing::debug;

use crate::client::PresenceClient;
use crate::record::PresenceRecord;

/// What to do with the session's current record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceAction {
    /// Submit the record as the displayed presence.
    Update,
    /// Show no presence.
    Clear,
}

pub struct PresenceSession {
    client: PresenceClient,
    record: PresenceRecord,
}

impl PresenceSession {
    pub fn new(client: PresenceClient) -> Self {
        Self {
            client,
            record: PresenceRecord::default(),
        }
    }

    /// Store the application/Steam id pair used by the next `initialize`.
    pub fn set_app_ids(&mut self, application_id: impl Into<String>, steam_id: Option<String>) {
        self.client.set_identity(application_id, steam_id);
    }

    /// Open the connection with the stored ids.
    pub fn initialize(&mut self, auto_register: bool) {
        self.client.open(auto_register);
    }

    pub fn shutdown(&mut self) {
        self.client.shutdown();
    }

    pub fn poll(&mut self) {
        self.client.poll();
    }

    /// Set the fields most presences need and leave the rest untouched.
    pub fn set_basic_presence(
        &mut self,
        state: impl Into<String>,
        details: impl Into<String>,
        large_image_key: impl Into<String>,
        large_image_text: impl Into<String>,
    ) {
        self.record.state = state.into();
        self.record.details = details.into();
        self.record.large_image_key = large_image_key.into();
        self.record.large_image_text = large_image_text.into();
    }

    /// Replace every editable field at once.
    pub fn set_all_presence(&mut self, record: PresenceRecord) {
        self.record = record;
    }

    /// Stamp the record's start timestamp with the current time, so the
    /// service shows elapsed session time.
    pub fn mark_started(&mut self) {
        self.record.start_timestamp = unix_now();
    }

    /// Put a fresh party id on the record and return it, for hosts that
    /// don't already have a session identifier to reuse.
    pub fn generate_party_id(&mut self) -> &str {
        self.record.party_id = uuid::Uuid::new_v4().to_string();
        debug!(party_id = %self.record.party_id, "Generated party id");
        &self.record.party_id
    }

    /// Push or clear the current record.
    pub fn apply(&mut self, action: PresenceAction) {
        match action {
            PresenceAction::Update => self.client.update_presence(&self.record),
            PresenceAction::Clear => self.client.clear_presence(),
        }
    }

    pub fn record(&self) -> &PresenceRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut PresenceRecord {
        &mut self.record
    }

    pub fn client(&self) -> &PresenceClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut PresenceClient {
        &mut self.client
    }
}
