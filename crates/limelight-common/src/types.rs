use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity used when opening a connection to the rich-presence service.
///
/// `application_id` is the id the application was registered under with the
/// service; it must be non-empty for a connection attempt to be meaningful.
/// `steam_id` is only set when the application is also distributed through
/// Steam and wants the service to launch it via Steam.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationIdentity {
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_id: Option<String>,
}

impl ApplicationIdentity {
    pub fn new(application_id: impl Into<String>, steam_id: Option<String>) -> Self {
        Self {
            application_id: application_id.into(),
            steam_id,
        }
    }
}

/// A user as reported by the rich-presence service.
///
/// Inbound only: produced on connect and join-request events. All fields
/// are opaque strings owned by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: String,
    pub username: String,
    pub discriminator: String,
    pub avatar: String,
}

impl fmt::Display for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.discriminator.is_empty() {
            write!(f, "{}", self.username)
        } else {
            write!(f, "{}#{}", self.username, self.discriminator)
        }
    }
}

/// Reply to a join request from another user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinReply {
    Deny,
    Accept,
    Ignore,
}

impl JoinReply {
    /// Wire code understood by the rich-presence service.
    pub fn code(self) -> u8 {
        match self {
            JoinReply::Deny => 0,
            JoinReply::Accept => 1,
            JoinReply::Ignore => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_data_display() {
        let user = UserData {
            user_id: "53908232506183680".into(),
            username: "mason".into(),
            discriminator: "1337".into(),
            avatar: "a_bab14f271d565501444b2ca3be944b25".into(),
        };
        assert_eq!(user.to_string(), "mason#1337");

        let no_tag = UserData {
            username: "mason".into(),
            ..Default::default()
        };
        assert_eq!(no_tag.to_string(), "mason");
    }

    #[test]
    fn join_reply_codes() {
        assert_eq!(JoinReply::Deny.code(), 0);
        assert_eq!(JoinReply::Accept.code(), 1);
        assert_eq!(JoinReply::Ignore.code(), 2);
    }

    #[test]
    fn join_reply_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&JoinReply::Accept).unwrap(),
            "\"accept\""
        );
    }

    #[test]
    fn identity_omits_missing_steam_id() {
        let identity = ApplicationIdentity::new("1383904378154651768", None);
        let json = serde_json::to_value(&identity).unwrap();
        assert!(json.get("steam_id").is_none());

        let with_steam =
            ApplicationIdentity::new("1383904378154651768", Some("1150590".into()));
        let json = serde_json::to_value(&with_steam).unwrap();
        assert_eq!(json["steam_id"], "1150590");
    }
}
