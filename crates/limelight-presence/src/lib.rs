//! Host-agnostic rich-presence facade.
//!
//! A flat [`PresenceRecord`] is edited freely by the host, normalized into
//! the service's activity payload shape on demand, and submitted through an
//! opaque [`transport::Transport`]. Service events come back through the
//! same transport and are re-published to registered subscribers during
//! [`PresenceClient::poll`]. The wire protocol to the service itself lives
//! behind the transport boundary and is not implemented in this crate.

pub mod callbacks;
pub mod client;
pub mod protocol;
pub mod record;
pub mod session;
pub mod transport;

pub use client::{ConnectRequest, ConnectionState, PresenceClient};
pub use protocol::{
    Activity, ActivityAssets, ActivityParty, ActivitySecrets, ActivityTimestamps,
};
pub use record::PresenceRecord;
pub use session::{PresenceAction, PresenceSession};
pub use transport::{ChannelTransport, Transport, TransportCommand, TransportEvent, TransportHandle};

pub use limelight_common::{ApplicationIdentity, JoinReply, TransportError, UserData};
