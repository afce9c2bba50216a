use limelight_common::{JoinReply, UserData};

use crate::protocol::Activity;

// ---------------------------------------------------------------------------
// Commands & Events
// ---------------------------------------------------------------------------

/// Operations forwarded to the service connection.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCommand {
    /// Replace the currently displayed presence.
    SetActivity(Activity),
    /// Explicitly show no presence. Distinct from never submitting one.
    ClearActivity,
    /// Answer a previously received join request. The service owns the
    /// outcome when `user_id` matches no outstanding request.
    JoinReply { user_id: String, reply: JoinReply },
    /// Release the connection.
    Close,
}

/// Events the service connection delivers back, in the order they
/// occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// The local user authenticated with the service.
    Ready(UserData),
    Disconnected { code: i32, message: String },
    Errored { code: i32, message: String },
    /// The local user accepted an invite; carries the join secret.
    Join { secret: String },
    /// The local user chose to spectate; carries the spectate secret.
    Spectate { secret: String },
    /// A remote user asks to join; the host should eventually answer with
    /// a [`TransportCommand::JoinReply`].
    JoinRequest(UserData),
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// One open connection handle to the rich-presence service.
///
/// Implementations wrap the actual SDK/IPC machinery. Both methods must be
/// non-blocking: `send` is best-effort (failures surface later as drained
/// events, never as return values) and `drain` only returns what the
/// service has already buffered.
pub trait Transport: Send {
    fn send(&mut self, command: TransportCommand);

    fn drain(&mut self) -> Vec<TransportEvent>;
}
