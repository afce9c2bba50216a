//! Channel-backed transport bridging the poll loop to an async SDK task.

use limelight_common::TransportError;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::types::{Transport, TransportCommand, TransportEvent};

// ---------------------------------------------------------------------------
// ChannelTransport
// ---------------------------------------------------------------------------

/// Facade-side half of a command/event channel pair.
///
/// Commands go out through an unbounded sender so `send` never blocks the
/// host's update loop; events are drained with `try_recv` so `drain` never
/// does either. When the bridge task has gone away, one locally
/// synthesized error event is reported and further commands are dropped.
pub struct ChannelTransport {
    command_tx: mpsc::UnboundedSender<TransportCommand>,
    event_rx: mpsc::UnboundedReceiver<TransportEvent>,
    /// Set once the command channel is observed closed, so the failure is
    /// reported exactly once.
    bridge_gone: bool,
    pending_local: Vec<TransportEvent>,
}

impl ChannelTransport {
    /// Create a connected transport/handle pair. The handle goes to the
    /// task that owns the actual service connection.
    pub fn pair() -> (Self, TransportHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let transport = Self {
            command_tx,
            event_rx,
            bridge_gone: false,
            pending_local: Vec::new(),
        };
        let handle = TransportHandle {
            command_rx,
            event_tx,
        };
        (transport, handle)
    }

    fn report_bridge_gone(&mut self) {
        if self.bridge_gone {
            return;
        }
        self.bridge_gone = true;
        let err = TransportError::Unavailable("bridge task is gone".into());
        warn!(error = %err, "Transport bridge dropped");
        self.pending_local.push(TransportEvent::Errored {
            code: err.code(),
            message: err.to_string(),
        });
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, command: TransportCommand) {
        if self.command_tx.send(command).is_err() {
            self.report_bridge_gone();
        }
    }

    fn drain(&mut self) -> Vec<TransportEvent> {
        let mut events = std::mem::take(&mut self.pending_local);
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => events.push(event),
                Err(mpsc::error::TryRecvError::Empty) => break,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.report_bridge_gone();
                    events.append(&mut self.pending_local);
                    break;
                }
            }
        }
        events
    }
}

// ---------------------------------------------------------------------------
// TransportHandle
// ---------------------------------------------------------------------------

/// Bridge-side half: the task owning the service connection receives
/// commands here and pushes events back.
pub struct TransportHandle {
    command_rx: mpsc::UnboundedReceiver<TransportCommand>,
    event_tx: mpsc::UnboundedSender<TransportEvent>,
}

impl TransportHandle {
    /// Wait for the next forwarded command. `None` once the facade side
    /// has been dropped.
    pub async fn next_command(&mut self) -> Option<TransportCommand> {
        self.command_rx.recv().await
    }

    /// Non-blocking variant for bridges with their own select loop.
    pub fn try_next_command(&mut self) -> Option<TransportCommand> {
        self.command_rx.try_recv().ok()
    }

    /// Push a service event toward the facade. Dropped silently if the
    /// facade is gone; the bridge is expected to shut down on its own
    /// once `next_command` returns `None`.
    pub fn emit(&self, event: TransportEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("Facade dropped, event discarded");
        }
    }

    /// Report a transport-level failure as an errored event.
    pub fn emit_error(&self, error: TransportError) {
        self.emit(TransportEvent::Errored {
            code: error.code(),
            message: error.to_string(),
        });
    }

    /// Report the connection as closed.
    pub fn emit_disconnected(&self, code: i32, message: impl Into<String>) {
        self.emit(TransportEvent::Disconnected {
            code,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limelight_common::{errors::codes, UserData};

    #[tokio::test]
    async fn commands_reach_the_bridge() {
        let (mut transport, mut handle) = ChannelTransport::pair();

        transport.send(TransportCommand::ClearActivity);
        transport.send(TransportCommand::Close);

        assert_eq!(
            handle.next_command().await,
            Some(TransportCommand::ClearActivity)
        );
        assert_eq!(handle.next_command().await, Some(TransportCommand::Close));
    }

    #[tokio::test]
    async fn events_drain_in_arrival_order() {
        let (mut transport, handle) = ChannelTransport::pair();

        handle.emit(TransportEvent::JoinRequest(UserData {
            user_id: "a".into(),
            ..Default::default()
        }));
        handle.emit(TransportEvent::Ready(UserData {
            user_id: "b".into(),
            ..Default::default()
        }));

        let events = transport.drain();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], TransportEvent::JoinRequest(u) if u.user_id == "a"));
        assert!(matches!(&events[1], TransportEvent::Ready(u) if u.user_id == "b"));

        // Nothing buffered, nothing drained.
        assert!(transport.drain().is_empty());
    }

    #[tokio::test]
    async fn dropped_bridge_reports_unavailable_once() {
        let (mut transport, handle) = ChannelTransport::pair();
        drop(handle);

        transport.send(TransportCommand::ClearActivity);
        let events = transport.drain();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            TransportEvent::Errored { code, .. } if *code == codes::TRANSPORT_UNAVAILABLE
        ));

        // Reported once, not per call.
        transport.send(TransportCommand::ClearActivity);
        assert!(transport.drain().is_empty());
    }

    #[tokio::test]
    async fn emit_error_carries_taxonomy_code() {
        let (mut transport, handle) = ChannelTransport::pair();
        handle.emit_error(TransportError::AuthenticationFailed {
            code: 4004,
            message: "invalid application id".into(),
        });
        handle.emit_disconnected(1000, "service closed the pipe");

        let events = transport.drain();
        assert!(matches!(&events[0], TransportEvent::Errored { code: 4004, .. }));
        assert!(
            matches!(&events[1], TransportEvent::Disconnected { code, message }
                if *code == 1000 && message == "service closed the pipe")
        );
    }

    #[tokio::test]
    async fn bridge_sees_none_after_facade_drop() {
        let (transport, mut handle) = ChannelTransport::pair();
        drop(transport);
        assert_eq!(handle.next_command().await, None);
    }
}
