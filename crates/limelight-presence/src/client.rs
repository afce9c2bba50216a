//! The connection facade: lifecycle, forwarding, and notification fan-out.

use limelight_common::{ApplicationIdentity, JoinReply, UserData};
use tracing::{debug, info, warn};

use crate::callbacks::CallbackRegistry;
use crate::protocol::Activity;
use crate::record::PresenceRecord;
use crate::transport::{Transport, TransportCommand, TransportEvent};

// ---------------------------------------------------------------------------
// Connection state
// ---------------------------------------------------------------------------

/// Where the facade believes the connection is.
///
/// Driven by `initialize`/`shutdown` and by the ready/disconnected/errored
/// events observed during `poll`. The transport handle itself is only ever
/// installed by `initialize` and released by `shutdown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Uninitialized,
    Connecting,
    Connected,
}

/// What a connector receives when the facade wants a connection.
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    pub identity: ApplicationIdentity,
    /// Ask the service to register this application as the launcher for
    /// its own join/spectate handlers. Forwarded, never interpreted.
    pub auto_register: bool,
}

type Connector = Box<dyn FnMut(&ConnectRequest) -> Box<dyn Transport> + Send>;

// ---------------------------------------------------------------------------
// PresenceClient
// ---------------------------------------------------------------------------

/// Facade over one connection to the rich-presence service.
///
/// Holds no presence content between calls; the only state here is the
/// stored identity, the connection handle, and the subscriber registry.
/// All operations are non-blocking, and none of them reports failure
/// synchronously; problems arrive as errored/disconnected notifications
/// on a later [`poll`](Self::poll). Single-threaded, cooperative use is
/// assumed: the host drives `poll` from its own update loop.
pub struct PresenceClient {
    identity: ApplicationIdentity,
    connector: Connector,
    transport: Option<Box<dyn Transport>>,
    callbacks: CallbackRegistry,
    state: ConnectionState,
}

impl PresenceClient {
    /// Build a facade over a connector. The connector owns the "establish
    /// a connection handle" step, typically pairing a
    /// [`ChannelTransport`](crate::transport::ChannelTransport) with a
    /// bridge task around the actual SDK.
    pub fn new(
        connector: impl FnMut(&ConnectRequest) -> Box<dyn Transport> + Send + 'static,
    ) -> Self {
        Self {
            identity: ApplicationIdentity::default(),
            connector: Box::new(connector),
            transport: None,
            callbacks: CallbackRegistry::new(),
            state: ConnectionState::Uninitialized,
        }
    }

    /// Update the identity used by subsequent `initialize` calls. Has no
    /// effect on an already-open connection.
    pub fn set_identity(
        &mut self,
        application_id: impl Into<String>,
        steam_id: Option<String>,
    ) {
        self.identity = ApplicationIdentity::new(application_id, steam_id);
    }

    pub fn identity(&self) -> &ApplicationIdentity {
        &self.identity
    }

    /// Establish a connection handle using the stored identity.
    ///
    /// Never fails from the caller's perspective: if the service is not
    /// there, that surfaces later as errored/disconnected notifications.
    /// Calling this while a handle is already held closes the old handle
    /// and opens a fresh one; no double-initialize guard beyond that.
    pub fn open(&mut self, auto_register: bool) {
        if let Some(mut previous) = self.transport.take() {
            debug!("Re-initializing, closing previous connection");
            previous.send(TransportCommand::Close);
        }

        let request = ConnectRequest {
            identity: self.identity.clone(),
            auto_register,
        };
        info!(
            application_id = %request.identity.application_id,
            auto_register,
            "Opening rich-presence connection"
        );
        self.transport = Some((self.connector)(&request));
        self.state = ConnectionState::Connecting;
    }

    /// Store the identity, then establish the connection.
    pub fn initialize(
        &mut self,
        application_id: impl Into<String>,
        auto_register: bool,
        steam_id: Option<String>,
    ) {
        self.set_identity(application_id, steam_id);
        self.open(auto_register);
    }

    /// Release the connection handle. Safe without a prior `initialize`
    /// and safe to repeat; also runs on drop so the connection never
    /// outlives the owning scope.
    pub fn shutdown(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            info!("Shutting down rich-presence connection");
            transport.send(TransportCommand::Close);
        }
        self.state = ConnectionState::Uninitialized;
    }

    /// Drain buffered service events and re-publish them to subscribers,
    /// in the order the service delivered them. Cheap and non-blocking;
    /// meant to be called from the host's update loop.
    pub fn poll(&mut self) {
        let Some(transport) = self.transport.as_mut() else {
            return;
        };

        for event in transport.drain() {
            match &event {
                TransportEvent::Ready(user) => {
                    self.state = ConnectionState::Connected;
                    info!(user = %user, "Rich presence connected");
                }
                TransportEvent::Disconnected { code, message } => {
                    self.state = ConnectionState::Uninitialized;
                    info!(code, message = %message, "Rich presence disconnected");
                }
                TransportEvent::Errored { code, message } => {
                    self.state = ConnectionState::Uninitialized;
                    warn!(code, message = %message, "Rich presence error");
                }
                _ => {}
            }
            self.callbacks.dispatch(&event);
        }
    }

    /// Submit `record` as the currently displayed presence. Unset fields
    /// are normalized away; a fully default record is still a valid
    /// submission.
    pub fn update_presence(&mut self, record: &PresenceRecord) {
        let Some(transport) = self.transport.as_mut() else {
            debug!("update_presence before initialize, ignored");
            return;
        };
        let activity = Activity::from(record);
        debug!(state = ?activity.state, details = ?activity.details, "Submitting presence");
        transport.send(TransportCommand::SetActivity(activity));
    }

    /// Show no presence. Distinct from never having submitted one.
    pub fn clear_presence(&mut self) {
        let Some(transport) = self.transport.as_mut() else {
            debug!("clear_presence before initialize, ignored");
            return;
        };
        debug!("Clearing presence");
        transport.send(TransportCommand::ClearActivity);
    }

    /// Answer a join request previously delivered through
    /// [`on_join_request`](Self::on_join_request). The reply is forwarded
    /// even when `user_id` matches no outstanding request; the service
    /// owns that outcome.
    pub fn respond(&mut self, user_id: impl Into<String>, reply: JoinReply) {
        let Some(transport) = self.transport.as_mut() else {
            debug!("respond before initialize, ignored");
            return;
        };
        let user_id = user_id.into();
        debug!(user_id = %user_id, ?reply, "Replying to join request");
        transport.send(TransportCommand::JoinReply { user_id, reply });
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    // -- subscriptions ------------------------------------------------------

    pub fn on_ready(&mut self, callback: impl FnMut(&UserData) + Send + 'static) {
        self.callbacks.on_ready(callback);
    }

    pub fn on_disconnected(&mut self, callback: impl FnMut(i32, &str) + Send + 'static) {
        self.callbacks.on_disconnected(callback);
    }

    pub fn on_errored(&mut self, callback: impl FnMut(i32, &str) + Send + 'static) {
        self.callbacks.on_errored(callback);
    }

    pub fn on_join(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.callbacks.on_join(callback);
    }

    pub fn on_spectate(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.callbacks.on_spectate(callback);
    }

    pub fn on_join_request(&mut self, callback: impl FnMut(&UserData) + Send + 'static) {
        self.callbacks.on_join_request(callback);
    }
}

impl Drop for PresenceClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}
