//! Host-simulation harness for the presence facade.
//!
//! Stands in for a game's update loop: opens a session over a loopback
//! bridge (which plays the part of the external rich-presence SDK),
//! registers subscribers, pushes a presence, answers a join request, and
//! tears down. Useful for watching the full operation contract under
//! `RUST_LOG=limelight=debug`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use limelight_presence::{
    ChannelTransport, ConnectRequest, JoinReply, PresenceAction, PresenceClient,
    PresenceSession, Transport, TransportCommand, TransportEvent, TransportHandle, UserData,
};

/// Loopback stand-in for the external SDK connection: acknowledges the
/// handshake, then answers forwarded commands until closed.
async fn loopback_bridge(request: ConnectRequest, mut handle: TransportHandle) {
    tracing::info!(
        application_id = %request.identity.application_id,
        auto_register = request.auto_register,
        "Bridge: connection established"
    );
    handle.emit(TransportEvent::Ready(UserData {
        user_id: "53908232506183680".into(),
        username: "mason".into(),
        discriminator: "1337".into(),
        avatar: String::new(),
    }));

    while let Some(command) = handle.next_command().await {
        match command {
            TransportCommand::SetActivity(activity) => {
                tracing::info!(state = ?activity.state, "Bridge: presence accepted");
                // A remote player knocks once a presence is visible.
                handle.emit(TransportEvent::JoinRequest(UserData {
                    user_id: "155149108183695360".into(),
                    username: "nelly".into(),
                    discriminator: "0001".into(),
                    avatar: String::new(),
                }));
            }
            TransportCommand::ClearActivity => {
                tracing::info!("Bridge: presence cleared");
            }
            TransportCommand::JoinReply { user_id, reply } => {
                tracing::info!(%user_id, ?reply, "Bridge: join reply forwarded");
            }
            TransportCommand::Close => {
                handle.emit_disconnected(1000, "closed by host");
                return;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("limelight=info".parse().expect("static directive")),
        )
        .init();

    let client = PresenceClient::new(|request: &ConnectRequest| {
        let (transport, handle) = ChannelTransport::pair();
        tokio::spawn(loopback_bridge(request.clone(), handle));
        Box::new(transport) as Box<dyn Transport>
    });
    let mut session = PresenceSession::new(client);

    // A host would route these into its own UI/state instead of logs.
    let pending_requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    {
        let pending = Arc::clone(&pending_requests);
        let client = session.client_mut();
        client.on_ready(|user| tracing::info!(user = %user, "Host: connected"));
        client.on_disconnected(|code, message| {
            tracing::info!(code, message, "Host: disconnected");
        });
        client.on_errored(|code, message| tracing::warn!(code, message, "Host: error"));
        client.on_join(|secret| tracing::info!(secret, "Host: joining a session"));
        client.on_spectate(|secret| tracing::info!(secret, "Host: spectating"));
        client.on_join_request(move |user| {
            tracing::info!(user = %user, "Host: join request received");
            pending.lock().unwrap().push(user.user_id.clone());
        });
    }

    session.set_app_ids("1383904378154651768", None);
    session.initialize(true);

    session.set_basic_presence("In Lobby", "Warmup", "logo", "Limelight");
    session.mark_started();
    session.generate_party_id();
    session.record_mut().party_size = 1;
    session.record_mut().party_max = 4;
    session.apply(PresenceAction::Update);

    // The host's update loop: poll, react, repeat.
    for _tick in 0..20 {
        session.poll();

        let requests: Vec<String> = pending_requests.lock().unwrap().drain(..).collect();
        for user_id in requests {
            session.client_mut().respond(user_id, JoinReply::Accept);
        }

        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    session.apply(PresenceAction::Clear);
    session.poll();
    session.shutdown();
}
