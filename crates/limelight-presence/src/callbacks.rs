//! Subscriber registry for the six service notifications.
//!
//! Subscribers are plain boxed closures kept per notification kind and
//! invoked synchronously, in registration order, while the facade polls.
//! This is the host-agnostic stand-in for an engine's multicast delegates.

use limelight_common::UserData;
use tracing::trace;

use crate::transport::TransportEvent;

type ReadyFn = Box<dyn FnMut(&UserData) + Send>;
type StatusFn = Box<dyn FnMut(i32, &str) + Send>;
type SecretFn = Box<dyn FnMut(&str) + Send>;

/// Per-kind subscriber lists.
#[derive(Default)]
pub struct CallbackRegistry {
    on_ready: Vec<ReadyFn>,
    on_disconnected: Vec<StatusFn>,
    on_errored: Vec<StatusFn>,
    on_join: Vec<SecretFn>,
    on_spectate: Vec<SecretFn>,
    on_join_request: Vec<ReadyFn>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_ready(&mut self, callback: impl FnMut(&UserData) + Send + 'static) {
        self.on_ready.push(Box::new(callback));
    }

    pub fn on_disconnected(&mut self, callback: impl FnMut(i32, &str) + Send + 'static) {
        self.on_disconnected.push(Box::new(callback));
    }

    pub fn on_errored(&mut self, callback: impl FnMut(i32, &str) + Send + 'static) {
        self.on_errored.push(Box::new(callback));
    }

    pub fn on_join(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.on_join.push(Box::new(callback));
    }

    pub fn on_spectate(&mut self, callback: impl FnMut(&str) + Send + 'static) {
        self.on_spectate.push(Box::new(callback));
    }

    pub fn on_join_request(&mut self, callback: impl FnMut(&UserData) + Send + 'static) {
        self.on_join_request.push(Box::new(callback));
    }

    /// Fan one event out to its subscribers, in registration order.
    pub fn dispatch(&mut self, event: &TransportEvent) {
        trace!(?event, "Dispatching notification");
        match event {
            TransportEvent::Ready(user) => {
                for callback in &mut self.on_ready {
                    callback(user);
                }
            }
            TransportEvent::Disconnected { code, message } => {
                for callback in &mut self.on_disconnected {
                    callback(*code, message);
                }
            }
            TransportEvent::Errored { code, message } => {
                for callback in &mut self.on_errored {
                    callback(*code, message);
                }
            }
            TransportEvent::Join { secret } => {
                for callback in &mut self.on_join {
                    callback(secret);
                }
            }
            TransportEvent::Spectate { secret } => {
                for callback in &mut self.on_spectate {
                    callback(secret);
                }
            }
            TransportEvent::JoinRequest(user) => {
                for callback in &mut self.on_join_request {
                    callback(user);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn subscribers_fire_in_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CallbackRegistry::new();

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.on_join(move |_| order.lock().unwrap().push(tag));
        }

        registry.dispatch(&TransportEvent::Join {
            secret: "MTI4NzM0".into(),
        });
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn dispatch_only_reaches_matching_kind() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let mut registry = CallbackRegistry::new();

        let h = Arc::clone(&hits);
        registry.on_errored(move |code, _| h.lock().unwrap().push(("errored", code)));
        let h = Arc::clone(&hits);
        registry.on_disconnected(move |code, _| h.lock().unwrap().push(("disconnected", code)));

        registry.dispatch(&TransportEvent::Errored {
            code: 5005,
            message: "oops".into(),
        });
        assert_eq!(*hits.lock().unwrap(), vec![("errored", 5005)]);
    }

    #[test]
    fn dispatch_without_subscribers_is_quiet() {
        let mut registry = CallbackRegistry::new();
        registry.dispatch(&TransportEvent::Spectate {
            secret: "MTIzNDV".into(),
        });
    }

    #[test]
    fn join_request_passes_full_user() {
        let seen = Arc::new(Mutex::new(None));
        let mut registry = CallbackRegistry::new();

        let s = Arc::clone(&seen);
        registry.on_join_request(move |user| {
            *s.lock().unwrap() = Some(user.clone());
        });

        let user = UserData {
            user_id: "53908232506183680".into(),
            username: "mason".into(),
            discriminator: "1337".into(),
            avatar: String::new(),
        };
        registry.dispatch(&TransportEvent::JoinRequest(user.clone()));
        assert_eq!(seen.lock().unwrap().as_ref(), Some(&user));
    }
}
