/// Numeric codes attached to locally originated error notifications.
///
/// Codes reported by the rich-presence service itself are forwarded
/// verbatim and are not drawn from this set.
pub mod codes {
    pub const TRANSPORT_UNAVAILABLE: i32 = 1;
    pub const AUTHENTICATION_FAILED: i32 = 2;
    pub const INVALID_JOIN_RESPONSE_TARGET: i32 = 3;
    pub const DISCONNECTED: i32 = 4;
}

/// Failures originating at the transport boundary.
///
/// These never surface as return values from facade operations; they are
/// reported asynchronously through the errored/disconnected notifications.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("transport unavailable: {0}")]
    Unavailable(String),

    #[error("authentication failed (code {code}): {message}")]
    AuthenticationFailed { code: i32, message: String },

    #[error("no outstanding join request from user {0}")]
    InvalidJoinResponseTarget(String),

    #[error("disconnected (code {code}): {message}")]
    Disconnected { code: i32, message: String },
}

impl TransportError {
    /// Code used when this error is reported as a notification.
    ///
    /// Service-originated errors keep the code the service assigned;
    /// locally detected ones use the `codes` constants.
    pub fn code(&self) -> i32 {
        match self {
            TransportError::Unavailable(_) => codes::TRANSPORT_UNAVAILABLE,
            TransportError::AuthenticationFailed { code, .. } => *code,
            TransportError::InvalidJoinResponseTarget(_) => {
                codes::INVALID_JOIN_RESPONSE_TARGET
            }
            TransportError::Disconnected { code, .. } => *code,
        }
    }
}
