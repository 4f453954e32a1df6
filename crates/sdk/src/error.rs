//! SDK Error Types
//!
//! The SDK reports everything through [`RulesError`]; this module only maps
//! reqwest failures onto its transport kinds.

pub use ruleskit_core::error::{Result, RulesError, TransportErrorKind};

/// Map a reqwest failure to `RulesError::Transport`
///
/// Timeouts are checked first: reqwest flags an elapsed connect timeout as
/// both a timeout and a connect error.
pub(crate) fn transport_error(err: reqwest::Error) -> RulesError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    };

    RulesError::transport(kind, err.to_string())
}
