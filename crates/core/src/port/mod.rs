// Port Layer - Interfaces for external dependencies

pub mod rule_transport;

// Re-exports
pub use rule_transport::{RawResponse, RuleTransport};
