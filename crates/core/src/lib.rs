// RulesKit Core - Operation Catalog, Shapes & Dispatch
// NO transport dependencies (ADR-001: Hexagonal Architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::dispatch::{invoke, invoke_path};
pub use application::retry::RetryPolicy;
pub use domain::{Operation, OperationDescriptor, OperationPath, CATALOG};
pub use error::{Result, RulesError, TransportErrorKind};
pub use port::{RawResponse, RuleTransport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
