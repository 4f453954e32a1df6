//! RulesKit SDK - Rust Client Library
//!
//! Typed client for the RulesKit rule-evaluation service. Each rule is a
//! named remote operation taking one JSON input shape and returning one JSON
//! output shape over HTTP POST.
//!
//! # Example
//!
//! ```no_run
//! use ruleskit_sdk::shapes::{BBox, DynamicKerningInput};
//! use ruleskit_sdk::{ClientConfig, RulesError, RulesKitClient};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("http://127.0.0.1:8000").with_timeout(Duration::from_secs(5));
//!     let client = RulesKitClient::with_config(config)?;
//!
//!     let input = DynamicKerningInput {
//!         dynamic_bbox: BBox::new(10.0, -3.0, 2.5, 1.2),
//!         hairpin_bbox: Some(BBox::new(13.0, -2.8, 8.0, 0.8)),
//!         lyric_bbox: None,
//!     };
//!
//!     match client.dynamic_kerning(&input).await {
//!         Ok(output) => println!("dynamic at {:?}", output.dynamic_position),
//!         Err(RulesError::ServerRejection { status, body }) => {
//!             eprintln!("rule service said {}: {}", status, body)
//!         }
//!         Err(e) => return Err(e.into()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod transport;

pub use client::RulesKitClient;
pub use config::{ClientConfig, EndpointAddress, DEFAULT_USER_AGENT};
pub use error::{Result, RulesError, TransportErrorKind};
pub use transport::HttpTransport;

pub use ruleskit_core::application::RetryPolicy;
pub use ruleskit_core::domain::catalog;
pub use ruleskit_core::domain::shapes;
pub use ruleskit_core::port::{RawResponse, RuleTransport};
pub use ruleskit_core::{Operation, OperationDescriptor, OperationPath};
