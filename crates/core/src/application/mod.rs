// Application Layer - Typed dispatch over the transport port

pub mod dispatch;
pub mod retry;

pub use dispatch::{invoke, invoke_path, invoke_value};
pub use retry::{RetryDecision, RetryPolicy, MAX_BACKOFF_FACTOR, MAX_RETRY_DELAY};
