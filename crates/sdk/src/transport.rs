//! HTTP transport (reqwest)

use crate::config::{ClientConfig, EndpointAddress};
use crate::error::{transport_error, Result, RulesError, TransportErrorKind};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use ruleskit_core::port::{RawResponse, RuleTransport};
use ruleskit_core::OperationPath;
use tracing::trace;

/// POSTs JSON bodies to `{endpoint}/{path}`
///
/// Holds one `reqwest::Client`, whose connection pool is shared by every
/// clone and every concurrent call. Dropping an in-flight `post_json` future
/// aborts the request.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: EndpointAddress,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let endpoint = EndpointAddress::parse(&config.base_url)?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            RulesError::transport(
                TransportErrorKind::Other,
                format!("Failed to create HTTP client: {}", e),
            )
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &EndpointAddress {
        &self.endpoint
    }
}

#[async_trait]
impl RuleTransport for HttpTransport {
    async fn post_json(&self, path: &OperationPath, body: Vec<u8>) -> Result<RawResponse> {
        let url = self.endpoint.join(path)?;
        trace!(url = %url, "POST");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport_error)?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
