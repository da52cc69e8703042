//! Fleet-management client implementation of the provisioning boundary.
//!
//! Talks JSON over HTTPS to the fleet management service that deploys and
//! tracks CloudEOS routers. Each request carries a bearer token and a
//! unique correlation id so server-side traces can be matched to a
//! workflow run.

mod api;
mod error;

use std::sync::LazyLock;
use std::time::Duration;

use uuid::Uuid;

use crate::config::FleetConfig;
use crate::descriptor::RouterDescriptor;
use crate::provider::{ProviderFuture, RouterProvider};
use api::{DeletionStatusResponse, RouterPayload, RouterStatusResponse};

pub use error::FleetClientError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const CORRELATION_HEADER: &str = "x-request-id";

static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

/// Joins the service base URL with a router-scoped endpoint path.
fn router_url(base: &str, tf_id: &str, suffix: &str) -> String {
    let trimmed = base.trim_end_matches('/');
    if tf_id.is_empty() {
        format!("{trimmed}/api/v1/routers")
    } else if suffix.is_empty() {
        format!("{trimmed}/api/v1/routers/{tf_id}")
    } else {
        format!("{trimmed}/api/v1/routers/{tf_id}/{suffix}")
    }
}

/// Provisioning client backed by the fleet management HTTP API.
#[derive(Clone, Debug)]
pub struct FleetClient {
    config: FleetConfig,
}

impl FleetClient {
    /// Constructs a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FleetClientError::Config`] when the configuration fails
    /// validation.
    pub fn new(config: FleetConfig) -> Result<Self, FleetClientError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        HTTP_CLIENT
            .request(method, url)
            .bearer_auth(&self.config.api_token)
            .header(CORRELATION_HEADER, Uuid::new_v4().to_string())
    }

    async fn read_success_body(response: reqwest::Response) -> Result<Vec<u8>, FleetClientError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| FleetClientError::Transport {
                message: err.to_string(),
            })?;
        if status.is_success() {
            return Ok(body.to_vec());
        }
        Err(FleetClientError::Api {
            status: status.as_u16(),
            message: String::from_utf8_lossy(&body).into_owned(),
        })
    }

    async fn send_add(&self, descriptor: &RouterDescriptor) -> Result<(), FleetClientError> {
        let url = router_url(&self.config.service_url, "", "");
        let payload = RouterPayload::from(descriptor);
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| FleetClientError::Transport {
                message: err.to_string(),
            })?;
        Self::read_success_body(response).await.map(|_| ())
    }

    async fn send_status(
        &self,
        descriptor: &mut RouterDescriptor,
    ) -> Result<(), FleetClientError> {
        let url = router_url(&self.config.service_url, &descriptor.tf_id, "status");
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|err| FleetClientError::Transport {
                message: err.to_string(),
            })?;
        let body = Self::read_success_body(response).await?;
        let parsed: RouterStatusResponse =
            serde_json::from_slice(&body).map_err(|err| FleetClientError::Decode {
                message: err.to_string(),
            })?;
        descriptor.set_bgp_asn(parsed.bgp_asn);
        descriptor.set_deployment_status(parsed.deployment_status);
        if let Some(instance_id) = parsed.instance_id {
            descriptor.instance_id = Some(instance_id);
        }
        if let Some(public_ip) = parsed.public_ip {
            descriptor.public_ip = Some(public_ip);
        }
        Ok(())
    }

    async fn send_delete(&self, descriptor: &RouterDescriptor) -> Result<(), FleetClientError> {
        let url = router_url(&self.config.service_url, &descriptor.tf_id, "");
        let response = self
            .request(reqwest::Method::DELETE, &url)
            .send()
            .await
            .map_err(|err| FleetClientError::Transport {
                message: err.to_string(),
            })?;
        Self::read_success_body(response).await.map(|_| ())
    }

    async fn send_deletion_check(
        &self,
        descriptor: &RouterDescriptor,
    ) -> Result<(), FleetClientError> {
        let url = router_url(&self.config.service_url, &descriptor.tf_id, "deletion");
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|err| FleetClientError::Transport {
                message: err.to_string(),
            })?;

        // A router the service no longer knows about has been deleted.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        let body = Self::read_success_body(response).await?;
        let parsed: DeletionStatusResponse =
            serde_json::from_slice(&body).map_err(|err| FleetClientError::Decode {
                message: err.to_string(),
            })?;
        if parsed.deleted {
            return Ok(());
        }
        Err(FleetClientError::DeletionPending {
            tf_id: descriptor.tf_id.clone(),
        })
    }
}

impl RouterProvider for FleetClient {
    type Error = FleetClientError;

    fn add_router<'a>(
        &'a self,
        descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(self.send_add(descriptor))
    }

    fn get_router_status<'a>(
        &'a self,
        descriptor: &'a mut RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(self.send_status(descriptor))
    }

    fn delete_router<'a>(
        &'a self,
        descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(self.send_delete(descriptor))
    }

    fn check_router_deletion<'a>(
        &'a self,
        descriptor: &'a RouterDescriptor,
    ) -> ProviderFuture<'a, (), Self::Error> {
        Box::pin(self.send_deletion_check(descriptor))
    }
}
