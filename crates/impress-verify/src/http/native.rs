//! Native HTTP client using reqwest

use super::{HttpError, HttpResponse};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Shared outbound client; every request is bounded by the configured timeout
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, HttpError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Build {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    pub async fn get(&self, url: &str) -> Result<HttpResponse, HttpError> {
        self.get_with_user_agent(url, &self.user_agent).await
    }

    /// GET with a per-request User-Agent, for registries that reject unknown clients
    pub async fn get_with_user_agent(
        &self,
        url: &str,
        user_agent: &str,
    ) -> Result<HttpResponse, HttpError> {
        let url = reqwest::Url::parse(url).map_err(|_| HttpError::InvalidUrl {
            url: url.to_string(),
        })?;

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else {
                HttpError::Body {
                    message: e.to_string(),
                }
            }
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn map_send_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else {
        HttpError::RequestFailed {
            message: e.to_string(),
        }
    }
}
