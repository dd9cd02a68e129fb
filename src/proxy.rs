use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    scrape::Page,
    util::encode_component,
};

/// What the proxy answers to every relayed request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub error: String,
    pub error_code: i64,
    pub content: String,
}

impl Envelope {
    pub const OK: i64 = 200;

    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            error: String::new(),
            error_code: Self::OK,
            content: content.into(),
        }
    }

    pub fn failure(error_code: i64, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_code,
            content: String::new(),
        }
    }

    /// The relayed body, or the proxy's message when the status is not 200.
    pub fn into_content(self) -> Result<String> {
        if self.error_code == Self::OK {
            Ok(self.content)
        } else {
            Err(Error::Remote {
                code: self.error_code,
                message: self.error,
            })
        }
    }
}

/// Relays requests for absolute target URLs.
pub trait Transport {
    async fn get(&self, target: &str) -> Result<Envelope>;

    /// POSTs `body` verbatim as `application/json`.
    async fn post_json(&self, target: &str, body: String) -> Result<Envelope>;
}

impl<T: Transport> Transport for &T {
    async fn get(&self, target: &str) -> Result<Envelope> {
        (**self).get(target).await
    }

    async fn post_json(&self, target: &str, body: String) -> Result<Envelope> {
        (**self).post_json(target, body).await
    }
}

/// Fetches `target` through `transport` and parses the relayed markup.
pub async fn fetch_page<T: Transport>(transport: &T, target: &str) -> Result<Page> {
    let content = transport.get(target).await?.into_content()?;
    Ok(Page::parse(&content))
}

#[derive(Clone, Debug)]
pub struct ProxyClient {
    client: Client,
    host: String,
}

impl ProxyClient {
    pub fn new(client: Client, host: impl Into<String>) -> Self {
        Self {
            client,
            host: host.into(),
        }
    }

    pub fn relay_url(&self, target: &str) -> String {
        format!("{}/?url={}", self.host, encode_component(target))
    }

    async fn envelope(response: reqwest::Response) -> Result<Envelope> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(Error::Envelope)
    }
}

impl Transport for ProxyClient {
    async fn get(&self, target: &str) -> Result<Envelope> {
        let url = self.relay_url(target);
        tracing::debug!(target: "proxy", "GET {target}");
        let response = self.client.get(url).send().await?;
        Self::envelope(response).await
    }

    async fn post_json(&self, target: &str, body: String) -> Result<Envelope> {
        let url = self.relay_url(target);
        tracing::debug!(target: "proxy", "POST {target} ({} bytes)", body.len());
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        Self::envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_status() {
        assert_eq!(Envelope::ok("<p>").into_content().unwrap(), "<p>");

        let err = Envelope::failure(500, "server error").into_content().unwrap_err();
        assert!(matches!(err, Error::Remote { code: 500, .. }));
        assert!(err.to_string().contains("server error"));
    }

    #[test]
    fn missing_fields_are_a_failure() {
        let envelope: Envelope = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert_eq!(envelope.error_code, 0);
        assert!(envelope.into_content().is_err());
    }

    #[test]
    fn relay_url_encodes_target() {
        let proxy = ProxyClient::new(Client::new(), "http://proxy:8080");
        assert_eq!(
            proxy.relay_url("https://t.test/a.php?x=1&y=2"),
            "http://proxy:8080/?url=https%3A%2F%2Ft.test%2Fa.php%3Fx%3D1%26y%3D2"
        );
    }
}
