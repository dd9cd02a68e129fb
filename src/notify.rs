use compact_str::CompactString;
use reqwest::{Client, StatusCode};
use serde::Serialize;

/// Where progress and failure messages are pushed. Never fails the caller.
pub trait Notify {
    async fn notify(&self, content: &str);
}

/// The telegram log service: `POST {url}` with `{"botName", "content"}`.
#[derive(Clone, Debug)]
pub struct Webhook {
    client: Client,
    url: String,
    bot_name: CompactString,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload<'a> {
    pub bot_name: &'a str,
    pub content: &'a str,
}

impl Webhook {
    pub fn new(client: Client, url: impl Into<String>, bot_name: CompactString) -> Self {
        Self {
            client,
            url: url.into(),
            bot_name,
        }
    }
}

impl Notify for Webhook {
    async fn notify(&self, content: &str) {
        let payload = Payload {
            bot_name: &self.bot_name,
            content,
        };
        match self.client.post(&self.url).json(&payload).send().await {
            Ok(resp) if resp.status() == StatusCode::OK => {}
            Ok(resp) => {
                log::warn!(target: "notify", "non-OK response from log service: {}", resp.status());
            }
            Err(e) => log::warn!(target: "notify", "failed to send log: {e:?}"),
        }
    }
}

/// Drops everything; for `--quiet` runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl Notify for Silent {
    async fn notify(&self, _: &str) {}
}

impl<N: Notify> Notify for &N {
    async fn notify(&self, content: &str) {
        (**self).notify(content).await;
    }
}
