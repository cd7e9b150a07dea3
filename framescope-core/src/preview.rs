//! Preview loop: load a frame, click its buttons, follow the frames that come back.

use framescope_meta::{decode_html, Card};

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::simulator::{ActionSimulator, SimulatedResponse};

/// A frame as the previewer last saw it.
#[derive(Debug, Clone)]
pub struct Preview {
    /// URL the frame was loaded from
    pub url: String,
    pub status: u16,
    pub card: Card,
}

impl Preview {
    /// Where a click on this frame is sent: its declared post URL, or the
    /// URL it was loaded from when it declares none.
    pub fn post_target(&self) -> &str {
        if self.card.post_url.is_empty() {
            &self.url
        } else {
            &self.card.post_url
        }
    }

    /// Host shown next to the frame image.
    pub fn host(&self) -> Option<String> {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

pub struct PreviewClient {
    client: reqwest::Client,
    simulator: ActionSimulator,
}

impl PreviewClient {
    pub fn new(config: &Config) -> CoreResult<Self> {
        let client = config.http_client()?;
        let simulator =
            ActionSimulator::with_client(client.clone(), config.identity(), config.cast_id()?);
        Ok(Self { client, simulator })
    }

    pub fn simulator(&self) -> &ActionSimulator {
        &self.simulator
    }

    /// GETs `url` and decodes the frame it serves.
    pub async fn fetch(&self, url: &str) -> CoreResult<Preview> {
        tracing::info!(url, "fetching frame");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::transport(url, e))?;
        let status = response.status().as_u16();
        let html = response
            .text()
            .await
            .map_err(|e| CoreError::transport(url, e))?;

        let card = decode_html(&html);
        tracing::debug!(url, status, buttons = card.buttons.len(), "decoded frame");
        Ok(Preview {
            url: url.to_string(),
            status,
            card,
        })
    }

    /// Clicks a button of `preview` and returns the frame that comes back.
    pub async fn click(
        &self,
        preview: &Preview,
        button_index: u8,
        input_text: Option<&str>,
    ) -> CoreResult<(Preview, SimulatedResponse)> {
        let target = preview.post_target().to_string();
        let response = self.simulator.simulate(&target, button_index, input_text).await?;
        let next = Preview {
            url: target,
            status: response.status,
            card: response.card.clone(),
        };
        Ok((next, response))
    }
}
