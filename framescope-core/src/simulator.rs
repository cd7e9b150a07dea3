//! Simulated frame clicks.
//!
//! Every click signs a fresh action with a fresh ed25519 key, POSTs the
//! envelope to the frame, and decodes whatever HTML comes back.

use ed25519_dalek::SigningKey;
use framescope_meta::{decode_html, Card, MetaError, MAX_BUTTONS};
use rand::rngs::OsRng;
use reqwest::header::{CONTENT_TYPE, LOCATION};

use crate::action::ActionPayload;
use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::message::{
    farcaster_time_now, make_frame_action, CastId, FrameActionBody, SignedAction, SignerIdentity,
};

/// What a frame answered to a simulated click.
#[derive(Debug, Clone)]
pub struct SimulatedResponse {
    pub status: u16,
    /// `Location` header of a redirect; redirects are not followed
    pub location: Option<String>,
    pub body: String,
    /// The next frame, decoded from `body`
    pub card: Card,
    /// Envelope that was sent
    pub payload: ActionPayload,
}

impl SimulatedResponse {
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}

pub struct ActionSimulator {
    client: reqwest::Client,
    identity: SignerIdentity,
    cast_id: CastId,
}

impl ActionSimulator {
    pub fn new(config: &Config) -> CoreResult<Self> {
        Ok(Self::with_client(
            config.http_client()?,
            config.identity(),
            config.cast_id()?,
        ))
    }

    pub fn with_client(client: reqwest::Client, identity: SignerIdentity, cast_id: CastId) -> Self {
        Self {
            client,
            identity,
            cast_id,
        }
    }

    pub fn identity(&self) -> SignerIdentity {
        self.identity
    }

    /// Signs a click with a freshly generated key and builds its envelope.
    pub fn build_payload(
        &self,
        url: &str,
        button_index: u8,
        input_text: Option<&str>,
    ) -> CoreResult<(ActionPayload, SignedAction)> {
        if button_index == 0 || button_index as usize > MAX_BUTTONS {
            return Err(MetaError::InvalidButtonIndex {
                index: button_index as u32,
            }
            .into());
        }

        let signing_key = SigningKey::generate(&mut OsRng);
        let body = FrameActionBody {
            url: url.as_bytes().to_vec(),
            button_index: button_index as u32,
            cast_id: Some(self.cast_id.clone()),
            input_text: input_text.map(|t| t.as_bytes().to_vec()).unwrap_or_default(),
        };
        let signed = make_frame_action(body, self.identity, &signing_key, farcaster_time_now());
        let payload = ActionPayload::from_signed(&signed, url, button_index, input_text)?;
        Ok((payload, signed))
    }

    /// POSTs a signed click to `url` and decodes the frame it returns.
    ///
    /// Transport failures are returned as-is; there is no retry.
    pub async fn simulate(
        &self,
        url: &str,
        button_index: u8,
        input_text: Option<&str>,
    ) -> CoreResult<SimulatedResponse> {
        let (payload, _) = self.build_payload(url, button_index, input_text)?;
        let body = serde_json::to_vec(&payload)?;

        tracing::info!(url, button_index, fid = self.identity.fid, "simulating frame click");
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| CoreError::transport(url, e))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response
            .text()
            .await
            .map_err(|e| CoreError::transport(url, e))?;

        if location.is_some() {
            tracing::warn!(url, status, ?location, "frame answered with a redirect; not following");
        }

        let card = decode_html(&text);
        Ok(SimulatedResponse {
            status,
            location,
            body: text,
            card,
            payload,
        })
    }
}
