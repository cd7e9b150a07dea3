//! JSON envelope carried by a frame POST.
//!
//! `untrustedData` is a plain mirror of the action for convenience;
//! `trustedData.messageBytes` is the signed message it must agree with.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::message::{verify_message_hex, SignedAction, VerifiedAction};

/// `0x`-prefixed lowercase hex.
pub fn to_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastIdJson {
    pub fid: u64,
    pub hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_index: Option<u8>,
    pub cast_id: CastIdJson,
    pub fid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    pub message_hash: String,
    pub network: i32,
    pub timestamp: u32,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    pub message_bytes: String,
}

/// Body of a simulated click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    pub untrusted_data: UntrustedData,
    pub trusted_data: TrustedData,
}

impl ActionPayload {
    /// Mirrors a signed action into the envelope a frame server expects.
    pub fn from_signed(
        signed: &SignedAction,
        url: &str,
        button_index: u8,
        input_text: Option<&str>,
    ) -> CoreResult<Self> {
        let data = signed
            .message
            .data
            .as_ref()
            .ok_or(CoreError::MissingMessageData)?;
        let cast_id = match &data.body {
            Some(crate::message::message_data::Body::FrameActionBody(body)) => {
                body.cast_id.clone().unwrap_or_default()
            }
            None => return Err(CoreError::NotFrameAction),
        };

        Ok(Self {
            untrusted_data: UntrustedData {
                button_index: Some(button_index),
                cast_id: CastIdJson {
                    fid: cast_id.fid,
                    hash: to_prefixed_hex(&cast_id.hash),
                },
                fid: data.fid,
                input_text: input_text.map(str::to_string),
                message_hash: to_prefixed_hex(signed.hash()),
                network: data.network,
                timestamp: data.timestamp,
                url: url.to_string(),
            },
            trusted_data: TrustedData {
                message_bytes: signed.bytes_hex(),
            },
        })
    }
}

/// What a frame endpoint received in a POST body.
///
/// Either member may be missing; an unparseable body yields both missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostContext {
    #[serde(default)]
    pub untrusted_data: Option<UntrustedData>,
    #[serde(default)]
    pub trusted_data: Option<TrustedData>,
}

impl PostContext {
    pub fn is_empty(&self) -> bool {
        self.untrusted_data.is_none() && self.trusted_data.is_none()
    }

    /// Checks `trustedData.messageBytes` and returns the action it signs.
    pub fn verify(&self) -> CoreResult<VerifiedAction> {
        let trusted = self.trusted_data.as_ref().ok_or(CoreError::MissingTrustedData)?;
        verify_message_hex(&trusted.message_bytes)
    }
}

/// Reads a POST body, tolerating anything that is not a valid envelope.
///
/// The two members are read independently, so a malformed `untrustedData`
/// does not hide a valid `trustedData` and vice versa.
pub fn parse_post_context(body: &[u8]) -> PostContext {
    let value: serde_json::Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(error = %e, "ignoring unparseable frame POST body");
            return PostContext::default();
        }
    };

    PostContext {
        untrusted_data: member(&value, "untrustedData"),
        trusted_data: member(&value, "trustedData"),
    }
}

fn member<T: serde::de::DeserializeOwned>(value: &serde_json::Value, name: &str) -> Option<T> {
    let raw = value.get(name)?;
    match T::deserialize(raw) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!(member = name, error = %e, "ignoring malformed POST member");
            None
        }
    }
}
