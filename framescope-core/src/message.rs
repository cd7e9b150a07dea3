//! Signed Farcaster frame action messages.
//!
//! Only the subset of the hub protobuf schema a frame action needs is
//! declared here; field tags match the upstream `message.proto`.

use chrono::Utc;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use prost::Message as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Unix time (ms) of 2021-01-01T00:00:00Z, origin of message timestamps.
pub const FARCASTER_EPOCH_MS: i64 = 1_609_459_200_000;

/// Message hashes are BLAKE3 truncated to this many bytes.
pub const HASH_LENGTH: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum MessageType {
    None = 0,
    FrameAction = 13,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum HashScheme {
    None = 0,
    Blake3 = 1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SignatureScheme {
    None = 0,
    Ed25519 = 1,
}

/// Network a message is addressed to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    prost::Enumeration,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum FarcasterNetwork {
    None = 0,
    Mainnet = 1,
    Testnet = 2,
    Devnet = 3,
}

impl fmt::Display for FarcasterNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FarcasterNetwork::None => "none",
            FarcasterNetwork::Mainnet => "mainnet",
            FarcasterNetwork::Testnet => "testnet",
            FarcasterNetwork::Devnet => "devnet",
        };
        f.write_str(name)
    }
}

impl FromStr for FarcasterNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "1" => Ok(FarcasterNetwork::Mainnet),
            "testnet" | "2" => Ok(FarcasterNetwork::Testnet),
            "devnet" | "3" => Ok(FarcasterNetwork::Devnet),
            other => Err(format!(
                "unknown network '{}': expected mainnet, testnet or devnet",
                other
            )),
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CastId {
    #[prost(uint64, tag = "1")]
    pub fid: u64,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FrameActionBody {
    #[prost(bytes = "vec", tag = "1")]
    pub url: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub button_index: u32,
    #[prost(message, optional, tag = "3")]
    pub cast_id: Option<CastId>,
    #[prost(bytes = "vec", tag = "4")]
    pub input_text: Vec<u8>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MessageData {
    #[prost(enumeration = "MessageType", tag = "1")]
    pub r#type: i32,
    #[prost(uint64, tag = "2")]
    pub fid: u64,
    #[prost(uint32, tag = "3")]
    pub timestamp: u32,
    #[prost(enumeration = "FarcasterNetwork", tag = "4")]
    pub network: i32,
    #[prost(oneof = "message_data::Body", tags = "16")]
    pub body: Option<message_data::Body>,
}

pub mod message_data {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Body {
        #[prost(message, tag = "16")]
        FrameActionBody(super::FrameActionBody),
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Message {
    #[prost(message, optional, tag = "1")]
    pub data: Option<MessageData>,
    #[prost(bytes = "vec", tag = "2")]
    pub hash: Vec<u8>,
    #[prost(enumeration = "HashScheme", tag = "3")]
    pub hash_scheme: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub signature: Vec<u8>,
    #[prost(enumeration = "SignatureScheme", tag = "5")]
    pub signature_scheme: i32,
    #[prost(bytes = "vec", tag = "6")]
    pub signer: Vec<u8>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub data_bytes: Option<Vec<u8>>,
}

/// Who a message claims to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignerIdentity {
    pub fid: u64,
    pub network: FarcasterNetwork,
}

/// Seconds since [`FARCASTER_EPOCH_MS`].
pub fn farcaster_time_now() -> u32 {
    let elapsed_ms = Utc::now().timestamp_millis() - FARCASTER_EPOCH_MS;
    (elapsed_ms / 1000).max(0) as u32
}

/// BLAKE3 of `bytes`, truncated to [`HASH_LENGTH`].
pub fn message_hash(bytes: &[u8]) -> Vec<u8> {
    blake3::hash(bytes).as_bytes()[..HASH_LENGTH].to_vec()
}

/// A frame action message, signed and encoded.
#[derive(Debug, Clone)]
pub struct SignedAction {
    pub message: Message,
    /// Protobuf encoding of `message`
    pub bytes: Vec<u8>,
}

impl SignedAction {
    pub fn hash(&self) -> &[u8] {
        &self.message.hash
    }

    pub fn timestamp(&self) -> u32 {
        self.message.data.as_ref().map(|d| d.timestamp).unwrap_or(0)
    }

    /// Hex of the encoded message, as carried in `trustedData.messageBytes`.
    pub fn bytes_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// Builds, hashes and signs a frame action.
pub fn make_frame_action(
    body: FrameActionBody,
    identity: SignerIdentity,
    signing_key: &SigningKey,
    timestamp: u32,
) -> SignedAction {
    let data = MessageData {
        r#type: MessageType::FrameAction as i32,
        fid: identity.fid,
        timestamp,
        network: identity.network as i32,
        body: Some(message_data::Body::FrameActionBody(body)),
    };
    let data_bytes = data.encode_to_vec();
    let hash = message_hash(&data_bytes);
    let signature = signing_key.sign(&hash);

    let message = Message {
        data: Some(data),
        hash,
        hash_scheme: HashScheme::Blake3 as i32,
        signature: signature.to_bytes().to_vec(),
        signature_scheme: SignatureScheme::Ed25519 as i32,
        signer: signing_key.verifying_key().to_bytes().to_vec(),
        data_bytes: None,
    };
    let bytes = message.encode_to_vec();
    SignedAction { message, bytes }
}

/// A frame action whose hash and signature checked out.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedAction {
    pub fid: u64,
    pub network: i32,
    pub timestamp: u32,
    pub body: FrameActionBody,
    pub hash: Vec<u8>,
    pub signer: Vec<u8>,
}

impl VerifiedAction {
    pub fn url(&self) -> String {
        String::from_utf8_lossy(&self.body.url).into_owned()
    }

    pub fn input_text(&self) -> Option<String> {
        if self.body.input_text.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.body.input_text).into_owned())
        }
    }
}

/// Decodes an encoded message and checks its hash and ed25519 signature.
///
/// Only proves the message is self-consistent; whether `signer` belongs to
/// `fid` is a hub lookup this tool does not make.
pub fn verify_message(bytes: &[u8]) -> CoreResult<VerifiedAction> {
    let message = Message::decode(bytes)?;

    if message.hash_scheme != HashScheme::Blake3 as i32 {
        return Err(CoreError::UnsupportedScheme {
            what: "hash",
            value: message.hash_scheme,
        });
    }
    if message.signature_scheme != SignatureScheme::Ed25519 as i32 {
        return Err(CoreError::UnsupportedScheme {
            what: "signature",
            value: message.signature_scheme,
        });
    }

    // When present, `data_bytes` is what was signed and `data` is ignored.
    let (data, data_bytes) = match &message.data_bytes {
        Some(raw) => (MessageData::decode(raw.as_slice())?, raw.clone()),
        None => {
            let data = message.data.clone().ok_or(CoreError::MissingMessageData)?;
            let raw = data.encode_to_vec();
            (data, raw)
        }
    };
    if message_hash(&data_bytes) != message.hash {
        return Err(CoreError::HashMismatch);
    }

    let signer: [u8; 32] = message
        .signer
        .as_slice()
        .try_into()
        .map_err(|_| ed25519_dalek::SignatureError::new())?;
    let verifying_key = VerifyingKey::from_bytes(&signer)?;
    let signature = Signature::from_slice(&message.signature)?;
    verifying_key.verify(&message.hash, &signature)?;

    if data.r#type != MessageType::FrameAction as i32 {
        return Err(CoreError::NotFrameAction);
    }
    let body = match data.body {
        Some(message_data::Body::FrameActionBody(body)) => body,
        None => return Err(CoreError::NotFrameAction),
    };

    Ok(VerifiedAction {
        fid: data.fid,
        network: data.network,
        timestamp: data.timestamp,
        body,
        hash: message.hash,
        signer: message.signer,
    })
}

/// Hex variant of [`verify_message`]; accepts an optional `0x` prefix.
pub fn verify_message_hex(message_bytes: &str) -> CoreResult<VerifiedAction> {
    let trimmed = message_bytes.trim_start_matches("0x");
    let bytes = hex::decode(trimmed).map_err(|e| CoreError::hex("messageBytes", e))?;
    verify_message(&bytes)
}
