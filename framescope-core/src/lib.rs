//! Frame interaction engine: signed click simulation and the preview loop.
//!
//! Decoding and encoding of frame meta tags lives in `framescope-meta`; this
//! crate adds everything that touches the network or key material.

pub mod action;
pub mod config;
pub mod error;
pub mod message;
pub mod preview;
pub mod simulator;

pub use action::{parse_post_context, ActionPayload, PostContext, TrustedData, UntrustedData};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use message::{verify_message, verify_message_hex, FarcasterNetwork, SignedAction, VerifiedAction};
pub use preview::{Preview, PreviewClient};
pub use simulator::{ActionSimulator, SimulatedResponse};
