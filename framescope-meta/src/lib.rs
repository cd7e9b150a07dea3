//! # Frame meta-tag codec
//!
//! Reads and writes the `<meta>` tags of the Farcaster frame protocol.
//!
//! ## Features
//! - Permissive decoding of third-party documents into a [`Card`] with a
//!   [`DebugReport`] of everything that looked wrong
//! - Encoding of declarative intent trees into densely numbered button tags
//! - Rendering of the `<head>` document a frame endpoint serves
//!
//! ## Decoding
//! ```ignore
//! use framescope_meta::decode_html;
//!
//! let html = r#"
//! <meta property="fc:frame" content="vNext" />
//! <meta property="fc:frame:image" content="https://x/img.png" />
//! <meta property="fc:frame:button:1" content="Yes" />
//! "#;
//!
//! let card = decode_html(html);
//! assert_eq!(card.buttons[0].title, "Yes");
//! ```
//!
//! ## Encoding
//! ```ignore
//! use framescope_meta::{button, FrameHead};
//!
//! let html = FrameHead::new("https://x/frame")
//!     .render(vec![button("Yes"), button("No")])
//!     .expect("two buttons fit in a frame");
//! ```

pub mod card;
pub mod counter;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod head;
pub mod intent;
pub mod tags;

// --- Core types ---
pub use card::{Button, ButtonType, Card, DebugReport, FrameVersion, MAX_BUTTONS};
pub use counter::ButtonIndexTracker;
pub use error::{MetaError, MetaResult};
pub use head::FrameHead;
pub use intent::{button, deferred, group, meta, IntentNode, Intents, MetaDescriptor};
pub use tags::MetaTag;

// --- Codec entry points ---
pub use decoder::{decode, decode_html};
pub use encoder::{encode, encode_checked};
pub use tags::extract_meta_tags;

/// Encodes `intents` and renders them as bare meta tags, without the fixed
/// frame head.
pub fn render_intents(intents: impl Into<Intents>) -> String {
    encode(intents)
        .iter()
        .map(MetaDescriptor::to_html)
        .collect::<Vec<_>>()
        .join("\n")
}
