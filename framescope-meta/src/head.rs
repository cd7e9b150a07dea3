use serde::{Deserialize, Serialize};

use crate::card::FrameVersion;
use crate::decoder::{PROPERTY_IMAGE, PROPERTY_OG_IMAGE, PROPERTY_POST_URL, PROPERTY_VERSION};
use crate::encoder::encode_checked;
use crate::error::{MetaError, MetaResult};
use crate::intent::{Intents, MetaDescriptor};

/// Suffix appended to a frame URL to address its generated image.
pub const IMAGE_SUFFIX: &str = "_og";

/// The fixed part of the document a frame endpoint serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameHead {
    /// URL the frame is served from; also its post target
    pub url: String,
    pub version: FrameVersion,
    /// Image URL; `{url}_og` when not set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FrameHead {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            version: FrameVersion::default(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Image URL the head advertises
    pub fn image_url(&self) -> String {
        self.image_url
            .clone()
            .unwrap_or_else(|| format!("{}{}", self.url, IMAGE_SUFFIX))
    }

    /// Version, image and post target tags, in the order they are emitted.
    pub fn fixed_tags(&self) -> Vec<MetaDescriptor> {
        let image_url = self.image_url();
        vec![
            MetaDescriptor::new(PROPERTY_VERSION, self.version.as_str()),
            MetaDescriptor::new(PROPERTY_IMAGE, image_url.clone()),
            MetaDescriptor::new(PROPERTY_OG_IMAGE, image_url),
            MetaDescriptor::new(PROPERTY_POST_URL, self.url.clone()),
        ]
    }

    /// Renders the full document: fixed tags followed by the encoded intents.
    ///
    /// Fails on an empty URL or when the intents hold more than four buttons.
    pub fn render(&self, intents: impl Into<Intents>) -> MetaResult<String> {
        if self.url.is_empty() {
            return Err(MetaError::EmptyUrl);
        }
        let encoded = encode_checked(intents)?;

        let mut out = String::from("<!DOCTYPE html><html lang=\"en\"><head>");
        for descriptor in self.fixed_tags().iter().chain(encoded.iter()) {
            out.push_str(&descriptor.to_html());
        }
        out.push_str("</head></html>");
        Ok(out)
    }
}
