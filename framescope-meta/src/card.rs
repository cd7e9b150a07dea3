use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MetaError;

/// Highest button index the protocol supports.
pub const MAX_BUTTONS: usize = 4;

/// Post URLs longer than this many characters are flagged in the debug report.
pub const MAX_POST_URL_LENGTH: usize = 2048;

/// Protocol version carried by the `fc:frame` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameVersion {
    #[default]
    #[serde(rename = "vNext")]
    VNext,
}

impl FrameVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameVersion::VNext => "vNext",
        }
    }
}

impl fmt::Display for FrameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameVersion {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vNext" => Ok(FrameVersion::VNext),
            other => Err(MetaError::InvalidVersion {
                value: other.to_string(),
            }),
        }
    }
}

/// What a client does when the button is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonType {
    #[default]
    Post,
    PostRedirect,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Post => "post",
            ButtonType::PostRedirect => "post_redirect",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ButtonType {
    type Err = MetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(ButtonType::Post),
            "post_redirect" => Ok(ButtonType::PostRedirect),
            other => Err(MetaError::InvalidButtonAction {
                value: other.to_string(),
            }),
        }
    }
}

/// A single frame button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// 1-based position, always within `1..=4`
    pub index: u8,
    /// Display text
    pub title: String,
    #[serde(rename = "type")]
    pub button_type: ButtonType,
    /// Content of `fc:frame:button:<n>:target`, when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Button {
    pub fn new(index: u8, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            button_type: ButtonType::Post,
            target: None,
        }
    }
}

/// A decoded frame.
///
/// Produced by [`crate::decoder::decode`] from any document, however broken;
/// see [`DebugReport`] for what went wrong along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub version: FrameVersion,
    /// Content of `fc:frame:image`, empty when the tag is absent
    pub image_url: String,
    pub post_url: String,
    /// Content of `og:title`
    pub title: String,
    /// Placeholder of the text field, when the frame declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    /// Sorted ascending by index
    pub buttons: Vec<Button>,
    pub debug: DebugReport,
}

impl Card {
    /// Looks up a button by its 1-based index.
    pub fn button(&self, index: u8) -> Option<&Button> {
        self.buttons.iter().find(|b| b.index == index)
    }

    /// True when the frame asks the client for a text input.
    pub fn has_input(&self) -> bool {
        self.input_text.is_some()
    }
}

/// Diagnostics collected while decoding a frame.
///
/// Purely informational: nothing recorded here stops a [`Card`] from being
/// produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugReport {
    pub buttons: Vec<Button>,
    /// Set when any button tag repeated, went backwards, or skipped an index
    pub buttons_are_out_of_order: bool,
    /// Set when `fc:frame:image` is missing and clients fall back to `og:image`
    pub fallback_image_to_url: bool,
    /// Outer HTML of every meta tag in the document
    pub html_tags: Vec<String>,
    /// Content of `og:image`
    pub image: String,
    pub image_url: String,
    /// Indices of the button tags that tripped the ordering check
    pub invalid_buttons: Vec<u8>,
    pub post_url: String,
    pub post_url_too_long: bool,
    pub valid: bool,
    pub version: FrameVersion,
    /// Indices whose `:action` override was neither `post` nor `post_redirect`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_button_actions: Vec<u8>,
    /// Raw `fc:frame` content when it names a version this tool does not know
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsupported_version: Option<String>,
}

impl DebugReport {
    /// True when any diagnostic flag is raised.
    pub fn has_problems(&self) -> bool {
        self.buttons_are_out_of_order
            || self.post_url_too_long
            || !self.unknown_button_actions.is_empty()
            || self.unsupported_version.is_some()
    }
}
