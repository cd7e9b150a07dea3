//! Meta-tag decoder: tag list in, best-effort [`Card`] out.
//!
//! Target documents are third-party and may be arbitrarily malformed, so
//! nothing in here returns an error. Problems are recorded in the card's
//! [`DebugReport`] and decoding carries on with defaults.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use crate::card::{Button, ButtonType, Card, DebugReport, FrameVersion, MAX_POST_URL_LENGTH};
use crate::tags::{extract_meta_tags, MetaTag};

pub const PROPERTY_VERSION: &str = "fc:frame";
pub const PROPERTY_IMAGE: &str = "fc:frame:image";
pub const PROPERTY_INPUT_TEXT: &str = "fc:frame:input:text";
pub const PROPERTY_POST_URL: &str = "fc:frame:post_url";
pub const PROPERTY_OG_IMAGE: &str = "og:image";
pub const PROPERTY_OG_TITLE: &str = "og:title";
/// Prefix of every button property; provisional intent leaves carry it bare.
pub const PROPERTY_BUTTON: &str = "fc:frame:button";

const FIXED_PROPERTIES: &[&str] = &[
    PROPERTY_VERSION,
    PROPERTY_IMAGE,
    PROPERTY_INPUT_TEXT,
    PROPERTY_POST_URL,
    PROPERTY_OG_IMAGE,
    PROPERTY_OG_TITLE,
];

fn button_regex() -> &'static Regex {
    static BUTTON_REGEX: OnceLock<Regex> = OnceLock::new();
    BUTTON_REGEX.get_or_init(|| {
        Regex::new(r"^fc:frame:button:(1|2|3|4)(?::(action|target))?$").unwrap()
    })
}

/// A button property name split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonProperty {
    /// `fc:frame:button:<n>`
    Title(u8),
    /// `fc:frame:button:<n>:action`
    Action(u8),
    /// `fc:frame:button:<n>:target`
    Target(u8),
}

/// Matches `fc:frame:button:<1-4>` with an optional `:action`/`:target` suffix.
pub fn parse_button_property(property: &str) -> Option<ButtonProperty> {
    let caps = button_regex().captures(property)?;
    let index: u8 = caps.get(1)?.as_str().parse().ok()?;
    match caps.get(2).map(|m| m.as_str()) {
        None => Some(ButtonProperty::Title(index)),
        Some("action") => Some(ButtonProperty::Action(index)),
        Some("target") => Some(ButtonProperty::Target(index)),
        Some(_) => None,
    }
}

/// Tracks the ordering of plain button tags as they are met.
#[derive(Debug, Default)]
struct OrderingCheck {
    current: u8,
    out_of_order: bool,
    missing: bool,
}

impl OrderingCheck {
    /// Feeds one index; returns true when the tag must be listed as invalid.
    fn observe(&mut self, index: u8) -> bool {
        if self.current >= index {
            self.out_of_order = true;
        }
        if self.current + 1 == index {
            self.current = index;
        } else {
            self.missing = true;
        }
        self.out_of_order || self.missing
    }

    fn tripped(&self) -> bool {
        self.out_of_order || self.missing
    }
}

/// Decodes a frame from an HTML document.
pub fn decode_html(html: &str) -> Card {
    decode(&extract_meta_tags(html))
}

/// Decodes a frame from its meta tags, in document order.
pub fn decode(tags: &[MetaTag]) -> Card {
    let mut properties: HashMap<&str, &str> = HashMap::new();
    let mut titles: BTreeMap<u8, String> = BTreeMap::new();
    let mut actions: HashMap<u8, &str> = HashMap::new();
    let mut targets: HashMap<u8, &str> = HashMap::new();
    let mut invalid_buttons: Vec<u8> = Vec::new();
    let mut ordering = OrderingCheck::default();

    for tag in tags {
        let Some(property) = tag.property.as_deref() else {
            continue;
        };
        let content = tag.content.as_deref().unwrap_or("");

        if let Some(&name) = FIXED_PROPERTIES.iter().find(|&&p| p == property) {
            properties.insert(name, content);
            continue;
        }

        match parse_button_property(property) {
            Some(ButtonProperty::Action(index)) => {
                actions.insert(index, content);
            }
            Some(ButtonProperty::Target(index)) => {
                targets.insert(index, content);
            }
            Some(ButtonProperty::Title(index)) => {
                if ordering.observe(index) {
                    tracing::debug!(index, "button tag out of sequence");
                    invalid_buttons.push(index);
                }
                let title = match tag.content.as_deref() {
                    Some(text) => text.to_string(),
                    None => index.to_string(),
                };
                titles.insert(index, title);
            }
            None => {}
        }
    }

    let mut unknown_button_actions = Vec::new();
    let buttons: Vec<Button> = titles
        .into_iter()
        .map(|(index, title)| {
            let button_type = match actions.get(&index) {
                Some(raw) => raw.parse().unwrap_or_else(|_| {
                    unknown_button_actions.push(index);
                    ButtonType::Post
                }),
                None => ButtonType::Post,
            };
            Button {
                index,
                title,
                button_type,
                target: targets.get(&index).map(|t| t.to_string()),
            }
        })
        .collect();

    let get = |name: &str| properties.get(name).copied().unwrap_or("").to_string();
    let image = get(PROPERTY_OG_IMAGE);
    let image_url = get(PROPERTY_IMAGE);
    let post_url = get(PROPERTY_POST_URL);
    let title = get(PROPERTY_OG_TITLE);
    let input_text = properties
        .get(PROPERTY_INPUT_TEXT)
        .map(|s| s.to_string());

    let (version, unsupported_version) = match properties.get(PROPERTY_VERSION) {
        None => (FrameVersion::default(), None),
        Some(raw) => match raw.parse::<FrameVersion>() {
            Ok(version) => (version, None),
            Err(_) => (FrameVersion::default(), Some(raw.to_string())),
        },
    };

    let report = DebugReport {
        buttons: buttons.clone(),
        buttons_are_out_of_order: ordering.tripped(),
        fallback_image_to_url: image_url.is_empty(),
        html_tags: tags.iter().map(|t| t.html.clone()).collect(),
        image,
        image_url: image_url.clone(),
        invalid_buttons,
        post_url: post_url.clone(),
        post_url_too_long: post_url.chars().count() > MAX_POST_URL_LENGTH,
        // TODO: derive from the flags above once the client acceptance rules are published
        valid: true,
        version,
        unknown_button_actions,
        unsupported_version,
    };

    if report.has_problems() {
        tracing::warn!(
            out_of_order = report.buttons_are_out_of_order,
            post_url_too_long = report.post_url_too_long,
            invalid_buttons = ?report.invalid_buttons,
            "frame decoded with diagnostics"
        );
    }

    Card {
        version,
        image_url,
        post_url,
        title,
        input_text,
        buttons,
        debug: report,
    }
}
