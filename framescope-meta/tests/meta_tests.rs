use framescope_meta::{
    button, decode, decode_html, deferred, encode, meta, render_intents, Button, ButtonType,
    FrameHead, FrameVersion, IntentNode, MetaError, MetaTag,
};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;

fn get_fixture_path(filename: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("fixtures");
    path.push(filename);
    path
}

fn tags(pairs: &[(&str, &str)]) -> Vec<MetaTag> {
    pairs.iter().map(|(p, c)| MetaTag::new(*p, *c)).collect()
}

// Fixture documents
#[test]
fn test_valid_simple_fixture() {
    let html = fs::read_to_string(get_fixture_path("valid-simple.html")).unwrap();
    let card = decode_html(&html);
    assert_eq!(card.title, "Poll");
    assert_eq!(card.buttons.len(), 2);
    assert!(!card.debug.has_problems());
    // charset tag has no property but is still listed
    assert_eq!(card.debug.html_tags.len(), 8);
}

#[test]
fn test_out_of_order_fixture() {
    let html = fs::read_to_string(get_fixture_path("out-of-order.html")).unwrap();
    let card = decode_html(&html);
    assert!(card.debug.buttons_are_out_of_order);
    assert!(card.debug.fallback_image_to_url);
    assert_eq!(card.debug.image, "https://x/fallback.png");
    assert_eq!(card.image_url, "");
    assert_eq!(
        card.buttons,
        vec![
            Button::new(1, "First"),
            Button {
                button_type: ButtonType::PostRedirect,
                ..Button::new(2, "Second")
            },
        ]
    );
}

#[test]
fn test_not_a_frame_fixture() {
    let html = fs::read_to_string(get_fixture_path("not-a-frame.html")).unwrap();
    let card = decode_html(&html);
    assert!(card.buttons.is_empty());
    assert_eq!(card.version, FrameVersion::VNext);
    assert_eq!(card.post_url, "");
    assert!(card.debug.valid);
}

// Decoder behaviour
#[test]
fn test_yes_no_scenario() {
    let card = decode(&tags(&[
        ("fc:frame:image", "https://x/img.png"),
        ("fc:frame:post_url", "https://x/post"),
        ("fc:frame:button:1", "Yes"),
        ("fc:frame:button:2", "No"),
    ]));
    assert_eq!(card.image_url, "https://x/img.png");
    assert_eq!(card.post_url, "https://x/post");
    assert_eq!(card.buttons, vec![Button::new(1, "Yes"), Button::new(2, "No")]);
    assert!(!card.debug.buttons_are_out_of_order);
    assert!(card.debug.invalid_buttons.is_empty());
    assert_eq!(card.debug.buttons, card.buttons);
}

#[test]
fn test_gap_is_flagged() {
    let card = decode(&tags(&[
        ("fc:frame:button:1", "One"),
        ("fc:frame:button:3", "Three"),
    ]));
    assert!(card.debug.buttons_are_out_of_order);
    assert_eq!(card.debug.invalid_buttons, vec![3]);
    assert_eq!(card.buttons.len(), 2);
}

#[test]
fn test_reversed_order_is_flagged() {
    let card = decode(&tags(&[
        ("fc:frame:button:2", "Two"),
        ("fc:frame:button:1", "One"),
    ]));
    assert!(card.debug.buttons_are_out_of_order);
    assert!(card.debug.invalid_buttons.contains(&1));
    let indices: Vec<u8> = card.buttons.iter().map(|b| b.index).collect();
    assert_eq!(indices, vec![1, 2]);
}

#[test]
fn test_duplicate_index_overwrites_title() {
    let card = decode(&tags(&[
        ("fc:frame:button:1", "Old"),
        ("fc:frame:button:1", "New"),
    ]));
    assert_eq!(card.buttons, vec![Button::new(1, "New")]);
    assert!(card.debug.buttons_are_out_of_order);
    assert_eq!(card.debug.invalid_buttons, vec![1]);
}

#[test]
fn test_default_button_type_is_post() {
    let card = decode(&tags(&[("fc:frame:button:1", "Go")]));
    assert_eq!(card.buttons[0].button_type, ButtonType::Post);
}

#[test]
fn test_action_override_without_title_creates_no_button() {
    let card = decode(&tags(&[
        ("fc:frame:button:1", "One"),
        ("fc:frame:button:2:action", "post_redirect"),
    ]));
    assert_eq!(card.buttons, vec![Button::new(1, "One")]);
    assert!(!card.debug.buttons_are_out_of_order);
}

#[test]
fn test_action_override_applies_regardless_of_position() {
    let card = decode(&tags(&[
        ("fc:frame:button:1:action", "post_redirect"),
        ("fc:frame:button:1", "Visit"),
    ]));
    assert_eq!(card.buttons[0].button_type, ButtonType::PostRedirect);
}

#[test]
fn test_unknown_action_falls_back_to_post() {
    let card = decode(&tags(&[
        ("fc:frame:button:1", "Mint"),
        ("fc:frame:button:1:action", "mint"),
    ]));
    assert_eq!(card.buttons[0].button_type, ButtonType::Post);
    assert_eq!(card.debug.unknown_button_actions, vec![1]);
    assert!(card.debug.has_problems());
}

#[test]
fn test_target_is_kept_on_button() {
    let card = decode(&tags(&[
        ("fc:frame:button:1", "Docs"),
        ("fc:frame:button:1:target", "https://docs.example"),
    ]));
    assert_eq!(card.buttons[0].target.as_deref(), Some("https://docs.example"));
    assert_eq!(card.buttons[0].button_type, ButtonType::Post);
}

#[test]
fn test_missing_content_defaults_title_to_index() {
    let card = decode(&[MetaTag::without_content("fc:frame:button:1")]);
    assert_eq!(card.buttons[0].title, "1");
}

#[test]
fn test_post_url_length_limit() {
    let at_limit = format!("https://x/{}", "a".repeat(2048 - 10));
    assert_eq!(at_limit.len(), 2048);
    let card = decode(&tags(&[("fc:frame:post_url", &at_limit)]));
    assert!(!card.debug.post_url_too_long);

    let over_limit = format!("{}a", at_limit);
    let card = decode(&tags(&[("fc:frame:post_url", &over_limit)]));
    assert!(card.debug.post_url_too_long);
}

#[test]
fn test_fallback_image_flag() {
    let card = decode(&tags(&[("og:image", "https://x/og.png")]));
    assert!(card.debug.fallback_image_to_url);
    assert_eq!(card.image_url, "");
    assert_eq!(card.debug.image_url, "");
    assert_eq!(card.debug.image, "https://x/og.png");
}

#[test]
fn test_last_fixed_property_wins() {
    let card = decode(&tags(&[
        ("og:title", "First"),
        ("og:title", "Second"),
    ]));
    assert_eq!(card.title, "Second");
}

#[test]
fn test_input_text_is_captured() {
    let card = decode(&tags(&[("fc:frame:input:text", "Your name")]));
    assert_eq!(card.input_text.as_deref(), Some("Your name"));
    assert!(card.has_input());
}

#[test]
fn test_unsupported_version_is_reported() {
    let card = decode(&tags(&[("fc:frame", "v2")]));
    assert_eq!(card.version, FrameVersion::VNext);
    assert_eq!(card.debug.unsupported_version.as_deref(), Some("v2"));
}

#[test]
fn test_tags_without_property_are_ignored() {
    let html = r#"<meta name="fc:frame:button:1" content="Nope"><meta content="orphan">"#;
    let card = decode_html(html);
    assert!(card.buttons.is_empty());
    assert_eq!(card.debug.html_tags.len(), 2);
}

#[test]
fn test_valid_is_always_true() {
    let card = decode(&tags(&[
        ("fc:frame:button:4", "Four"),
        ("fc:frame:button:1", "One"),
    ]));
    assert!(card.debug.buttons_are_out_of_order);
    assert!(card.debug.valid);
}

#[test]
fn test_debug_report_serializes_camel_case() {
    let card = decode(&tags(&[("fc:frame:button:1", "Go")]));
    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["debug"]["buttonsAreOutOfOrder"], false);
    assert_eq!(json["buttons"][0]["type"], "post");
    assert_eq!(json["version"], "vNext");
}

// Encoder / renderer round trip
#[test]
fn test_round_trip_recovers_buttons() {
    let titles = ["Red", "Green", "Blue"];
    let nodes: Vec<IntentNode> = titles.iter().map(|t| button(*t)).collect();
    let html = FrameHead::new("https://x/frame").render(nodes).unwrap();

    let card = decode_html(&html);
    let expected: Vec<Button> = titles
        .iter()
        .enumerate()
        .map(|(i, t)| Button::new(i as u8 + 1, *t))
        .collect();
    assert_eq!(card.buttons, expected);
    assert!(!card.debug.buttons_are_out_of_order);
    assert_eq!(card.post_url, "https://x/frame");
    assert_eq!(card.image_url, "https://x/frame_og");
}

#[test]
fn test_round_trip_with_mixed_and_deferred_nodes() {
    let html = FrameHead::new("https://x/frame")
        .render(vec![
            meta("og:title", "Mixed"),
            deferred(|| button("Lazy")),
            button("Eager"),
        ])
        .unwrap();
    let card = decode_html(&html);
    assert_eq!(card.title, "Mixed");
    assert_eq!(card.buttons, vec![Button::new(1, "Lazy"), Button::new(2, "Eager")]);
}

#[test]
fn test_round_trip_escapes_titles() {
    let html = FrameHead::new("https://x/frame?a=1&b=2")
        .render(vec![button("Say \"hi\" & <wave>")])
        .unwrap();
    let card = decode_html(&html);
    assert_eq!(card.buttons[0].title, "Say \"hi\" & <wave>");
    assert_eq!(card.post_url, "https://x/frame?a=1&b=2");
}

#[test]
fn test_head_rejects_fifth_button() {
    let nodes: Vec<IntentNode> = (1..=5).map(|i| button(format!("B{}", i))).collect();
    let result = FrameHead::new("https://x/frame").render(nodes);
    assert!(matches!(result, Err(MetaError::TooManyButtons { found: 5, .. })));
}

#[test]
fn test_render_intents_without_head() {
    let html = render_intents(vec![button("A"), button("B")]);
    let card = decode_html(&html);
    assert_eq!(card.buttons.len(), 2);
    assert!(card.debug.fallback_image_to_url);
}

#[test]
fn test_encode_single_node() {
    let encoded = encode(button("Solo"));
    assert_eq!(encoded[0].to_meta_tag(), MetaTag::new("fc:frame:button:1", "Solo"));
}
