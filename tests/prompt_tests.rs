//! Prompt construction properties.

use prompt_relay::prompt::{build_prompt, Presets};

#[test]
fn test_all_empty_presets_render_nothing() {
    let prompt = build_prompt("a red fox", &Presets::default());
    assert!(!prompt.contains("aspect ratio"));
    assert!(!prompt.contains("style of the image"));
    assert!(prompt.contains("User ideas: a red fox"));
}

#[test]
fn test_each_preset_renders_exactly_one_sentence() {
    let presets = Presets {
        color: "teal".to_string(),
        ..Default::default()
    };
    let prompt = build_prompt("a harbor", &presets);
    assert_eq!(prompt.matches("The main color tone of the image is teal.").count(), 1);
    assert!(!prompt.contains("The lighting of the image is"));
}

#[test]
fn test_sentence_order_is_fixed() {
    let presets = Presets {
        light: "golden hour".to_string(),
        ar: "21:9".to_string(),
        style: "watercolor".to_string(),
        ..Default::default()
    };
    let prompt = build_prompt("mountains", &presets);

    let ar = prompt.find("aspect ratio").unwrap();
    let style = prompt.find("The style of the image").unwrap();
    let light = prompt.find("The lighting of the image").unwrap();
    assert!(ar < style && style < light);
}

#[test]
fn test_unrecognized_preset_keys_are_silently_ignored() {
    let presets: Presets = serde_json::from_str(
        r#"{"style": "ukiyo-e", "aspect": "wide", "vibes": "cozy"}"#,
    )
    .unwrap();
    let prompt = build_prompt("a wave", &presets);
    assert!(prompt.contains("The style of the image is ukiyo-e."));
    assert!(!prompt.contains("wide"));
    assert!(!prompt.contains("cozy"));
}

#[test]
fn test_count_placeholder_is_the_fixed_literal() {
    let prompt = build_prompt("anything", &Presets::default());
    assert!(prompt.contains("write 5 distinct"));
}

#[test]
fn test_user_text_is_inserted_verbatim() {
    let text = "neon alley, rain, \"reflections\", 8k";
    let prompt = build_prompt(text, &Presets::default());
    assert!(prompt.contains(text));
}
