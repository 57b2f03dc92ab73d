//! Image style presets and their prompt rendering.

use serde::Deserialize;

/// Style presets attached to a prompt request.
///
/// An empty string means unset; unknown JSON keys are ignored on
/// deserialization. Values are not validated and render verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Presets {
    /// Aspect ratio, e.g. "16:9".
    pub ar: String,

    /// Visual style, e.g. "cyberpunk".
    pub style: String,

    /// Dominant color tone.
    pub color: String,

    /// Lighting description.
    pub light: String,

    /// Composition / framing.
    pub composition: String,
}

impl Presets {
    /// Render the set presets as human-readable sentences, one per line.
    ///
    /// Sentences appear in a fixed order (ar, style, color, light,
    /// composition) regardless of the order keys arrived on the wire.
    /// All-empty presets render as the empty string.
    pub fn describe(&self) -> String {
        let mut lines = Vec::new();

        if !self.ar.is_empty() {
            lines.push(format!("The aspect ratio of the image is {}.", self.ar));
        }
        if !self.style.is_empty() {
            lines.push(format!("The style of the image is {}.", self.style));
        }
        if !self.color.is_empty() {
            lines.push(format!("The main color tone of the image is {}.", self.color));
        }
        if !self.light.is_empty() {
            lines.push(format!("The lighting of the image is {}.", self.light));
        }
        if !self.composition.is_empty() {
            lines.push(format!("The composition of the image is {}.", self.composition));
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_presets_render_empty() {
        assert_eq!(Presets::default().describe(), "");
    }

    #[test]
    fn test_single_preset_renders_one_sentence() {
        let presets = Presets {
            style: "cyberpunk".to_string(),
            ..Default::default()
        };
        assert_eq!(presets.describe(), "The style of the image is cyberpunk.");
    }

    #[test]
    fn test_fixed_ordering() {
        let presets = Presets {
            composition: "close-up".to_string(),
            ar: "16:9".to_string(),
            ..Default::default()
        };
        let rendered = presets.describe();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("aspect ratio"));
        assert!(lines[1].contains("composition"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let presets: Presets =
            serde_json::from_str(r#"{"style": "noir", "mood": "somber"}"#).unwrap();
        assert_eq!(presets.style, "noir");
        assert_eq!(presets.describe(), "The style of the image is noir.");
    }

    #[test]
    fn test_wire_order_does_not_matter() {
        let a: Presets = serde_json::from_str(r#"{"light": "dusk", "ar": "1:1"}"#).unwrap();
        let b: Presets = serde_json::from_str(r#"{"ar": "1:1", "light": "dusk"}"#).unwrap();
        assert_eq!(a.describe(), b.describe());
    }
}
