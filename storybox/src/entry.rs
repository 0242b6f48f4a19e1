use serde::{Deserialize, Serialize};
use serde_json::Value;
use storybox_glow::Color;

/// One observation of the polled feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoryEntry {
    pub index: u64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub landscape: String,
    /// Kept loose so a malformed triple still lets the transcript update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb: Option<Vec<Value>>,
}

impl StoryEntry {
    pub fn new(index: u64, text: impl Into<String>, landscape: impl Into<String>, rgb: [u32; 3]) -> Self {
        Self {
            index,
            text: text.into(),
            landscape: landscape.into(),
            rgb: Some(rgb.iter().map(|&c| Value::from(c)).collect()),
        }
    }

    /// Base colour for the background, present only for exactly three numbers.
    pub fn base_color(&self) -> Option<Color> {
        let rgb = self.rgb.as_ref()?;
        if rgb.len() != 3 {
            return None;
        }
        let mut channels = [0.0f32; 3];
        for (slot, value) in channels.iter_mut().zip(rgb) {
            *slot = value.as_f64()? as f32;
        }
        Some(Color::from(channels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> StoryEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn full_payload() {
        let e = parse(
            r#"{"index": 2, "text": "The ocean swells with fever.", "landscape": "ocean", "rgb": [30, 70, 120]}"#,
        );
        assert_eq!(e.index, 2);
        assert_eq!(e.landscape, "ocean");
        assert_eq!(e.base_color(), Some(Color::new(30.0, 70.0, 120.0)));
    }

    #[test]
    fn base_color_is_clamped() {
        let e = parse(r#"{"index": 0, "rgb": [255, -4, 12.5]}"#);
        assert_eq!(e.base_color().map(|c| c.channels()), Some([220.0, 0.0, 12.5]));
    }

    #[test]
    fn wrong_arity_or_types_have_no_base() {
        assert_eq!(parse(r#"{"index": 0, "rgb": [1, 2]}"#).base_color(), None);
        assert_eq!(parse(r#"{"index": 0, "rgb": [1, 2, 3, 4]}"#).base_color(), None);
        assert_eq!(parse(r#"{"index": 0, "rgb": [1, "2", 3]}"#).base_color(), None);
        assert_eq!(parse(r#"{"index": 0}"#).base_color(), None);
    }

    #[test]
    fn missing_index_is_rejected() {
        assert!(serde_json::from_str::<StoryEntry>(r#"{"text": "hi"}"#).is_err());
    }

    #[test]
    fn serialises_in_feed_shape() {
        let e = StoryEntry::new(4, "Glaciers calve.", "glacier", [180, 200, 220]);
        let v: Value = serde_json::to_value(&e).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"index": 4, "text": "Glaciers calve.", "landscape": "glacier", "rgb": [180, 200, 220]})
        );
    }
}
