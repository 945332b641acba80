//! Tunable settings for every page behavior.
//!
//! Defaults reproduce the stock portfolio page. A page may override any subset
//! by passing a JSON document to `start_portfolio_with_config`; absent fields
//! keep their default.

use serde::Deserialize;

/// Up, Up, Down, Down, Left, Right, Left, Right, B, A
pub const KONAMI_SEQUENCE: [u32; 10] = [38, 38, 40, 40, 37, 39, 37, 39, 66, 65];

pub const DEFAULT_STORAGE_KEY: &str = "contactMessages";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub typing: TypingSettings,
    pub scroll: ScrollSettings,
    pub reveal: RevealSettings,
    pub notification: NotificationSettings,
    /// Local-storage key holding the JSON array of contact messages.
    pub storage_key: String,
    /// Key codes that trigger the easter egg, oldest first.
    pub key_sequence: Vec<u32>,
    /// How long the body keeps its rainbow animation after the sequence fires.
    pub rainbow_ms: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            typing: TypingSettings::default(),
            scroll: ScrollSettings::default(),
            reveal: RevealSettings::default(),
            notification: NotificationSettings::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            key_sequence: KONAMI_SEQUENCE.to_vec(),
            rainbow_ms: 5000,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypingSettings {
    pub words: Vec<String>,
    pub type_ms: i32,
    pub delete_ms: i32,
    pub pause_full_ms: i32,
    pub pause_empty_ms: i32,
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            words: ["HTML", "CSS", "JavaScript", "Bootstrap", "React", "Node.js"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            type_ms: 200,
            delete_ms: 100,
            pause_full_ms: 2000,
            pause_empty_ms: 500,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScrollSettings {
    pub navbar_threshold: f64,
    pub back_to_top_threshold: f64,
    /// Multiplier applied to the scroll offset for the hero translate.
    pub parallax_rate: f64,
    /// Height of the fixed header subtracted from anchor targets.
    pub header_offset: f64,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            navbar_threshold: 100.0,
            back_to_top_threshold: 300.0,
            parallax_rate: -0.5,
            header_offset: 80.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RevealSettings {
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    /// Assumed frame interval; 16ms is roughly 60 updates per second.
    pub frame_ms: f64,
    pub progress_threshold: f64,
    pub progress_delay_ms: i32,
    pub reveal_threshold: f64,
    pub stagger_ms: i32,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            counter_threshold: 0.5,
            counter_duration_ms: 2000.0,
            frame_ms: 16.0,
            progress_threshold: 0.5,
            progress_delay_ms: 500,
            reveal_threshold: 0.1,
            stagger_ms: 100,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotificationSettings {
    pub enter_delay_ms: i32,
    pub visible_ms: i32,
    pub exit_ms: i32,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            enter_delay_ms: 100,
            visible_ms: 3000,
            exit_ms: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.storage_key, "contactMessages");
        assert_eq!(s.key_sequence, KONAMI_SEQUENCE.to_vec());
    }

    #[test]
    fn partial_override_keeps_sibling_defaults() {
        let s = Settings::from_json(r#"{"typing":{"words":["Rust"]},"scroll":{"header_offset":64}}"#)
            .unwrap();
        assert_eq!(s.typing.words, vec!["Rust".to_string()]);
        assert_eq!(s.typing.type_ms, 200);
        assert_eq!(s.scroll.header_offset, 64.0);
        assert_eq!(s.scroll.navbar_threshold, 100.0);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Settings::from_json("{typing:").is_err());
    }
}
