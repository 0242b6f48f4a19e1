use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use storybox_glow::Color;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoryboxConfig {
    pub feed: FeedConfig,
    pub render: RenderConfig,
    pub transcript: TranscriptConfig,
    /// Chip names, in strip order.
    pub landscapes: Vec<String>,
}

impl Default for StoryboxConfig {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            render: RenderConfig::default(),
            transcript: TranscriptConfig::default(),
            landscapes: default_landscapes(),
        }
    }
}

impl StoryboxConfig {
    /// Load config from a JSON file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: StoryboxConfig =
            serde_json::from_str(&content).with_context(|| "Failed to parse JSON config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file is missing or invalid, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply `STORYBOX_*` overrides read through `lookup`. Unparseable numbers are ignored.
    fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("STORYBOX_SOURCE") {
            self.feed.source = v;
        }
        if let Some(v) = lookup("STORYBOX_POLL_MS") {
            if let Ok(n) = v.parse() {
                self.feed.poll_interval_ms = n;
            }
        }
        if let Some(v) = lookup("STORYBOX_FPS") {
            if let Ok(n) = v.parse() {
                self.render.fps = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// `http(s)://` URL or a local file path.
    pub source: String,
    pub poll_interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: "story.json".to_string(),
            poll_interval_ms: 500,
            request_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Base colour for `render` when `--rgb` is not given, as `[r, g, b]`.
    pub base_color: Color,
    /// Where `watch` writes periodic PNG frames. Disabled when unset.
    pub snapshot_path: Option<PathBuf>,
    pub snapshot_every_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
            fps: 60,
            base_color: Color::new(30.0, 30.0, 40.0),
            snapshot_path: None,
            snapshot_every_secs: 5,
        }
    }
}

/// Geometry used by the scroll heuristics, in pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    pub viewport_height: f32,
    pub container_height: f32,
    pub line_height: f32,
    pub chip_width: f32,
    pub chip_gap: f32,
    pub panel_width: f32,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            viewport_height: 800.0,
            container_height: 600.0,
            line_height: 48.0,
            chip_width: 120.0,
            chip_gap: 12.0,
            panel_width: 960.0,
        }
    }
}

fn default_landscapes() -> Vec<String> {
    ["ocean", "countryside", "city", "glacier", "mountain", "forest", "desert"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
