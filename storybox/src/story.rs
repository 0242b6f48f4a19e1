//! Story files and the feed they are replayed into.
//!
//! A story is free text where every sentence is followed by its landscape and
//! colour tags: `<sentence>[LANDSCAPE=ocean][R=30,G=70,B=120]`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::entry::StoryEntry;

static TAGGED_SENTENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)(.*?)\[LANDSCAPE=(.*?)\]\[R=(\d+),G=(\d+),B=(\d+)\]").unwrap());

/// Sentences this short (in chars) are headers or debris, not story.
const MIN_SENTENCE_CHARS: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct StoryItem {
    pub text: String,
    pub landscape: String,
    pub rgb: [u32; 3],
}

impl StoryItem {
    pub fn to_entry(&self, index: u64) -> StoryEntry {
        StoryEntry::new(index, self.text.clone(), self.landscape.clone(), self.rgb)
    }
}

/// Extract every tagged sentence from `raw`, in order.
pub fn parse_story(raw: &str) -> Vec<StoryItem> {
    TAGGED_SENTENCE
        .captures_iter(raw)
        .filter_map(|caps| {
            let text = caps[1].trim();
            if text.is_empty() || text.starts_with('#') || text.chars().count() <= MIN_SENTENCE_CHARS {
                return None;
            }
            let rgb = [caps[3].parse().ok()?, caps[4].parse().ok()?, caps[5].parse().ok()?];
            Some(StoryItem {
                text: text.replace('#', "").trim().to_string(),
                landscape: caps[2].trim().to_string(),
                rgb,
            })
        })
        .collect()
}

/// Writes feed entries so a concurrent reader never sees a partial file.
pub struct FeedWriter {
    path: PathBuf,
}

impl FeedWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, entry: &StoryEntry) -> Result<()> {
        let Some(name) = self.path.file_name() else {
            bail!("feed path has no file name: {}", self.path.display());
        };
        let mut tmp_name = name.to_os_string();
        tmp_name.push(".tmp");
        let tmp = self.path.with_file_name(tmp_name);

        let payload = serde_json::to_vec(entry).context("Failed to encode feed entry")?;
        std::fs::write(&tmp, payload)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to move feed into place: {}", self.path.display()))?;
        Ok(())
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Write each item to the feed in turn, pausing `interval` between lines.
pub async fn replay(items: &[StoryItem], writer: &FeedWriter, interval: Duration) -> Result<()> {
    info!("Replaying {} lines into {}", items.len(), writer.path().display());
    for (idx, item) in items.iter().enumerate() {
        writer.write(&item.to_entry(idx as u64))?;
        info!("Line {}: {} - {}", idx + 1, item.landscape, preview(&item.text, 60));
        if idx + 1 < items.len() {
            tokio::time::sleep(interval).await;
        }
    }
    info!("Story complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
The ocean swells with fever, its waters growing too warm for the coral below.[LANDSCAPE=ocean][R=30,G=70,B=120]
Reefs that once bloomed with color now stand as white graveyards.[LANDSCAPE=ocean][R=80,G=80,B=100]
Too short.[LANDSCAPE=city][R=1,G=2,B=3]
The salt-heavy air drifts inland, poisoning the countryside's once-fertile soil.[LANDSCAPE=countryside][R=100,G=80,B=50]
";

    #[test]
    fn parses_tagged_sentences_in_order() {
        let items = parse_story(SAMPLE);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].text, "Reefs that once bloomed with color now stand as white graveyards.");
        assert_eq!(items[2].landscape, "countryside");
        assert_eq!(items[2].rgb, [100, 80, 50]);
    }

    #[test]
    fn stray_hashes_are_removed() {
        let items = parse_story("Coral ## bleaches in the heat.[LANDSCAPE=ocean][R=1,G=2,B=3]");
        assert_eq!(items[0].text, "Coral  bleaches in the heat.");
    }

    #[test]
    fn heading_swallows_the_sentence_it_precedes() {
        let raw = "# The Warming Tide\nThe ocean swells with fever.[LANDSCAPE=ocean][R=1,G=2,B=3]";
        assert!(parse_story(raw).is_empty());
    }

    #[test]
    fn skips_headers_and_short_lines() {
        let raw = "#Chapter one is here[LANDSCAPE=city][R=1,G=2,B=3]ten chars![LANDSCAPE=city][R=1,G=2,B=3]";
        assert!(parse_story(raw).is_empty());
    }

    #[test]
    fn untagged_text_yields_nothing() {
        assert!(parse_story("Just a sentence with no tags at all.").is_empty());
        assert!(parse_story("").is_empty());
    }

    #[test]
    fn writer_replaces_feed_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FeedWriter::new(dir.path().join("story.json"));
        writer.write(&StoryEntry::new(0, "First sentence here.", "ocean", [1, 2, 3])).unwrap();
        writer.write(&StoryEntry::new(1, "Second sentence here.", "city", [4, 5, 6])).unwrap();

        let raw = std::fs::read_to_string(writer.path()).unwrap();
        let entry: StoryEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.index, 1);
        assert!(!dir.path().join("story.json.tmp").exists());
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("short", 60), "short");
        assert_eq!(preview("ééééé", 2), "éé...");
    }

    #[tokio::test]
    async fn replay_leaves_last_line_in_feed() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FeedWriter::new(dir.path().join("story.json"));
        let items = parse_story(SAMPLE);

        replay(&items, &writer, Duration::ZERO).await.unwrap();

        let entry: StoryEntry =
            serde_json::from_slice(&std::fs::read(writer.path()).unwrap()).unwrap();
        assert_eq!(entry.index, 2);
        assert_eq!(entry.landscape, "countryside");
    }
}
