//! Story partitioning and illustration prompts
//!
//! A generated story is divided into three contiguous, sentence-aligned
//! segments (beginning/middle/end) of roughly equal sentence count. The
//! segments drive both the illustration prompts and the `parts` field of
//! the API response.

pub mod illustrate;

pub use illustrate::{illustrate_story, IllustrationSet};

use serde::Serialize;

/// The three narrative segments of a story
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StoryParts {
    pub beginning: String,
    pub middle: String,
    pub end: String,
}

impl StoryParts {
    /// Split a story into three segments by sentence count.
    ///
    /// Sentences are delimited by terminal punctuation (`.`, `!`, `?`);
    /// fragments that are empty after trimming are discarded. With N
    /// sentences and k = ceil(N/3), the segments take sentences [0,k),
    /// [k,2k), and [2k,N). Each segment is rejoined with ". " and gets a
    /// trailing period, so an empty segment is the literal ".".
    pub fn split(story: &str) -> Self {
        let sentences: Vec<&str> = story
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let third = sentences.len().div_ceil(3);

        let join = |slice: &[&str]| format!("{}.", slice.join(". "));

        Self {
            beginning: join(&sentences[..third.min(sentences.len())]),
            middle: join(&sentences[third.min(sentences.len())..(third * 2).min(sentences.len())]),
            end: join(&sentences[(third * 2).min(sentences.len())..]),
        }
    }
}

/// Narrative position of a segment, used to vary illustration mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Beginning,
    Middle,
    End,
}

impl Segment {
    /// Style descriptor for this segment's illustration
    pub fn mood(&self) -> &'static str {
        match self {
            Segment::Beginning => "beginning",
            Segment::Middle => "middle",
            Segment::End => "ending",
        }
    }
}

/// Art-direction phrase for the reader's age band
pub fn age_style(age: u32) -> &'static str {
    if age <= 5 {
        "simple shapes, soft pastel colors, gentle and soothing"
    } else if age <= 8 {
        "bright colors, playful details, whimsical"
    } else {
        "rich detail, dynamic composition, adventurous"
    }
}

/// Build the prompt sent to the image provider for one segment
pub fn illustration_prompt(segment: Segment, text: &str, age: u32) -> String {
    format!(
        "Children's storybook illustration, {} style, colorful and friendly, {}: {}",
        segment.mood(),
        age_style(age),
        truncate_chars(text, 200)
    )
}

/// Truncate to at most `max` characters, respecting char boundaries
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
