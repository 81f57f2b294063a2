//! Illustration fan-out
//!
//! Requests one image per story segment from the image provider. The
//! three calls run concurrently and are joined before the response is
//! composed; a failed call yields a null URL for that slot only.

use serde::Serialize;
use tracing::{debug, warn};

use super::{illustration_prompt, Segment, StoryParts};
use crate::config::Config;
use crate::upstream::OpenAiClient;

/// Per-segment illustration URLs; a slot is null when its call failed
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IllustrationSet {
    pub beginning: Option<String>,
    pub middle: Option<String>,
    pub end: Option<String>,
}

/// Generate one illustration per segment, three calls in parallel.
///
/// Never fails: individual upstream errors degrade to a null slot.
pub async fn illustrate_story(
    client: &OpenAiClient,
    config: &Config,
    parts: &StoryParts,
    age: u32,
) -> IllustrationSet {
    debug!("Generating illustrations for three segments");

    let (beginning, middle, end) = tokio::join!(
        illustrate_segment(client, config, Segment::Beginning, &parts.beginning, age),
        illustrate_segment(client, config, Segment::Middle, &parts.middle, age),
        illustrate_segment(client, config, Segment::End, &parts.end, age),
    );

    IllustrationSet {
        beginning,
        middle,
        end,
    }
}

async fn illustrate_segment(
    client: &OpenAiClient,
    config: &Config,
    segment: Segment,
    text: &str,
    age: u32,
) -> Option<String> {
    let prompt = illustration_prompt(segment, text, age);

    match client
        .generate_image(&prompt, &config.image_model, &config.image_size)
        .await
    {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Illustration failed for {} segment: {}", segment.mood(), e);
            None
        }
    }
}
