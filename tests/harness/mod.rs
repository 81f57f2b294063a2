//! Integration test harness
//!
//! - `TestServer` - Spawns the real storyd binary on a random port
//! - `MockUpstream` - In-process stand-in for the Anthropic and OpenAI
//!   APIs with scripted responses and invocation counters

mod upstream;

pub use server::TestServer;
pub use upstream::{Behavior, MockUpstream};
