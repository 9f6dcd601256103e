//! Fake scraper for testing.
//!
//! Returns a scripted payload (or failure) without network access and
//! records every URL it was asked to scrape.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{RecipeScraper, ScrapeError, ScrapedPayload};

#[derive(Debug)]
enum Outcome {
    Payload(ScrapedPayload),
    Failure(String),
}

/// A scripted scraper for tests.
#[derive(Debug)]
pub struct FakeScraper {
    outcome: Outcome,
    calls: Mutex<Vec<String>>,
}

impl Default for FakeScraper {
    /// A scraper that returns a small but complete recipe payload.
    fn default() -> Self {
        let payload = json!({
            "title": "Chinese Chicken Fried Rice II",
            "author": "Jenn",
            "total_time": 30,
            "yields": "6 servings",
            "image": "https://images.example.com/fried-rice.jpg",
            "ingredients": ["1 tablespoon vegetable oil", "1 egg, beaten", "3 cups cooked rice"],
            "instructions": "Heat oil in a wok.\nScramble the egg.\n\nStir in rice.",
            "description": "  A quick weeknight fried rice.  ",
            "host": "example.com",
        });
        Self::with_payload(payload)
    }
}

impl FakeScraper {
    /// Return `payload` for every URL. Non-object values yield an empty payload.
    pub fn with_payload(payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            _ => ScrapedPayload::new(),
        };
        Self {
            outcome: Outcome::Payload(payload),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every scrape with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Outcome::Failure(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// URLs scraped so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of scrape invocations so far.
    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl RecipeScraper for FakeScraper {
    async fn scrape(&self, url: &str) -> Result<ScrapedPayload, ScrapeError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(url.to_string());
        }

        match &self.outcome {
            Outcome::Payload(payload) => Ok(payload.clone()),
            Outcome::Failure(message) => Err(ScrapeError::Other(message.clone())),
        }
    }
}
