//! The board: one async action per section, plus copy
//!
//! Every action is fetch, normalize, render. Actions never panic and never
//! leave a section without a status; fetch failures show up as
//! `Error: <reason>` and are also returned to the caller.
//!
//! Overlapping actions on the same section are not sequenced or cancelled.
//! Whichever fetch completes last is what the section shows.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::category::{Section, fun_fact_url, motivation_url};
use crate::clipboard::{COPY_FEEDBACK_MS, ClipboardSink, CopyFeedback};
use crate::config::EndpointsConfig;
use crate::error::FetchError;
use crate::fetcher::{Fetch, Fetched};
use crate::normalize::{NormalizedItem, normalize_dad_joke, normalize_fun_facts, normalize_motivation};
use crate::render::{Renderer, via_line};

pub const LOADING: &str = "Loading...";
pub const NO_DATA: &str = "No data returned";

pub struct SnippetBoard {
    fetcher: Arc<dyn Fetch>,
    renderer: Arc<dyn Renderer>,
    clipboard: Arc<dyn ClipboardSink>,
    endpoints: EndpointsConfig,
    /// What each section currently shows, as plain text for copying
    shown: Mutex<HashMap<Section, String>>,
}

impl SnippetBoard {
    pub fn new(
        fetcher: Arc<dyn Fetch>,
        renderer: Arc<dyn Renderer>,
        clipboard: Arc<dyn ClipboardSink>,
        endpoints: EndpointsConfig,
    ) -> Self {
        Self {
            fetcher,
            renderer,
            clipboard,
            endpoints,
            shown: Mutex::new(HashMap::new()),
        }
    }

    pub async fn generate_motivation(&self, category: &str) -> Result<NormalizedItem, FetchError> {
        let section = Section::Motivation;
        let fetched = self
            .fetch_for(section, motivation_url(&self.endpoints.motivation, category))
            .await?;

        let item = normalize_motivation(&fetched.payload.value());
        self.renderer.show_motivation(&item.title, fetched.via);
        self.record(section, format!("{}\n{}", via_line(fetched.via), item.title))
            .await;
        Ok(item)
    }

    /// `Ok(None)` when the endpoint answered but had nothing to say.
    pub async fn generate_dad_joke(&self) -> Result<Option<NormalizedItem>, FetchError> {
        let section = Section::DadJoke;
        let url = self.endpoints.dad_jokes.clone();
        let fetched = self.fetch_for(section, Ok(url)).await?;

        let Some(item) = normalize_dad_joke(&fetched.payload.value()) else {
            self.set_status(section, NO_DATA).await;
            return Ok(None);
        };

        self.renderer
            .show_joke(&item.title, item.body.as_deref(), fetched.via);
        let mut shown = format!("{}\n{}", via_line(fetched.via), item.title);
        if let Some(body) = &item.body {
            shown.push('\n');
            shown.push_str(body);
        }
        self.record(section, shown).await;
        Ok(Some(item))
    }

    pub async fn generate_fun_facts(&self, theme: &str) -> Result<Vec<String>, FetchError> {
        let section = Section::FunFacts;
        let fetched = self
            .fetch_for(section, fun_fact_url(&self.endpoints.fun_facts, theme))
            .await?;

        let titles = normalize_fun_facts(&fetched.payload.value());
        self.renderer.show_facts(&titles, fetched.via);
        self.record(section, titles.join("\n")).await;
        Ok(titles)
    }

    /// Copy what a section currently shows. Feedback reverts to idle after
    /// [`COPY_FEEDBACK_MS`].
    pub async fn copy(&self, section: Section) -> CopyFeedback {
        let Some(text) = self.shown_text(section).await else {
            debug!("nothing to copy for {}", section);
            return CopyFeedback::Idle;
        };

        let feedback = match self.clipboard.write_text(&text).await {
            Ok(()) => CopyFeedback::Copied,
            Err(e) => {
                error!("copy failed for {}: {}", section, e);
                CopyFeedback::Failed
            }
        };
        self.renderer.show_copy_feedback(section, feedback);

        let renderer = Arc::clone(&self.renderer);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(COPY_FEEDBACK_MS)).await;
            renderer.show_copy_feedback(section, CopyFeedback::Idle);
        });

        feedback
    }

    pub async fn shown_text(&self, section: Section) -> Option<String> {
        self.shown.lock().await.get(&section).cloned()
    }

    async fn fetch_for(
        &self,
        section: Section,
        url: Result<String, FetchError>,
    ) -> Result<Fetched, FetchError> {
        self.set_status(section, LOADING).await;

        let outcome = match url {
            Ok(url) => self.fetcher.fetch_with_fallback(&url).await,
            Err(e) => Err(e),
        };
        if let Err(ref e) = outcome {
            error!("{} failed: {}", section, e);
            self.set_status(section, &format!("Error: {}", e.reason()))
                .await;
        }
        outcome
    }

    async fn set_status(&self, section: Section, message: &str) {
        self.renderer.show_status(section, message);
        let mut shown = self.shown.lock().await;
        match section {
            // the fact list is cleared while loading and stays empty on error
            Section::FunFacts => {
                shown.remove(&section);
            }
            _ => {
                shown.insert(section, message.to_string());
            }
        }
    }

    async fn record(&self, section: Section, text: String) {
        self.shown.lock().await.insert(section, text);
    }
}
