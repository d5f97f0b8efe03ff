//! Search pacing, page selectors, consent handling and export defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::default_true;

/// Search target and pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Job-search results page; `keywords` and `location` are appended as query parameters.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_location")]
    pub default_location: String,

    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Budget for the first result card to appear.
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_seconds: u64,

    /// Pause after navigation before touching the page.
    #[serde(default = "default_settle_millis")]
    pub settle_millis: u64,

    /// Pause after each scroll before re-counting cards.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_millis: u64,

    /// Consecutive scroll cycles without new cards before giving up.
    #[serde(default = "default_stall_cycles")]
    pub stall_cycles: u32,

    /// Hard ceiling on scroll cycles regardless of progress.
    #[serde(default = "default_max_scroll_cycles")]
    pub max_scroll_cycles: u32,
}

fn default_base_url() -> String {
    "https://www.linkedin.com/jobs/search/".to_string()
}

fn default_location() -> String {
    "Worldwide".to_string()
}

fn default_count() -> usize {
    50
}

fn default_wait_timeout() -> u64 {
    20
}

fn default_settle_millis() -> u64 {
    2000
}

fn default_poll_interval() -> u64 {
    2000
}

fn default_stall_cycles() -> u32 {
    3
}

fn default_max_scroll_cycles() -> u32 {
    200
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_location: default_location(),
            default_count: default_count(),
            wait_timeout_seconds: default_wait_timeout(),
            settle_millis: default_settle_millis(),
            poll_interval_millis: default_poll_interval(),
            stall_cycles: default_stall_cycles(),
            max_scroll_cycles: default_max_scroll_cycles(),
        }
    }
}

impl SearchConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_seconds)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_millis)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis)
    }
}

/// CSS selectors used to locate result cards and their fields.
///
/// Field selectors are evaluated relative to a card node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_card")]
    pub card: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_company")]
    pub company: String,

    #[serde(default = "default_location_selector")]
    pub location: String,

    #[serde(default = "default_link")]
    pub link: String,

    #[serde(default = "default_link_attribute")]
    pub link_attribute: String,

    #[serde(default = "default_date")]
    pub date: String,

    #[serde(default = "default_date_attribute")]
    pub date_attribute: String,
}

fn default_card() -> String {
    "div.base-card".to_string()
}

fn default_title() -> String {
    "h3.base-search-card__title".to_string()
}

fn default_company() -> String {
    "h4.base-search-card__subtitle".to_string()
}

fn default_location_selector() -> String {
    "span.job-search-card__location".to_string()
}

fn default_link() -> String {
    "a.base-card__full-link".to_string()
}

fn default_link_attribute() -> String {
    "href".to_string()
}

fn default_date() -> String {
    "time".to_string()
}

fn default_date_attribute() -> String {
    "datetime".to_string()
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: default_card(),
            title: default_title(),
            company: default_company(),
            location: default_location_selector(),
            link: default_link(),
            link_attribute: default_link_attribute(),
            date: default_date(),
            date_attribute: default_date_attribute(),
        }
    }
}

impl SelectorConfig {
    /// Selector/name pairs, for validation and diagnostics.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("card", &self.card),
            ("title", &self.title),
            ("company", &self.company),
            ("location", &self.location),
            ("link", &self.link),
            ("link_attribute", &self.link_attribute),
            ("date", &self.date),
            ("date_attribute", &self.date_attribute),
        ]
    }
}

/// Cookie/consent overlay handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Candidate clickable elements.
    #[serde(default = "default_consent_selector")]
    pub selector: String,

    /// Case-sensitive substrings of the button text that identify the consent button.
    #[serde(default = "default_phrases")]
    pub phrases: Vec<String>,

    /// Pause after the click so the overlay can animate out.
    #[serde(default = "default_consent_pause")]
    pub pause_millis: u64,
}

fn default_consent_selector() -> String {
    "button".to_string()
}

fn default_phrases() -> Vec<String> {
    vec!["Accept".to_string(), "agree".to_string(), "Cookie".to_string()]
}

fn default_consent_pause() -> u64 {
    1000
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: default_consent_selector(),
            phrases: default_phrases(),
            pause_millis: default_consent_pause(),
        }
    }
}

impl ConsentConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_millis)
    }
}

/// Export defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Spreadsheet destination; the CSV fallback swaps the extension.
    #[serde(default = "default_export_path")]
    pub path: PathBuf,
}

fn default_export_path() -> PathBuf {
    PathBuf::from("jobs.xlsx")
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: default_export_path(),
        }
    }
}
