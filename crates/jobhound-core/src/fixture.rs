//! In-memory job-search page for pipeline tests.
//!
//! Card `i` has node id `1000 * (i + 1)`; its title, company, location, link
//! and date children are `card + 1 ..= card + 5`. Buttons live below 1000.
//! Scrolling reveals `per_scroll` more cards until the page runs out.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use jobhound_config::{BrowserConfig, SelectorConfig};
use parking_lot::Mutex;
use serde_json::Value;

use crate::driver::{DriverLauncher, DriverSession, NodeRef};
use crate::error::DriverError;

const TITLE: i64 = 1;
const COMPANY: i64 = 2;
const LOCATION: i64 = 3;
const LINK: i64 = 4;
const DATE: i64 = 5;

#[derive(Debug, Clone, Default)]
pub(crate) struct FixtureCard {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub link: Option<String>,
    pub date: Option<String>,
}

impl FixtureCard {
    /// A card with every field present.
    pub fn complete(i: usize, date: &str) -> Self {
        Self {
            title: Some(format!("  Analyst {i} ")),
            company: Some(format!("Company {i}")),
            location: Some("Remote".to_string()),
            link: Some(format!("/jobs/view/{i}")),
            date: Some(date.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FixturePage {
    pub cards: Vec<FixtureCard>,
    pub initially_visible: usize,
    pub per_scroll: usize,
    /// Button texts; index `i` has node id `i + 1`.
    pub buttons: Vec<String>,
    pub fail_scroll: bool,
    pub fail_click: bool,
    /// Card indexes whose company lookup errors instead of missing.
    pub broken_company: Vec<usize>,
}

impl FixturePage {
    pub fn new(cards: Vec<FixtureCard>) -> Self {
        Self {
            initially_visible: cards.len().min(10),
            cards,
            per_scroll: 10,
            buttons: Vec::new(),
            fail_scroll: false,
            fail_click: false,
            broken_company: Vec::new(),
        }
    }

    /// `n` complete cards with dates cycling through January 2024.
    pub fn with_dated_cards(n: usize) -> Self {
        let cards = (0..n)
            .map(|i| FixtureCard::complete(i, &format!("2024-01-{:02}T08:00:00", i % 28 + 1)))
            .collect();
        Self::new(cards)
    }
}

#[derive(Debug, Default)]
pub(crate) struct FixtureState {
    pub visible: usize,
    pub scrolls: usize,
    pub clicks: Vec<NodeRef>,
    pub navigated: Vec<String>,
}

pub(crate) struct FixtureSession {
    page: FixturePage,
    selectors: SelectorConfig,
    pub state: Arc<Mutex<FixtureState>>,
    closed: Arc<AtomicBool>,
}

impl FixtureSession {
    pub fn new(page: FixturePage) -> Self {
        Self::shared(
            page,
            Arc::new(Mutex::new(FixtureState::default())),
            Arc::new(AtomicBool::new(false)),
        )
    }

    fn shared(page: FixturePage, state: Arc<Mutex<FixtureState>>, closed: Arc<AtomicBool>) -> Self {
        state.lock().visible = page.initially_visible.min(page.cards.len());
        Self {
            page,
            selectors: SelectorConfig::default(),
            state,
            closed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<(), DriverError> {
        if self.is_closed() {
            Err(DriverError::Closed)
        } else {
            Ok(())
        }
    }

    /// Split a field node id into (card index, field offset).
    fn decode(node: NodeRef) -> Option<(usize, i64)> {
        if node.0 < 1000 {
            return None;
        }
        Some(((node.0 / 1000 - 1) as usize, node.0 % 1000))
    }

    fn card(&self, index: usize) -> Result<&FixtureCard, DriverError> {
        self.page
            .cards
            .get(index)
            .ok_or_else(|| DriverError::NotFound(format!("card {index}")))
    }

    fn field_offset(&self, selector: &str) -> Option<i64> {
        let s = &self.selectors;
        [
            (s.title.as_str(), TITLE),
            (s.company.as_str(), COMPANY),
            (s.location.as_str(), LOCATION),
            (s.link.as_str(), LINK),
            (s.date.as_str(), DATE),
        ]
        .into_iter()
        .find(|(sel, _)| *sel == selector)
        .map(|(_, k)| k)
    }
}

#[async_trait]
impl DriverSession for FixtureSession {
    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        self.ensure_open()?;
        self.state.lock().navigated.push(url.to_string());
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<NodeRef>, DriverError> {
        self.ensure_open()?;
        if selector == self.selectors.card {
            let visible = self.state.lock().visible;
            return Ok((0..visible).map(|i| NodeRef(1000 * (i as i64 + 1))).collect());
        }
        if selector == "button" {
            return Ok((0..self.page.buttons.len())
                .map(|i| NodeRef(i as i64 + 1))
                .collect());
        }
        Ok(Vec::new())
    }

    async fn find_within(
        &self,
        node: NodeRef,
        selector: &str,
    ) -> Result<Option<NodeRef>, DriverError> {
        self.ensure_open()?;
        let (index, _) = Self::decode(node)
            .filter(|(_, k)| *k == 0)
            .ok_or_else(|| DriverError::NotFound(format!("{node:?} is not a card")))?;
        let Some(k) = self.field_offset(selector) else {
            return Ok(None);
        };
        if k == COMPANY && self.page.broken_company.contains(&index) {
            return Err(DriverError::Protocol("Could not find node with given id".to_string()));
        }

        let card = self.card(index)?;
        let present = match k {
            TITLE => card.title.is_some(),
            COMPANY => card.company.is_some(),
            LOCATION => card.location.is_some(),
            LINK => card.link.is_some(),
            DATE => card.date.is_some(),
            _ => false,
        };
        Ok(present.then_some(NodeRef(node.0 + k)))
    }

    async fn text(&self, node: NodeRef) -> Result<String, DriverError> {
        self.ensure_open()?;
        if let Some(text) = usize::try_from(node.0 - 1)
            .ok()
            .filter(|_| node.0 < 1000)
            .and_then(|i| self.page.buttons.get(i))
        {
            return Ok(text.clone());
        }

        let (index, k) =
            Self::decode(node).ok_or_else(|| DriverError::NotFound(format!("{node:?}")))?;
        let card = self.card(index)?;
        let text = match k {
            TITLE => card.title.clone(),
            COMPANY => card.company.clone(),
            LOCATION => card.location.clone(),
            LINK => Some("View job".to_string()),
            DATE => Some("2 days ago".to_string()),
            _ => None,
        };
        text.ok_or_else(|| DriverError::NotFound(format!("{node:?}")))
    }

    async fn attribute(&self, node: NodeRef, name: &str) -> Result<Option<String>, DriverError> {
        self.ensure_open()?;
        let (index, k) =
            Self::decode(node).ok_or_else(|| DriverError::NotFound(format!("{node:?}")))?;
        let card = self.card(index)?;
        Ok(match k {
            LINK if name == self.selectors.link_attribute => card.link.clone(),
            DATE if name == self.selectors.date_attribute => card.date.clone(),
            _ => None,
        })
    }

    async fn click(&self, node: NodeRef) -> Result<(), DriverError> {
        self.ensure_open()?;
        if self.page.fail_click {
            return Err(DriverError::Script("element is not clickable".to_string()));
        }
        self.state.lock().clicks.push(node);
        Ok(())
    }

    async fn run_script(&self, code: &str) -> Result<Value, DriverError> {
        self.ensure_open()?;
        if code.contains("scrollTo") {
            if self.page.fail_scroll {
                return Err(DriverError::Script("scroll blocked".to_string()));
            }
            let mut state = self.state.lock();
            state.scrolls += 1;
            state.visible = (state.visible + self.page.per_scroll).min(self.page.cards.len());
        }
        Ok(Value::Null)
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out [`FixtureSession`]s over a shared page. Sessions share their
/// state and closed flag with the launcher so tests can inspect them after
/// the search has dropped the session.
pub(crate) struct FixtureLauncher {
    page: FixturePage,
    pub fail_launch: bool,
    pub state: Arc<Mutex<FixtureState>>,
    pub closed: Arc<AtomicBool>,
    pub opened: AtomicUsize,
}

impl FixtureLauncher {
    pub fn new(page: FixturePage) -> Self {
        Self {
            page,
            fail_launch: false,
            state: Arc::new(Mutex::new(FixtureState::default())),
            closed: Arc::new(AtomicBool::new(false)),
            opened: AtomicUsize::new(0),
        }
    }

    pub fn session_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriverLauncher for FixtureLauncher {
    async fn open(&self, _config: &BrowserConfig) -> Result<Box<dyn DriverSession>, DriverError> {
        if self.fail_launch {
            return Err(DriverError::Launch("chrome not found".to_string()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FixtureSession::shared(
            self.page.clone(),
            self.state.clone(),
            self.closed.clone(),
        )))
    }
}
