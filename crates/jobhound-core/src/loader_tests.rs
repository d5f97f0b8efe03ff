use jobhound_config::{SearchConfig, SelectorConfig};

use super::*;
use crate::fixture::{FixturePage, FixtureSession};

fn settings() -> LoaderSettings {
    LoaderSettings::from_config(&SearchConfig::default(), &SelectorConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_scrolls_until_target() {
    let session = FixtureSession::new(FixturePage::with_dated_cards(60));
    let outcome = load_listings(&session, 50, &settings()).await.unwrap();

    assert_eq!(outcome.stop, LoadStop::TargetReached);
    assert_eq!(outcome.nodes.len(), 50);
    // 10 visible, +10 per scroll.
    assert_eq!(outcome.scroll_cycles, 4);
    assert_eq!(session.state.lock().scrolls, 4);
}

#[tokio::test(start_paused = true)]
async fn test_returns_first_nodes_in_order() {
    let session = FixtureSession::new(FixturePage::with_dated_cards(30));
    let outcome = load_listings(&session, 5, &settings()).await.unwrap();

    assert_eq!(outcome.scroll_cycles, 0);
    let expected: Vec<NodeRef> = (1..=5).map(|i| NodeRef(1000 * i)).collect();
    assert_eq!(outcome.nodes, expected);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_source_terminates() {
    let session = FixtureSession::new(FixturePage::with_dated_cards(25));
    let outcome = load_listings(&session, 50, &settings()).await.unwrap();

    assert_eq!(outcome.stop, LoadStop::Stalled);
    assert_eq!(outcome.nodes.len(), 25);
    // 2 growing scrolls (10 -> 20 -> 25), then 3 stalled ones.
    assert_eq!(outcome.scroll_cycles, 5);
}

#[tokio::test(start_paused = true)]
async fn test_failing_scroll_counts_as_stall() {
    let mut page = FixturePage::with_dated_cards(40);
    page.fail_scroll = true;
    let session = FixtureSession::new(page);

    let outcome = load_listings(&session, 40, &settings()).await.unwrap();
    assert_eq!(outcome.stop, LoadStop::Stalled);
    assert_eq!(outcome.nodes.len(), 10);
    assert_eq!(outcome.scroll_cycles, 3);
}

#[tokio::test(start_paused = true)]
async fn test_cycle_cap() {
    let mut page = FixturePage::with_dated_cards(1000);
    page.initially_visible = 1;
    page.per_scroll = 1;
    let session = FixtureSession::new(page);
    let mut settings = settings();
    settings.max_scroll_cycles = 7;

    let outcome = load_listings(&session, 500, &settings).await.unwrap();
    assert_eq!(outcome.stop, LoadStop::CycleCap);
    assert_eq!(outcome.scroll_cycles, 7);
    assert_eq!(outcome.nodes.len(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_no_cards_times_out() {
    let session = FixtureSession::new(FixturePage::with_dated_cards(0));
    let started = tokio::time::Instant::now();

    let err = load_listings(&session, 10, &settings()).await.unwrap_err();
    match err {
        SearchError::Timeout { selector, seconds } => {
            assert_eq!(selector, "div.base-card");
            assert_eq!(seconds, 20);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
    assert!(started.elapsed() >= Duration::from_secs(20));
}

#[tokio::test(start_paused = true)]
async fn test_closed_session_before_load_times_out() {
    let session = FixtureSession::new(FixturePage::with_dated_cards(5));
    session.close().await.unwrap();

    // Closed before the first card ever shows up: the wait budget runs out.
    let err = load_listings(&session, 5, &settings()).await.unwrap_err();
    assert!(matches!(err, SearchError::Timeout { .. }));
}

#[test]
fn test_settings_from_config() {
    let search = SearchConfig {
        stall_cycles: 0,
        ..Default::default()
    };
    let settings = LoaderSettings::from_config(&search, &SelectorConfig::default());
    assert_eq!(settings.stall_cycles, 1);
    assert_eq!(settings.poll_interval, Duration::from_secs(2));
    assert_eq!(settings.card_selector, "div.base-card");
}
