use chrono::NaiveDate;
use jobhound_config::SelectorConfig;
use url::Url;

use super::*;
use crate::fixture::{FixtureCard, FixturePage, FixtureSession};

fn base() -> Url {
    Url::parse("https://www.linkedin.com/jobs/search/?keywords=Analyst").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

async fn extract_first(card: FixtureCard) -> JobRecord {
    extract_all(vec![card]).await.remove(0)
}

async fn extract_all(cards: Vec<FixtureCard>) -> Vec<JobRecord> {
    extract_page(FixturePage::new(cards)).await
}

async fn extract_page(page: FixturePage) -> Vec<JobRecord> {
    let n = page.cards.len();
    let session = FixtureSession::new(page);
    let mut records = Vec::new();
    for i in 0..n {
        let card = NodeRef(1000 * (i as i64 + 1));
        records.push(extract(&session, card, &SelectorConfig::default(), &base()).await);
    }
    records
}

#[test]
fn test_parse_iso_datetime_keeps_date() {
    assert_eq!(parse_posted_date("2024-03-15T08:00:00"), date(2024, 3, 15));
}

#[test]
fn test_parse_plain_date() {
    assert_eq!(parse_posted_date("2024-03-15"), date(2024, 3, 15));
    assert_eq!(parse_posted_date(" 2024-03-15 "), date(2024, 3, 15));
}

#[test]
fn test_parse_variants() {
    assert_eq!(parse_posted_date("2024-03-15T08:00:00.123456"), date(2024, 3, 15));
    assert_eq!(parse_posted_date("2024-03-15 23:59:59"), date(2024, 3, 15));
    assert_eq!(parse_posted_date("2024-03-15T08:00"), date(2024, 3, 15));
    assert_eq!(parse_posted_date("2024-03-15T23:30:00+05:30"), date(2024, 3, 15));
    assert_eq!(parse_posted_date("2024-03-15T01:00:00Z"), date(2024, 3, 15));
}

#[test]
fn test_parse_malformed_is_absent() {
    assert_eq!(parse_posted_date("not-a-date"), None);
    assert_eq!(parse_posted_date(""), None);
    assert_eq!(parse_posted_date("2024-13-40"), None);
    assert_eq!(parse_posted_date("2 days ago"), None);
}

#[tokio::test]
async fn test_complete_card() {
    let record = extract_first(FixtureCard::complete(7, "2024-03-15T08:00:00")).await;

    assert_eq!(record.title, "Analyst 7");
    assert_eq!(record.company, "Company 7");
    assert_eq!(record.location, "Remote");
    assert_eq!(record.date_posted, date(2024, 3, 15));
    assert_eq!(record.link, "https://www.linkedin.com/jobs/view/7");
}

#[tokio::test]
async fn test_absolute_link_kept() {
    let mut card = FixtureCard::complete(1, "2024-03-15");
    card.link = Some("https://example.com/jobs/1?refId=abc".to_string());
    let record = extract_first(card).await;
    assert_eq!(record.link, "https://example.com/jobs/1?refId=abc");
}

#[tokio::test]
async fn test_missing_fields_are_isolated() {
    let card = FixtureCard {
        title: Some("Data Analyst".to_string()),
        company: None,
        location: Some("Berlin".to_string()),
        link: None,
        date: Some("2024-02-01".to_string()),
    };
    let record = extract_first(card).await;

    assert_eq!(record.title, "Data Analyst");
    assert_eq!(record.company, "");
    assert_eq!(record.location, "Berlin");
    assert_eq!(record.link, "");
    assert_eq!(record.date_posted, date(2024, 2, 1));
}

#[tokio::test]
async fn test_malformed_date_only_drops_date() {
    let mut card = FixtureCard::complete(3, "not-a-date");
    card.title = Some("Analyst".to_string());
    let record = extract_first(card).await;

    assert_eq!(record.date_posted, None);
    assert_eq!(record.title, "Analyst");
    assert!(!record.link.is_empty());
}

#[tokio::test]
async fn test_empty_card_yields_empty_record() {
    let record = extract_first(FixtureCard::default()).await;
    assert_eq!(record, JobRecord::default());
}

#[tokio::test]
async fn test_driver_error_on_one_field_does_not_spread() {
    let mut page = FixturePage::new(vec![
        FixtureCard::complete(0, "2024-01-01"),
        FixtureCard::complete(1, "2024-01-02"),
    ]);
    page.broken_company = vec![0];
    let records = extract_page(page).await;

    assert_eq!(records[0].company, "");
    assert_eq!(records[0].title, "Analyst 0");
    assert_eq!(records[0].date_posted, date(2024, 1, 1));
    assert_eq!(records[1].company, "Company 1");
}
