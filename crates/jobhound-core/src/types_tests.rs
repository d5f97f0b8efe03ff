use super::*;

#[test]
fn test_query_defaults_blank_location() {
    let query = SearchQuery::new("Business Analyst", "   ", 50).unwrap();
    assert_eq!(query.term(), "Business Analyst");
    assert_eq!(query.location(), DEFAULT_LOCATION);
    assert_eq!(query.target_count(), 50);
}

#[test]
fn test_query_trims_input() {
    let query = SearchQuery::new("  Rust Engineer ", " Berlin ", 5).unwrap();
    assert_eq!(query.term(), "Rust Engineer");
    assert_eq!(query.location(), "Berlin");
}

#[test]
fn test_query_rejects_blank_term() {
    let err = SearchQuery::new(" ", "Worldwide", 10).unwrap_err();
    assert!(matches!(err, SearchError::InvalidQuery(_)));
}

#[test]
fn test_query_rejects_zero_target() {
    let err = SearchQuery::new("X", "Nowhere", 0).unwrap_err();
    assert!(matches!(err, SearchError::InvalidQuery(ref m) if m.contains("at least 1")));
}

#[test]
fn test_record_row_order() {
    let record = JobRecord {
        title: "Analyst".to_string(),
        company: "Acme".to_string(),
        location: "Remote".to_string(),
        date_posted: NaiveDate::from_ymd_opt(2024, 3, 15),
        link: "https://www.linkedin.com/jobs/view/1".to_string(),
    };
    assert_eq!(
        record.to_row(),
        [
            "Analyst",
            "Acme",
            "Remote",
            "2024-03-15",
            "https://www.linkedin.com/jobs/view/1"
        ]
        .map(String::from)
    );
}

#[test]
fn test_record_row_absent_date_is_empty() {
    let record = JobRecord {
        title: "Analyst".to_string(),
        ..Default::default()
    };
    assert_eq!(record.to_row()[3], "");
}

#[test]
fn test_result_set_accessors() {
    let set = ResultSet::new(vec![
        JobRecord {
            date_posted: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..Default::default()
        },
        JobRecord::default(),
    ]);
    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
    assert_eq!(set.dated_count(), 1);
    assert_eq!((&set).into_iter().count(), 2);
    assert!(ResultSet::default().is_empty());
}

#[test]
fn test_result_set_serializes_as_array() {
    let set = ResultSet::new(vec![JobRecord {
        title: "Analyst".to_string(),
        date_posted: NaiveDate::from_ymd_opt(2024, 3, 15),
        ..Default::default()
    }]);
    let json = serde_json::to_value(&set).unwrap();
    assert!(json.is_array());
    assert_eq!(json[0]["title"], "Analyst");
    assert_eq!(json[0]["date_posted"], "2024-03-15");
}
