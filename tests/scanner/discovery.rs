//! Repository discovery tests

use crate::common::fixtures::{git_available, git_repo, make_repo, make_tree};
use chrono::{Duration, Local, NaiveTime, TimeZone};
use tempfile::TempDir;
use weekly::scanner::api::{discover, ScanConfig};

async fn identities(config: &ScanConfig) -> Vec<(String, String)> {
    discover(config)
        .await
        .unwrap()
        .iter()
        .map(|d| (d.organization().to_string(), d.name().to_string()))
        .collect()
}

fn config_for(root: &std::path::Path) -> ScanConfig {
    ScanConfig::new(root, root.join("reports")).validate().unwrap()
}

#[tokio::test]
async fn test_recursive_discovery_derives_identity_from_depth() {
    let dir = TempDir::new().unwrap();
    make_tree(dir.path());

    let found = identities(&config_for(dir.path())).await;
    assert_eq!(
        found,
        vec![
            ("acme".to_string(), "cli".to_string()),
            ("acme".to_string(), "widget".to_string()),
            (String::new(), "top".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_non_recursive_discovery_stops_at_children() {
    let dir = TempDir::new().unwrap();
    make_tree(dir.path());

    let found = identities(&config_for(dir.path()).with_recursive(false)).await;
    assert_eq!(found, vec![(String::new(), "top".to_string())]);
}

#[tokio::test]
async fn test_root_that_is_a_repository() {
    let dir = TempDir::new().unwrap();
    let root = make_repo(dir.path(), "solo");
    make_repo(&root, "vendored/inner");

    let found = identities(&config_for(&root)).await;
    assert_eq!(found, vec![(String::new(), "solo".to_string())]);
}

#[tokio::test]
async fn test_nested_repositories_are_not_descended_into() {
    let dir = TempDir::new().unwrap();
    make_repo(dir.path(), "outer");
    make_repo(dir.path(), "outer/modules/inner");

    let found = identities(&config_for(dir.path())).await;
    assert_eq!(found, vec![(String::new(), "outer".to_string())]);
}

#[tokio::test]
async fn test_since_filter_excludes_repositories_without_commits() {
    let dir = TempDir::new().unwrap();
    make_tree(dir.path());

    let config = config_for(dir.path()).with_since(Some(Local::now() - Duration::days(7)));
    // Marker-only repositories have no readable history
    assert!(identities(&config).await.is_empty());
}

#[tokio::test]
async fn test_since_compares_calendar_dates() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let dir = TempDir::new().unwrap();
    let three_days_ago = Local::now() - Duration::days(3);
    let noon = Local
        .from_local_datetime(
            &three_days_ago
                .date_naive()
                .and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
        )
        .earliest()
        .unwrap();
    git_repo(dir.path(), "old", &[("feat: first", noon - Duration::days(30))]);
    git_repo(dir.path(), "recent", &[("fix: tweak", noon)]);

    // Later the same day still includes a commit made at noon
    let same_day_evening = noon + Duration::hours(11);
    let found = identities(&config_for(dir.path()).with_since(Some(same_day_evening))).await;
    assert_eq!(found, vec![(String::new(), "recent".to_string())]);

    let next_day = noon + Duration::days(1);
    assert!(identities(&config_for(dir.path()).with_since(Some(next_day))).await.is_empty());
}
