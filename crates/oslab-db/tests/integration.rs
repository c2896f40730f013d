//! Store tests against in-memory and on-disk SQLite databases.

use oslab_core::{CleanedRecord, Platform};
use oslab_db::{RecordStore, StoreConfig, UpsertOutcome};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn record(platform: Platform, url: &str, text: &str, sentiment: f64) -> CleanedRecord {
    CleanedRecord {
        platform,
        user: "tester".to_string(),
        timestamp: "2024-05-01 12:00:00".to_string(),
        text: text.to_string(),
        url: url.to_string(),
        sentiment,
    }
}

fn sample_batch() -> Vec<CleanedRecord> {
    vec![
        record(Platform::Reddit, "https://reddit.com/r/a/1", "first post about privacy", 0.2),
        record(Platform::Hackernews, "https://news.ycombinator.com/item?id=2", "show hn a new scanner", 0.0),
        record(Platform::Github, "https://github.com/x/y", "terrible leak of secrets", -0.8),
    ]
}

async fn memory_store() -> RecordStore {
    RecordStore::open_and_init(&StoreConfig::in_memory())
        .await
        .expect("in-memory store should open")
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[tokio::test]
async fn init_is_idempotent() {
    let store = memory_store().await;
    store.init().await.expect("second init should succeed");
    store.init().await.expect("third init should succeed");
    assert_eq!(store.count_records().await.unwrap(), 0);
}

#[tokio::test]
async fn open_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("osint.db");

    let store = RecordStore::open_and_init(&StoreConfig::at_path(&path))
        .await
        .expect("store should open under a fresh directory");
    store.ping().await.unwrap();

    assert!(path.exists(), "database file should exist at {}", path.display());
}

#[tokio::test]
async fn open_fails_when_parent_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    let result = RecordStore::open(&StoreConfig::at_path(blocker.join("osint.db"))).await;
    assert!(result.is_err(), "opening beneath a regular file must fail");
}

// ---------------------------------------------------------------------------
// upsert_batch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_batch_twice_inserts_then_ignores() {
    let store = memory_store().await;
    let batch = sample_batch();

    let first = store.upsert_batch(&batch).await.unwrap();
    let second = store.upsert_batch(&batch).await.unwrap();

    assert_eq!(first, 3);
    assert_eq!(second, 0);
    assert_eq!(store.count_records().await.unwrap(), 3);
}

#[tokio::test]
async fn existing_url_is_never_overwritten() {
    let store = memory_store().await;
    let original = record(Platform::Reddit, "https://reddit.com/r/a/1", "original text here", 0.5);
    store.upsert_batch(&[original]).await.unwrap();

    let replacement = record(Platform::Twitter, "https://reddit.com/r/a/1", "replacement text", -0.5);
    let inserted = store.upsert_batch(&[replacement]).await.unwrap();
    assert_eq!(inserted, 0);

    let rows = store.list_records(None, 10).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].text, "original text here");
    assert_eq!(rows[0].platform, "reddit");
    assert!((rows[0].sentiment - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn duplicate_url_within_one_batch_counts_once() {
    let store = memory_store().await;
    let batch = vec![
        record(Platform::Reddit, "https://example.com/1", "one version of it", 0.1),
        record(Platform::Mastodon, "https://example.com/1", "another version", 0.3),
    ];
    assert_eq!(store.upsert_batch(&batch).await.unwrap(), 1);
}

#[tokio::test]
async fn malformed_rows_are_skipped_without_aborting_batch() {
    let store = memory_store().await;
    let batch = vec![
        record(Platform::Reddit, "https://example.com/good-1", "a perfectly fine row", 0.1),
        record(Platform::Reddit, "", "row with an empty url", 0.1),
        record(Platform::Reddit, "https://example.com/bad-score", "out of range score", 4.2),
        record(Platform::Reddit, "https://example.com/nan", "not a number score", f64::NAN),
        record(Platform::Reddit, "https://example.com/good-2", "another fine row", -0.1),
    ];

    let inserted = store.upsert_batch(&batch).await.unwrap();
    assert_eq!(inserted, 2);

    let urls: Vec<String> = store
        .list_records(None, 10)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.url)
        .collect();
    assert!(urls.contains(&"https://example.com/good-1".to_string()));
    assert!(urls.contains(&"https://example.com/good-2".to_string()));
}

#[tokio::test]
async fn rejected_rows_are_told_apart_from_known_urls() {
    let store = memory_store().await;
    store
        .upsert_batch(&[record(Platform::Reddit, "https://example.com/known", "already here", 0.0)])
        .await
        .unwrap();

    let batch = vec![
        record(Platform::Reddit, "https://example.com/known", "already here", 0.0),
        record(Platform::Reddit, "", "row with an empty url", 0.1),
        record(Platform::Reddit, "https://example.com/bad-score", "out of range score", 4.2),
        record(Platform::Reddit, "https://example.com/nan", "not a number score", f64::NAN),
        record(Platform::Reddit, "https://example.com/fresh", "a new row", 0.3),
    ];

    let outcome = store.upsert_batch_outcome(&batch).await.unwrap();
    assert_eq!(
        outcome,
        UpsertOutcome {
            inserted: 1,
            already_stored: 1,
            rejected: 3,
        }
    );
    assert_eq!(store.count_records().await.unwrap(), 2);
}

#[tokio::test]
async fn empty_batch_inserts_nothing() {
    let store = memory_store().await;
    assert_eq!(store.upsert_batch(&[]).await.unwrap(), 0);
}

#[tokio::test]
async fn url_uniqueness_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig::at_path(dir.path().join("osint.db"));

    let store = RecordStore::open_and_init(&config).await.unwrap();
    assert_eq!(store.upsert_batch(&sample_batch()).await.unwrap(), 3);
    store.close().await;

    let reopened = RecordStore::open_and_init(&config).await.unwrap();
    assert_eq!(reopened.upsert_batch(&sample_batch()).await.unwrap(), 0);
    assert_eq!(reopened.count_records().await.unwrap(), 3);
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_records_filters_by_platform_newest_first() {
    let store = memory_store().await;
    store.upsert_batch(&sample_batch()).await.unwrap();
    store
        .upsert_batch(&[record(Platform::Reddit, "https://reddit.com/r/b/9", "second reddit post", 0.0)])
        .await
        .unwrap();

    let rows = store.list_records(Some(Platform::Reddit), 10).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].url, "https://reddit.com/r/b/9");
    assert!(rows.iter().all(|r| r.platform == "reddit"));
}

#[tokio::test]
async fn list_records_respects_limit() {
    let store = memory_store().await;
    store.upsert_batch(&sample_batch()).await.unwrap();
    assert_eq!(store.list_records(None, 2).await.unwrap().len(), 2);
}

#[tokio::test]
async fn sentiment_by_platform_averages_and_sorts_ascending() {
    let store = memory_store().await;
    store
        .upsert_batch(&[
            record(Platform::Reddit, "u1", "reddit one text", 0.2),
            record(Platform::Reddit, "u2", "reddit two text", 0.4),
            record(Platform::Github, "u3", "github text here", -0.6),
        ])
        .await
        .unwrap();

    let rows = store.sentiment_by_platform().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].platform, "github");
    assert_eq!(rows[0].record_count, 1);
    assert_eq!(rows[1].platform, "reddit");
    assert_eq!(rows[1].record_count, 2);
    assert!((rows[1].avg_sentiment - 0.3).abs() < 1e-9);
}

#[tokio::test]
async fn list_texts_returns_insertion_order() {
    let store = memory_store().await;
    store.upsert_batch(&sample_batch()).await.unwrap();

    let texts = store.list_texts(None).await.unwrap();
    assert_eq!(
        texts,
        vec![
            "first post about privacy",
            "show hn a new scanner",
            "terrible leak of secrets"
        ]
    );

    let github = store.list_texts(Some(Platform::Github)).await.unwrap();
    assert_eq!(github, vec!["terrible leak of secrets"]);
}
