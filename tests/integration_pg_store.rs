//! Postgres store integration tests
//!
//! These need a reachable database:
//! `DATABASE_URL=postgres://... cargo test --test integration_pg_store -- --ignored`

use chrono::Utc;
use sqlx::{Executor, PgPool};

use helper_review::store::{HelperStore, PgHelperStore, StoreError};
use helper_review::{HelperValidation, ReviewStatus};

async fn setup_store() -> PgHelperStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&url).await.expect("Failed to connect");

    pool.execute(include_str!("../migrations/0001_helper_validations.sql"))
        .await
        .expect("Failed to apply schema");

    PgHelperStore::new(pool)
}

fn unique_email(prefix: &str) -> String {
    format!(
        "{}-{}@pg.test",
        prefix,
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    )
}

fn pending(email: &str) -> HelperValidation {
    HelperValidation::new(email, "Pat", "Lee")
        .with_email_confirmed(true)
        .with_submissions(true, true)
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find() {
    let store = setup_store().await;
    let email = unique_email("insert");

    let inserted = store.insert(pending(&email)).await.unwrap();
    assert_eq!(inserted.version(), 1);

    let found = store.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(found, inserted);

    let duplicate = store.insert(pending(&email)).await;
    assert!(matches!(duplicate, Err(StoreError::AlreadyExists(_))));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_bumps_version() {
    let store = setup_store().await;
    let email = unique_email("update");
    let inserted = store.insert(pending(&email)).await.unwrap();

    let rejected = inserted.clone().with_status(ReviewStatus::Rejected {
        reason: Some("expired id".to_string()),
    });
    let committed = store.update(rejected, inserted.version()).await.unwrap();
    assert_eq!(committed.version(), 2);

    let found = store.find_by_email(&email).await.unwrap().unwrap();
    assert!(found.rejected());
    assert_eq!(found.rejection_reason(), Some("expired id"));
    assert_eq!(found.version(), 2);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_stale_version_conflicts() {
    let store = setup_store().await;
    let email = unique_email("stale");
    let inserted = store.insert(pending(&email)).await.unwrap();

    store
        .update(inserted.clone().with_status(ReviewStatus::UnderReview), 1)
        .await
        .unwrap();

    let stale = store
        .update(inserted.with_status(ReviewStatus::Validated), 1)
        .await;

    match stale {
        Err(StoreError::ConcurrencyConflict {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 1);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected conflict, got: {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_missing_helper() {
    let store = setup_store().await;

    let result = store.update(pending(&unique_email("missing")), 1).await;

    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pending_review_filter() {
    let store = setup_store().await;
    let ready = unique_email("ready");
    let unconfirmed = unique_email("unconfirmed");

    store.insert(pending(&ready)).await.unwrap();
    store
        .insert(pending(&unconfirmed).with_email_confirmed(false))
        .await
        .unwrap();

    let queue = store.find_pending_review().await.unwrap();

    assert!(queue.iter().any(|h| h.email() == ready));
    assert!(queue.iter().all(|h| h.email() != unconfirmed));
    assert!(queue.iter().all(HelperValidation::is_pending_review));
}
