//! PostgreSQL end-to-end tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test postgres_tests

use integration_tests::{check_test_env, reserve_request, to_json, PgHarness};
use stream_common::AppConfig;
use stream_core::DomainError;
use stream_service::{LivestreamService, ReservationService, ServiceContext, ServiceError};

// ============================================================================
// Context
// ============================================================================

#[tokio::test]
async fn test_context_from_config_serves_and_shuts_down() {
    if !check_test_env() {
        return;
    }

    let config = AppConfig::from_env().expect("Failed to load config");
    let ctx = ServiceContext::from_config(&config)
        .await
        .expect("Failed to build context");

    assert_eq!(*ctx.horizon(), config.schedule.horizon().unwrap());
    assert_eq!(ctx.transaction_timeout(), config.schedule.transaction_timeout());

    let err = LivestreamService::new(&ctx).get(-1).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    ctx.shutdown().await;
    let err = LivestreamService::new(&ctx).get(-1).await.unwrap_err();
    assert_eq!(err.error_code(), "DATABASE_ERROR");
}

// ============================================================================
// Reservation
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_reservations_do_not_overbook() {
    if !check_test_env() {
        return;
    }

    let harness = PgHarness::start().await.expect("Failed to start harness");
    let owner = harness.insert_user(true).await.unwrap();
    let first = harness
        .insert_slot(harness.hour(0), harness.hour(1), 2)
        .await
        .unwrap();
    let second = harness
        .insert_slot(harness.hour(1), harness.hour(2), 2)
        .await
        .unwrap();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let ctx = harness.ctx.clone();
            let (start, end) = (harness.hour(0), harness.hour(2));
            tokio::spawn(async move {
                ReservationService::new(&ctx)
                    .reserve(owner, reserve_request(start, end, vec![]))
                    .await
            })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => admitted += 1,
            Err(err) => assert!(
                matches!(err.as_domain(), Some(DomainError::SlotExhausted { .. })),
                "{err}"
            ),
        }
    }

    assert_eq!(admitted, 2);
    assert_eq!(harness.slot_capacity(first).await.unwrap(), 0);
    assert_eq!(harness.slot_capacity(second).await.unwrap(), 0);
    assert_eq!(harness.livestream_count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_unknown_tag_rolls_back() {
    if !check_test_env() {
        return;
    }

    let harness = PgHarness::start().await.expect("Failed to start harness");
    let owner = harness.insert_user(false).await.unwrap();
    let tag = harness.insert_tag().await.unwrap();
    let slot = harness
        .insert_slot(harness.hour(0), harness.hour(1), 1)
        .await
        .unwrap();

    let err = ReservationService::new(&harness.ctx)
        .reserve(
            owner,
            reserve_request(harness.hour(0), harness.hour(1), vec![tag, -1]),
        )
        .await
        .unwrap_err();

    assert!(matches!(err.as_domain(), Some(DomainError::TagNotFound(-1))));
    assert_eq!(harness.slot_capacity(slot).await.unwrap(), 1);
    assert_eq!(harness.livestream_count().await.unwrap(), 0);
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn test_reserved_livestream_renders_identically_on_every_path() {
    if !check_test_env() {
        return;
    }

    let harness = PgHarness::start().await.expect("Failed to start harness");
    let owner = harness.insert_user(true).await.unwrap();
    let first_tag = harness.insert_tag().await.unwrap();
    let second_tag = harness.insert_tag().await.unwrap();

    let reserved = ReservationService::new(&harness.ctx)
        .reserve(
            owner,
            reserve_request(
                harness.hour(3),
                harness.hour(4),
                vec![second_tag, first_tag, second_tag],
            ),
        )
        .await
        .unwrap();
    assert_eq!(
        reserved.tags.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![second_tag, first_tag]
    );

    let service = LivestreamService::new(&harness.ctx);
    let fetched = service.get(reserved.id).await.unwrap();
    let listed = service.list_mine(owner).await.unwrap();

    assert_eq!(to_json(&fetched), to_json(&reserved));
    assert_eq!(listed.len(), 1);
    assert_eq!(to_json(&listed[0]), to_json(&reserved));
}

#[tokio::test]
async fn test_owner_with_several_themes_renders_identically_on_every_path() {
    if !check_test_env() {
        return;
    }

    let harness = PgHarness::start().await.expect("Failed to start harness");
    let owner = harness.insert_user(true).await.unwrap();
    let extra = harness.insert_theme(owner, false).await.unwrap();

    let reserved = ReservationService::new(&harness.ctx)
        .reserve(
            owner,
            reserve_request(harness.hour(5), harness.hour(6), vec![]),
        )
        .await
        .unwrap();
    assert!(reserved.owner.theme.id < extra);
    assert!(reserved.owner.theme.dark_mode);

    let service = LivestreamService::new(&harness.ctx);
    let fetched = service.get(reserved.id).await.unwrap();
    let listed = service.list_mine(owner).await.unwrap();

    assert_eq!(to_json(&fetched), to_json(&reserved));
    assert_eq!(listed.len(), 1);
    assert_eq!(to_json(&listed[0]), to_json(&reserved));
}
