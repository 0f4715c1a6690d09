#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use okapi_core::error::OkapiError;
use okapi_core::method::AuthLevel;
use okapi_core::request::{Consumer, Request, Token, Transport};
use okapi_gateway::dispatch::{Dispatcher, MethodRegistry};
use okapi_gateway::obs::metrics::GatewayMetrics;
use okapi_gateway::stats::{CallType, MemoryStatsStore, StatsRecorder, StatsStore};
use okapi_gateway::users::MemoryUserDirectory;

use common::{empty_registry, BrokenOptionsService, CountingService, FailingStore};

const L1: &str = "services/logs/entry";
const L2: &str = "services/caches/geocache";
const L3: &str = "services/users/user";

struct Fixture {
    dispatcher: Dispatcher,
    store: Arc<MemoryStatsStore>,
    users: Arc<MemoryUserDirectory>,
    metrics: Arc<GatewayMetrics>,
    l1: Arc<CountingService>,
    l2: Arc<CountingService>,
    l3: Arc<CountingService>,
}

fn fixture_with(anonymize: bool, store_override: Option<Arc<dyn StatsStore>>) -> Fixture {
    let l1 = CountingService::new(AuthLevel::Anonymous);
    let l2 = CountingService::new(AuthLevel::Consumer);
    let l3 = CountingService::new(AuthLevel::Token);

    let mut registry: MethodRegistry = empty_registry();
    registry.register(L1, l1.clone()).unwrap();
    registry.register(L2, l2.clone()).unwrap();
    registry.register(L3, l3.clone()).unwrap();
    registry
        .register("services/logs/submit", CountingService::failing(AuthLevel::None))
        .unwrap();
    registry
        .register("services/attrs/attribute", Arc::new(BrokenOptionsService))
        .unwrap();

    let store = Arc::new(MemoryStatsStore::new());
    let backend: Arc<dyn StatsStore> = store_override.unwrap_or_else(|| store.clone() as Arc<dyn StatsStore>);
    let users = Arc::new(MemoryUserDirectory::new());
    let metrics = Arc::new(GatewayMetrics::default());
    let stats = Arc::new(StatsRecorder::new(backend, metrics.clone(), anonymize));
    let dispatcher = Dispatcher::new(Arc::new(registry), stats, users.clone(), metrics.clone(), "en");

    Fixture { dispatcher, store, users, metrics, l1, l2, l3 }
}

fn fixture() -> Fixture {
    fixture_with(false, None)
}

fn consumer() -> Consumer {
    Consumer::new("ck")
}

#[tokio::test]
async fn unknown_method_everywhere() {
    let f = fixture();
    let reg = f.dispatcher.registry();
    assert!(!reg.exists("services/nope"));
    assert!(!reg.exists("extra/cronjob"));

    let req = Request::anonymous(Transport::Http);
    assert!(matches!(
        f.dispatcher.call("services/nope", &req).await,
        Err(OkapiError::UnknownMethod(_))
    ));
    assert!(matches!(reg.options("services/nope"), Err(OkapiError::UnknownMethod(_))));
    assert!(matches!(reg.docs("services/nope").await, Err(OkapiError::UnknownMethod(_))));
    assert!(f.store.records().is_empty());
}

#[tokio::test]
async fn junk_names_share_one_error_series() {
    let f = fixture();
    let req = Request::anonymous(Transport::Http);
    for i in 0..10 {
        let name = format!("services/junk{i}/x");
        assert!(f.dispatcher.call(&name, &req).await.is_err());
    }
    assert_eq!(
        f.metrics
            .call_errors
            .get(&[("method", "unknown"), ("code", "UNKNOWN_METHOD")]),
        10
    );
    let text = f.metrics.render();
    assert!(!text.contains("junk"));
    assert_eq!(text.matches("okapi_call_errors_total{").count(), 1);
}

#[tokio::test]
async fn registering_outside_catalogue_fails() {
    let mut reg = empty_registry();
    let err = reg
        .register("services/made/up", CountingService::new(AuthLevel::None))
        .unwrap_err();
    assert!(matches!(err, OkapiError::UnknownMethod(_)));
}

#[tokio::test]
async fn level1_needs_no_identity() {
    let f = fixture();
    let resp = f
        .dispatcher
        .call(L1, &Request::anonymous(Transport::Internal))
        .await
        .expect("level 1 call");
    assert_eq!(resp.status, 200);
    assert_eq!(&resp.body[..], format!("hello from {L1}").as_bytes());
    assert_eq!(f.l1.count(), 1);
}

#[tokio::test]
async fn level2_without_consumer_never_reaches_handler() {
    let f = fixture();
    let err = f
        .dispatcher
        .call(L2, &Request::anonymous(Transport::Http))
        .await
        .unwrap_err();
    match err {
        OkapiError::AuthPrecondition { method, reason } => {
            assert_eq!(method, L2);
            assert_eq!(reason, "consumer required");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(f.l2.count(), 0);
    assert!(f.store.records().is_empty());
    assert_eq!(
        f.metrics
            .auth_rejections
            .get(&[("method", L2), ("reason", "consumer required")]),
        1
    );
}

#[tokio::test]
async fn level3_without_token_fails() {
    let f = fixture();
    let err = f
        .dispatcher
        .call(L3, &Request::with_consumer(consumer(), Transport::Http))
        .await
        .unwrap_err();
    assert!(matches!(err, OkapiError::AuthPrecondition { ref reason, .. } if reason == "token required"));
    assert_eq!(f.l3.count(), 0);
    assert!(f.store.records().is_empty());
}

#[tokio::test]
async fn level3_access_token_marks_last_login() {
    let f = fixture();
    let req = Request::with_token(consumer(), Token::access("at", 42), Transport::Http);
    f.dispatcher.call(L3, &req).await.expect("level 3 call");

    assert!(f.users.last_login(42).is_some());
    let rows = f.store.records();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, 42);
    assert_eq!(rows[0].consumer_key, "ck");
    assert_eq!(rows[0].calltype, CallType::Http);
}

#[tokio::test]
async fn request_token_does_not_mark_last_login() {
    let f = fixture();
    let req = Request::with_token(consumer(), Token::request("rt", 42), Transport::Http);
    f.dispatcher.call(L3, &req).await.expect("level 3 call");

    assert!(f.users.last_login(42).is_none());
    assert_eq!(f.store.records()[0].user_id, -1);
}

#[tokio::test]
async fn level2_with_access_token_does_not_mark_last_login() {
    let f = fixture();
    let req = Request::with_token(consumer(), Token::access("at", 42), Transport::Http);
    f.dispatcher.call(L2, &req).await.expect("level 2 call");
    assert!(f.users.last_login(42).is_none());
}

#[tokio::test]
async fn transport_decides_calltype() {
    let f = fixture();
    f.dispatcher
        .call(L1, &Request::with_consumer(consumer(), Transport::Http))
        .await
        .unwrap();
    f.dispatcher
        .call(L1, &Request::with_consumer(consumer(), Transport::Internal))
        .await
        .unwrap();

    let rows = f.store.records();
    assert_eq!(rows[0].calltype, CallType::Http);
    assert_eq!(rows[1].calltype, CallType::Internal);
    assert_eq!(rows[0].service_name, L1);
}

#[tokio::test]
async fn handler_failure_is_not_recorded() {
    let f = fixture();
    let err = f
        .dispatcher
        .call("services/logs/submit", &Request::anonymous(Transport::Http))
        .await
        .unwrap_err();
    assert!(matches!(err, OkapiError::BadRequest(_)));
    assert!(f.store.records().is_empty());
    assert_eq!(
        f.metrics
            .call_errors
            .get(&[("method", "services/logs/submit"), ("code", "BAD_REQUEST")]),
        1
    );
}

#[tokio::test]
async fn unbound_catalogue_name_is_misconfigured() {
    let f = fixture();
    let err = f
        .dispatcher
        .call("services/replicate/changelog", &Request::anonymous(Transport::Http))
        .await
        .unwrap_err();
    assert!(matches!(err, OkapiError::MisconfiguredHandler { .. }));
    assert!(err.to_string().contains("services/replicate/changelog"));
}

#[tokio::test]
async fn broken_options_accessor_is_misconfigured() {
    let f = fixture();
    let err = f.dispatcher.registry().options("services/attrs/attribute").unwrap_err();
    match err {
        OkapiError::MisconfiguredHandler { method, reason } => {
            assert_eq!(method, "services/attrs/attribute");
            assert!(reason.contains("options not declared"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn anonymization_replaces_user_ids() {
    let f = fixture_with(true, None);
    let req = Request::with_token(consumer(), Token::access("at", 42), Transport::Http);
    f.dispatcher.call(L3, &req).await.unwrap();
    f.dispatcher.call(L1, &Request::anonymous(Transport::Http)).await.unwrap();

    let rows = f.store.records();
    assert_eq!(rows[0].user_id, 0);
    assert_eq!(rows[1].user_id, -1);
    // last login still uses the real id
    assert!(f.users.last_login(42).is_some());
}

#[tokio::test]
async fn stats_failure_does_not_fail_call() {
    let f = fixture_with(false, Some(Arc::new(FailingStore)));
    let resp = f
        .dispatcher
        .call(L1, &Request::anonymous(Transport::Http))
        .await
        .expect("call must succeed");
    assert_eq!(resp.status, 200);
    assert_eq!(f.metrics.stats_write_failures.get(&[("method", L1)]), 1);
}

#[tokio::test]
async fn language_is_chosen_per_call() {
    let f = fixture();
    f.dispatcher
        .call(L1, &Request::anonymous(Transport::Http).langpref(["pl"]))
        .await
        .unwrap();
    f.dispatcher
        .call(L1, &Request::anonymous(Transport::Http).langpref(["xx", "de"]))
        .await
        .unwrap();
    f.dispatcher.call(L1, &Request::anonymous(Transport::Http)).await.unwrap();

    let langs = f.l1.languages.lock().unwrap().clone();
    assert_eq!(langs, vec!["pl", "de", "en"]);
}

#[tokio::test]
async fn internal_extra_stats() {
    let f = fixture();
    f.dispatcher
        .stats()
        .record_extra("cronjobs/cleanup", None, Duration::from_millis(120))
        .await;

    let rows = f.store.records();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].service_name, "extra/cronjobs/cleanup");
    assert_eq!(rows[0].consumer_key, "internal");
    assert_eq!(rows[0].user_id, -1);
    assert_eq!(rows[0].calltype, CallType::Internal);
}

#[tokio::test]
async fn concurrent_calls_share_registry() {
    let f = Arc::new(fixture());
    let mut handles = Vec::new();
    for _ in 0..16 {
        let f = Arc::clone(&f);
        handles.push(tokio::spawn(async move {
            f.dispatcher
                .call(L1, &Request::anonymous(Transport::Http))
                .await
                .map(|_| ())
        }));
    }
    for h in handles {
        h.await.unwrap().unwrap();
    }
    assert_eq!(f.l1.count(), 16);
    assert_eq!(f.store.records().len(), 16);
}
