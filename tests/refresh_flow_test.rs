use alhaja::domain::{EntityKind, Pesos};
use alhaja::gateway::{GatewayError, MockGateway, PersistenceGateway};
use alhaja::orchestration::{Loudness, RefreshCoordinator};
use alhaja::state::{self, ChangeFeed, Notification, NotificationReceiver, SharedState};
use alhaja::{Product, Settings};
use std::sync::Arc;
use std::time::Duration;

struct TestCore {
    coordinator: RefreshCoordinator,
    gateway: Arc<MockGateway>,
    state: SharedState,
    notices: NotificationReceiver,
}

fn setup(gateway: MockGateway, settings: Settings) -> TestCore {
    let gateway = Arc::new(gateway);
    let state = state::shared_state();
    let (tx, notices) = state::notification_channel();
    let coordinator = RefreshCoordinator::new(
        gateway.clone() as Arc<dyn PersistenceGateway>,
        state.clone(),
        tx,
        settings,
    );
    TestCore {
        coordinator,
        gateway,
        state,
        notices,
    }
}

fn make_product(name: &str) -> Product {
    Product::new(name, Pesos::new(80_000), "anillos", "verano")
}

#[tokio::test]
async fn loud_refresh_populates_the_snapshot() {
    let core = setup(
        MockGateway::new().with_product(make_product("Anillo Sol")),
        Settings::default(),
    );

    core.coordinator
        .refresh(EntityKind::Product, Loudness::Loud)
        .await;

    let state = core.state.read().await;
    assert_eq!(state.products().len(), 1);
    assert!(!state.is_loading(), "loading flag cleared after the fetch");
}

#[tokio::test(start_paused = true)]
async fn slow_gateway_degrades_to_empty_within_the_timeout() {
    let core = setup(
        MockGateway::new()
            .with_product(make_product("Anillo Sol"))
            .with_latency(Duration::from_secs(60)),
        Settings {
            fetch_timeout_ms: 500,
            ..Settings::default()
        },
    );

    core.coordinator
        .refresh(EntityKind::Product, Loudness::Loud)
        .await;

    assert!(core.state.read().await.products().is_empty());
}

#[tokio::test]
async fn read_outage_is_reported_once_not_per_retry() {
    let mut core = setup(
        MockGateway::new()
            .with_product(make_product("Anillo Sol"))
            .with_read_failure(GatewayError::Unavailable("503".to_string())),
        Settings::default(),
    );

    core.coordinator
        .refresh(EntityKind::Product, Loudness::Loud)
        .await;
    core.coordinator
        .refresh(EntityKind::Product, Loudness::Loud)
        .await;

    match core.notices.try_recv() {
        Ok(Notification::CatalogUnavailable { entity }) => {
            assert_eq!(entity, EntityKind::Product)
        }
        other => panic!("Expected CatalogUnavailable, got {:?}", other),
    }
    assert!(
        core.notices.try_recv().is_err(),
        "second failed retry stays quiet"
    );

    // recovery repopulates and re-arms the latch
    core.gateway.clear_read_failure();
    core.coordinator
        .refresh(EntityKind::Product, Loudness::Loud)
        .await;
    assert_eq!(core.state.read().await.products().len(), 1);
}

#[tokio::test]
async fn silent_refresh_failure_never_notifies() {
    let mut core = setup(
        MockGateway::new().with_read_failure(GatewayError::Unavailable("503".to_string())),
        Settings::default(),
    );

    core.coordinator
        .refresh(EntityKind::Product, Loudness::Silent)
        .await;

    assert!(core.notices.try_recv().is_err());
    assert!(!core.state.read().await.is_loading());
}

#[tokio::test(start_paused = true)]
async fn rapid_signals_coalesce_into_one_follow_up() {
    let core = setup(
        MockGateway::new()
            .with_product(make_product("Anillo Sol"))
            .with_latency(Duration::from_millis(50)),
        Settings::default(),
    );

    let background = {
        let coordinator = core.coordinator.clone();
        tokio::spawn(async move {
            coordinator
                .refresh(EntityKind::Product, Loudness::Silent)
                .await;
        })
    };
    tokio::task::yield_now().await; // first refresh is now in flight

    for _ in 0..4 {
        core.coordinator
            .refresh(EntityKind::Product, Loudness::Silent)
            .await;
    }
    background.await.unwrap();

    // one in-flight fetch plus exactly one coalesced follow-up
    assert_eq!(core.gateway.product_list_calls(), 2);
    assert_eq!(core.state.read().await.products().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn push_signal_schedules_a_silent_refresh() {
    let core = setup(
        MockGateway::new().with_product(make_product("Anillo Sol")),
        Settings::default(),
    );
    let feed = ChangeFeed::new();
    let _subscriptions = core.coordinator.attach(&feed);

    feed.notify(EntityKind::Product);
    // paused clock: the timer only fires once every spawned task is done
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(core.gateway.product_list_calls(), 1);
    assert_eq!(core.state.read().await.products().len(), 1);
    assert!(
        !core.state.read().await.is_loading(),
        "silent refresh never toggles the loading flag"
    );
}

#[tokio::test(start_paused = true)]
async fn settings_signal_fetches_nothing() {
    let core = setup(MockGateway::new(), Settings::default());
    let feed = ChangeFeed::new();
    let _subscriptions = core.coordinator.attach(&feed);

    feed.notify(EntityKind::Settings);
    tokio::time::sleep(Duration::from_millis(1)).await;

    assert_eq!(core.gateway.product_list_calls(), 0);
}
