use alhaja::domain::{
    AssetDraft, InternalAsset, Pesos, ProductDraft, ProductPatch, ProductStatus, ProductVariant,
    VariantDraft,
};
use alhaja::gateway::{GatewayError, MockGateway, PersistenceGateway};
use alhaja::state::{self, BulkAction, Notification, NotificationReceiver, SharedState};
use alhaja::{CatalogService, CoreError, Product, Settings};
use std::sync::Arc;
use uuid::Uuid;

struct TestCore {
    service: CatalogService,
    gateway: Arc<MockGateway>,
    state: SharedState,
    notices: NotificationReceiver,
}

fn setup(gateway: MockGateway) -> TestCore {
    let gateway = Arc::new(gateway);
    let state = state::shared_state();
    let (tx, notices) = state::notification_channel();
    let service = CatalogService::new(
        gateway.clone() as Arc<dyn PersistenceGateway>,
        state.clone(),
        tx,
        Settings::default(),
    );
    TestCore {
        service,
        gateway,
        state,
        notices,
    }
}

fn valid_draft(name: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        price: 80_000,
        images: vec!["cover.webp".to_string()],
        category: "anillos".to_string(),
        collection: "verano".to_string(),
        ..Default::default()
    }
}

fn make_product(name: &str) -> Product {
    Product::new(name, Pesos::new(80_000), "anillos", "verano")
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_gateway() {
    let mut core = setup(MockGateway::new());

    let draft = ProductDraft::named("Anillo Sol"); // no image, no price set
    let result = core.service.create_product(draft).await;

    assert!(matches!(result, Err(CoreError::Validation(_))));
    assert_eq!(core.gateway.write_calls(), 0);
    assert!(core.notices.try_recv().is_err(), "no notification for local validation");
}

#[tokio::test]
async fn create_stores_and_snapshots_the_product() {
    let core = setup(MockGateway::new());

    let stored = core
        .service
        .create_product(valid_draft("Anillo Sol"))
        .await
        .unwrap();

    assert_eq!(core.gateway.products().len(), 1);
    let state = core.state.read().await;
    assert_eq!(state.products().len(), 1);
    assert_eq!(state.products()[0].id, stored.id);
}

#[tokio::test]
async fn create_with_variants_writes_aggregated_caches() {
    let core = setup(MockGateway::new());

    let mut draft = valid_draft("Anillo Sol");
    draft.variants = vec![
        VariantDraft {
            stock: 3,
            unit_cost: 20_000,
            ..VariantDraft::named("Oro")
        },
        VariantDraft {
            stock: 0,
            unit_cost: 25_000,
            ..VariantDraft::named("Plata")
        },
    ];
    let stored = core.service.create_product(draft).await.unwrap();

    assert_eq!(stored.stock, Some(3));
    assert_eq!(stored.unit_cost, Some(Pesos::new(20_000)));
}

#[tokio::test]
async fn variant_patch_rewrites_stale_caches() {
    let product = make_product("Anillo Sol").with_stock(99, Pesos::new(1));
    let id = product.id;
    let core = setup(MockGateway::new().with_product(product));

    let patch = ProductPatch {
        variants: Some(vec![
            ProductVariant::new("Oro", 2, Pesos::new(30_000)),
            ProductVariant::new("Plata", 2, Pesos::new(10_000)),
        ]),
        ..Default::default()
    };
    let stored = core.service.update_product(id, patch).await.unwrap();

    assert_eq!(stored.stock, Some(4));
    assert_eq!(stored.unit_cost, Some(Pesos::new(20_000)));
}

#[tokio::test]
async fn set_primary_variant_persists_flags_cover_and_caches() {
    let mut product = make_product("Anillo Sol").with_images(vec![
        "front.webp".to_string(),
        "gold.webp".to_string(),
    ]);
    let gold = ProductVariant::new("Oro", 2, Pesos::new(30_000))
        .with_images(vec!["gold.webp".to_string()]);
    let gold_id = gold.id;
    let mut silver = ProductVariant::new("Plata", 1, Pesos::new(10_000));
    silver.is_primary = true;
    product.variants = vec![gold, silver];
    let product_id = product.id;

    let core = setup(MockGateway::new().with_product(product.clone()));
    core.state.write().await.replace_products(vec![product]);

    let stored = core
        .service
        .set_primary_variant(product_id, gold_id)
        .await
        .unwrap();

    let primaries: Vec<&str> = stored
        .variants
        .iter()
        .filter(|v| v.is_primary)
        .map(|v| v.name.as_str())
        .collect();
    assert_eq!(primaries, vec!["Oro"]);
    assert_eq!(stored.images[0], "gold.webp");
    assert_eq!(stored.stock, Some(3));

    // idempotent: calling again changes nothing
    let again = core
        .service
        .set_primary_variant(product_id, gold_id)
        .await
        .unwrap();
    assert_eq!(again.variants, stored.variants);
    assert_eq!(again.images, stored.images);
}

#[tokio::test]
async fn failed_write_surfaces_once_and_leaves_state_alone() {
    let product = make_product("Anillo Sol");
    let id = product.id;
    let mut core = setup(
        MockGateway::new()
            .with_product(product.clone())
            .with_write_failure(GatewayError::Rejected("quota".to_string())),
    );
    core.state.write().await.replace_products(vec![product]);

    let patch = ProductPatch {
        price: Some(99_000),
        ..Default::default()
    };
    let result = core.service.update_product(id, patch).await;
    assert!(matches!(result, Err(CoreError::Gateway(_))));

    let state = core.state.read().await;
    assert_eq!(state.products()[0].price, Pesos::new(80_000));
    match core.notices.try_recv() {
        Ok(Notification::WriteFailed { .. }) => {}
        other => panic!("Expected WriteFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn bulk_delete_reports_one_summary() {
    let a = make_product("A");
    let b = make_product("B");
    let ids = vec![a.id, b.id];
    let mut core = setup(MockGateway::new().with_products(vec![a.clone(), b.clone()]));
    core.state.write().await.replace_products(vec![a, b]);

    let outcome = core.service.delete_products(&ids).await;
    assert_eq!(outcome.done, 2);
    assert_eq!(outcome.failed, 0);
    assert!(core.gateway.products().is_empty());
    assert!(core.state.read().await.products().is_empty());

    match core.notices.try_recv() {
        Ok(Notification::BulkCompleted { action, done, failed }) => {
            assert_eq!(action, BulkAction::Delete);
            assert_eq!((done, failed), (2, 0));
        }
        other => panic!("Expected BulkCompleted, got {:?}", other),
    }
    assert!(core.notices.try_recv().is_err(), "one summary per batch");
}

#[tokio::test]
async fn bulk_status_change_updates_snapshot() {
    let a = make_product("A");
    let ids = vec![a.id];
    let core = setup(MockGateway::new().with_product(a.clone()));
    core.state.write().await.replace_products(vec![a]);

    let outcome = core
        .service
        .set_status_bulk(&ids, ProductStatus::SoldOut)
        .await;
    assert_eq!(outcome.done, 1);
    assert_eq!(
        core.state.read().await.products()[0].status,
        ProductStatus::SoldOut
    );
}

#[tokio::test]
async fn relocate_keeps_partial_progress_and_says_so() {
    let asset = InternalAsset::new("Cajas", "empaque", 10);
    let good_id = asset.id;
    let missing_id = Uuid::new_v4();
    let mut core = setup(MockGateway::new().with_asset(asset));

    let outcome = core
        .service
        .relocate_assets(&[good_id, missing_id], "vitrina")
        .await;

    assert_eq!(outcome.done, 1);
    assert_eq!(outcome.failed, 1);
    assert!(outcome.is_partial());
    assert_eq!(core.gateway.assets()[0].location, "vitrina");

    match core.notices.try_recv() {
        Ok(Notification::BulkCompleted { action, done, failed }) => {
            assert_eq!(action, BulkAction::Relocate);
            assert_eq!((done, failed), (1, 1));
        }
        other => panic!("Expected BulkCompleted, got {:?}", other),
    }
}

#[tokio::test]
async fn asset_draft_round_trip() {
    let core = setup(MockGateway::new());
    let stored = core
        .service
        .create_asset(AssetDraft {
            name: "Paño pulidor".to_string(),
            category: "limpieza".to_string(),
            stock: 12,
            min_stock: 4,
            unit_cost: 300,
            location: "bodega".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(core.gateway.assets().len(), 1);
    assert_eq!(stored.value(), Pesos::new(3_600));

    let outcome = core.service.delete_assets(&[stored.id]).await;
    assert_eq!(outcome.done, 1);
    assert!(core.gateway.assets().is_empty());
}
