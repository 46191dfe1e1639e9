use ingestion::{IngestionError, IngestionPipeline, IngestionStats, ProductCatalog};
use query::RecommendationEngine;
use smartreco_core::config::IngestionConfig;
use smartreco_core::error::{ErrorCode, SmartrecoError};
use smartreco_core::model::{InteractionRecord, ProductId, UserId};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const ACTIVITY: &str = "user_id,product_id,action\n\
    1,A,view\n1,B,view\n2,A,buy\n2,C,view\n2,A,view\n";
const PRODUCTS: &str = "product_id,category,price_range,brand,name\n\
    A,shoes,low,acme,Runner\nB,shoes,mid,acme,Walker\nC,hats,low,zen,Beanie\n";

fn write_fixtures(activity: &str, products: &str) -> (TempDir, IngestionConfig) {
    let dir = tempdir().unwrap();
    let interactions_path = dir.path().join("user_activity.csv");
    let products_path = dir.path().join("product.csv");
    fs::write(&interactions_path, activity).unwrap();
    fs::write(&products_path, products).unwrap();
    let config = IngestionConfig {
        interactions_path,
        products_path,
    };
    (dir, config)
}

#[test]
fn test_ingestion_flow_from_files() {
    let (_dir, config) = write_fixtures(ACTIVITY, PRODUCTS);

    let mut pipeline = IngestionPipeline::new();
    assert_eq!(pipeline.ingest_interactions_path(&config.interactions_path).unwrap(), 5);
    assert_eq!(pipeline.ingest_products_path(&config.products_path).unwrap(), 3);
    assert_eq!(
        pipeline.stats(),
        IngestionStats {
            interaction_records: 5,
            product_records: 3
        }
    );

    let index = pipeline.finish();
    assert_eq!(index.graph().edge_count(), 4);
    assert_eq!(index.popularity().count(&ProductId::new("A")), 3);
    assert_eq!(
        index.attributes().get(&ProductId::new("C")).unwrap().category,
        "hats"
    );
}

#[test]
fn test_e2e_load_to_recommendations() {
    let (_dir, config) = write_fixtures(ACTIVITY, PRODUCTS);
    let engine = RecommendationEngine::new(IngestionPipeline::load(&config).unwrap());

    let user = UserId::new("1");
    let collaborative: Vec<_> = engine.collaborative(&user).unwrap().into_iter().collect();
    assert_eq!(collaborative, vec![ProductId::new("C")]);
    assert!(engine.content_based(&user).unwrap().is_empty());
    assert_eq!(
        engine.popularity(),
        vec![ProductId::new("A"), ProductId::new("B"), ProductId::new("C")]
    );
}

#[test]
fn test_malformed_source_leaves_index_untouched() {
    let mut pipeline = IngestionPipeline::new();
    let bad = "user_id,product_id\n1,A\n2,B\n3\n";

    let err = pipeline.ingest_interactions("activity", bad.as_bytes()).unwrap_err();
    match &err {
        IngestionError::Malformed {
            source_name, row, ..
        } => {
            assert_eq!(source_name, "activity");
            assert_eq!(*row, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.error_code(), ErrorCode::InvalidArgument);

    assert_eq!(pipeline.index().graph().node_count(), 0);
    assert!(pipeline.index().popularity().is_empty());
    assert_eq!(pipeline.stats(), IngestionStats::default());
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let missing: PathBuf = dir.path().join("absent.csv");

    let mut pipeline = IngestionPipeline::new();
    let err = pipeline.ingest_products_path(&missing).unwrap_err();

    assert!(matches!(err, IngestionError::Io { .. }));
    assert_eq!(err.error_code(), ErrorCode::NotFound);
    assert!(err.to_string().contains("absent.csv"));
}

#[test]
fn test_later_product_records_overwrite() {
    let mut pipeline = IngestionPipeline::new();
    pipeline
        .ingest_products("first", "id,category,price,brand\nA,shoes,low,acme\n".as_bytes())
        .unwrap();
    pipeline
        .ingest_products("second", "id,category,price,brand\nA,boots,high,acme\n".as_bytes())
        .unwrap();

    let index = pipeline.finish();
    assert_eq!(index.attributes().len(), 1);
    assert_eq!(
        index.attributes().get(&ProductId::new("A")).unwrap().category,
        "boots"
    );
}

#[test]
fn test_pre_parsed_records() {
    let mut pipeline = IngestionPipeline::new();
    let applied = pipeline.apply_interactions(vec![
        InteractionRecord::new("1", "A"),
        InteractionRecord::new("1", "A"),
    ]);

    assert_eq!(applied, 2);
    let index = pipeline.finish();
    assert_eq!(index.graph().edge_count(), 1);
    assert_eq!(index.popularity().count(&ProductId::new("A")), 2);
}

#[test]
fn test_catalog_from_product_file() {
    let (_dir, config) = write_fixtures(ACTIVITY, PRODUCTS);
    let catalog = ProductCatalog::from_path(&config.products_path).unwrap();

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.display_name(&ProductId::new("B")), Some("Walker"));
}
