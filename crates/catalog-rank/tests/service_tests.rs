use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

use catalog_core::error::Error;
use catalog_core::types::Query;
use catalog_rank::CatalogService;

const FULL: &str = "\
ID,SKU,Name,Weight (lbs)
1,A1,Copper Wire,10
2,B2,Aluminum Cable,20
3,C3,Steel Conduit,30
";

const SMALL: &str = "\
ID,SKU,Name,Weight (lbs)
9,Z9,Fiber Cable,5
";

#[test]
fn startup_fails_on_unreadable_catalog() {
    let tmp = TempDir::new().unwrap();
    let err = CatalogService::load(tmp.path().join("missing.csv")).err().expect("load must fail");
    assert!(matches!(err, Error::Unreadable { .. }));
}

#[test]
fn startup_fails_on_missing_columns() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.csv");
    fs::write(&path, "Name,Weight (lbs)\nCable,1\n").unwrap();
    assert!(matches!(CatalogService::load(&path), Err(Error::MissingColumns(_))));
}

#[test]
fn reload_swaps_without_touching_held_snapshots() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.csv");
    fs::write(&path, FULL).unwrap();

    let service = CatalogService::load(&path).expect("load");
    let before = service.snapshot();
    assert_eq!(before.corpus().len(), 3);

    fs::write(&path, SMALL).unwrap();
    assert_eq!(service.reload().expect("reload"), 1);

    assert_eq!(before.corpus().len(), 3, "held snapshot is unchanged");
    assert_eq!(service.snapshot().corpus().len(), 1);
    assert_eq!(service.get_response(&Query::new("").sku("z9")).products[0].name, "Fiber Cable");
}

#[test]
fn failed_reload_keeps_previous_engine() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.csv");
    fs::write(&path, FULL).unwrap();
    let service = CatalogService::load(&path).expect("load");

    fs::write(&path, "Name\nbroken\n").unwrap();
    assert!(service.reload().is_err());
    assert_eq!(service.snapshot().corpus().len(), 3);
}

#[test]
fn concurrent_queries_share_one_snapshot() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.csv");
    fs::write(&path, FULL).unwrap();
    let service = Arc::new(CatalogService::load(&path).expect("load"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let engine = service.snapshot();
                engine.search(&Query::new("cable")).len()
            })
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
}
