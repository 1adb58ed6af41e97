use fleet_catalog_model::{Category, Fuel, Item, ItemId, SatelliteTracking};
use fleet_catalog_store::{reconcile_persisted, ReconcileSource};
use criterion::{criterion_group, criterion_main, Criterion};

fn benchmark_reconcile(c: &mut Criterion) {
    let mk_item = |i: u32| Item {
        id: ItemId::new(i),
        category: if i % 4 == 0 {
            Category::Machinery
        } else {
            Category::Vehicle
        },
        brand: format!("Brand{}", i % 12),
        model: format!("Model {i}"),
        kind: "Pick-up".to_string(),
        year: 2010 + (i % 14) as u16,
        domain: format!("AA{i:04}"),
        satellite_tracking: SatelliteTracking::Active,
        fuel: Fuel::Diesel,
        capacity: String::new(),
        equipment: "N/A".to_string(),
        images: vec![format!("https://cdn.example/{i}.jpg")],
        technical_sheet: None,
    };
    let seed: Vec<Item> = (0..2_000_u32).map(mk_item).collect();
    let persisted: Vec<Item> = (0..2_000_u32)
        .rev()
        .map(|i| {
            let mut item = mk_item(i);
            item.images = vec![format!("data:image/png;base64,{i:064x}")];
            item
        })
        .collect();
    let raw = serde_json::to_string(&persisted).expect("encode persisted");

    c.bench_function("reconcile_persisted_2k", |b| {
        b.iter(|| {
            let out = reconcile_persisted(&seed, Some(&raw));
            assert!(matches!(out.source, ReconcileSource::Merged { .. }));
        });
    });
}

criterion_group!(benches, benchmark_reconcile);
criterion_main!(benches);
