use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use futures_util::StreamExt;
use std::sync::Arc;
use storefront::store::catalog::DEMO_USER_ID;
use storefront::{
  bootstrap, CatalogSeeder, LocalProductsRepository, LocalStore, ProductsRepository, StoreOptions, Table,
};
use tokio::runtime::Runtime;

async fn open_seeded() -> LocalStore {
  LocalStore::open(StoreOptions::in_memory(), Some(Arc::new(CatalogSeeder)))
    .await
    .unwrap()
}

// --- Benchmark Functions ---

fn bench_bootstrap(c: &mut Criterion) {
  let mut group = c.benchmark_group("Bootstrap");
  let rt = Runtime::new().unwrap();

  // Fresh store per iteration: schema creation plus the full seed.
  group.bench_function("open_and_seed", |b| {
    b.to_async(&rt).iter(|| async {
      let store = open_seeded().await;
      store.close().await;
    })
  });

  // Re-running the seed on a populated store: every write hits its conflict policy.
  let populated = rt.block_on(open_seeded());
  let store = &populated;
  group.bench_function("reseed_populated", |b| {
    b.to_async(&rt).iter(|| async move {
      let report = bootstrap(&store).await;
      assert!(report.is_complete());
    })
  });
  group.finish();
}

fn bench_catalog_reads(c: &mut Criterion) {
  let mut group = c.benchmark_group("CatalogReads");
  let rt = Runtime::new().unwrap();
  let seeded = rt.block_on(open_seeded());
  let store = &seeded;
  let products = rt.block_on(store.count_rows(Table::Products)).unwrap();
  group.throughput(Throughput::Elements(products as u64));

  group.bench_function("get_products_with_variants", |b| {
    b.to_async(&rt).iter(|| async move { store.get_products().await.unwrap() })
  });
  group.bench_function("search_products", |b| {
    b.to_async(&rt).iter(|| async move { store.search_products("goreng").await.unwrap() })
  });
  group.finish();
}

fn bench_bookmark_stream(c: &mut Criterion) {
  let mut group = c.benchmark_group("BookmarkStream");
  let rt = Runtime::new().unwrap();
  let store = rt.block_on(open_seeded());
  let repository = LocalProductsRepository::new(store.clone());

  // One toggle followed by the snapshot it produces.
  group.bench_function("toggle_and_receive", |b| {
    let mut bookmarks = repository.get_local_bookmarks(DEMO_USER_ID);
    rt.block_on(bookmarks.next());
    b.iter(|| {
      rt.block_on(async {
        repository.toggle_bookmark(DEMO_USER_ID, 1).await;
        bookmarks.next().await
      })
    })
  });
  group.finish();
}

criterion_group!(benches, bench_bootstrap, bench_catalog_reads, bench_bookmark_stream);
criterion_main!(benches);
