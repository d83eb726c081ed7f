use std::sync::atomic::{AtomicUsize, Ordering};

use unimatch_core::catalog::{Catalog, RawRow};
use unimatch_core::traits::Embedder;
use unimatch_embed::FakeEmbedder;
use unimatch_vector::{EmbeddingCache, EmbeddingIndex};

struct CountingEmbedder {
    inner: FakeEmbedder,
    calls: AtomicUsize,
}

impl Embedder for CountingEmbedder {
    fn embedder_id(&self) -> &str { self.inner.embedder_id() }
    fn dim(&self) -> usize { self.inner.dim() }
    fn max_len(&self) -> usize { self.inner.max_len() }
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>> {
        self.calls.fetch_add(texts.len(), Ordering::SeqCst);
        self.inner.embed_batch(texts)
    }
}

fn catalog() -> Catalog {
    let rows = [
        ("Bilgisayar Mühendisliği", "Yazılım, algoritma ve bilgisayar sistemleri", "5.000"),
        ("Hemşirelik", "Hasta bakımı ve sağlık hizmetleri", "150.000"),
        ("Grafik Tasarım", "Görsel iletişim ve sanat", "300.000"),
    ];
    let (catalog, _) = Catalog::from_rows(rows.iter().map(|(n, d, r)| RawRow {
        name: Some((*n).into()),
        description: Some((*d).into()),
        rank: Some((*r).into()),
        ..RawRow::default()
    }));
    catalog
}

#[test]
fn build_aligns_vectors_with_catalog() {
    let catalog = catalog();
    let embedder = FakeEmbedder::new(128);
    let index = EmbeddingIndex::build(&catalog, &embedder, 2, None).expect("build");

    assert_eq!(index.len(), catalog.len());
    assert_eq!(index.dim(), 128);
    let direct = embedder.embed_one(&catalog.records()[1].description).unwrap();
    assert_eq!(index.vector(1).unwrap(), direct.as_slice());
}

#[test]
fn similarities_follow_requested_subset() {
    let catalog = catalog();
    let embedder = FakeEmbedder::new(128);
    let index = EmbeddingIndex::build(&catalog, &embedder, 8, None).expect("build");
    let query = embedder.embed_one("sağlık, hasta").unwrap();

    let scores = index.similarities(&query, &[2, 1, 42]);
    let order: Vec<_> = scores.iter().map(|(i, _)| *i).collect();
    assert_eq!(order, vec![2, 1], "unknown index skipped, input order kept");
    assert!(scores[1].1 > scores[0].1, "health text is closer to a health query");
}

#[test]
fn cache_avoids_re_embedding_on_rebuild() {
    let tmp = tempfile::tempdir().unwrap();
    let catalog = catalog();
    let embedder = CountingEmbedder { inner: FakeEmbedder::new(32), calls: AtomicUsize::new(0) };

    let mut cache = EmbeddingCache::open(tmp.path(), embedder.embedder_id()).unwrap();
    let first = EmbeddingIndex::build(&catalog, &embedder, 2, Some(&mut cache)).unwrap();
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 3);

    let mut cache = EmbeddingCache::open(tmp.path(), embedder.embedder_id()).unwrap();
    let second = EmbeddingIndex::build(&catalog, &embedder, 2, Some(&mut cache)).unwrap();
    assert_eq!(embedder.calls.load(Ordering::SeqCst), 3, "second build is served from cache");
    assert_eq!(first.vector(2), second.vector(2));
}

#[test]
fn ragged_vectors_are_rejected() {
    assert!(EmbeddingIndex::from_vectors(vec![vec![1.0, 0.0], vec![1.0]], "x").is_err());
}
