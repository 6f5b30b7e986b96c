use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fever_baseline::domain::{Claim, EvidenceItem, EvidenceSet, LabelDistribution};
use fever_baseline::error::{InferenceError, RetrievalError};
use fever_baseline::pipeline::Predictor;
use fever_baseline::port::{EvidenceRetriever, LabelInference};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::runtime::Runtime;

const LABELS: [&str; 3] = ["REFUTES", "SUPPORTS", "NOT ENOUGH INFO"];

/// Collaborators that do not record calls.
struct StaticRetriever(EvidenceSet);

impl EvidenceRetriever for StaticRetriever {
    fn fetch_evidence<'a>(
        &'a self,
        _claim: &'a Claim,
    ) -> Pin<Box<dyn Future<Output = Result<EvidenceSet, RetrievalError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.0.clone()) })
    }
}

struct StaticModel(LabelDistribution);

impl LabelInference for StaticModel {
    fn infer<'a>(
        &'a self,
        _claim: &'a Claim,
        _evidence: &'a [EvidenceItem],
    ) -> Pin<Box<dyn Future<Output = Result<LabelDistribution, InferenceError>> + Send + 'a>> {
        Box::pin(async move { Ok(self.0.clone()) })
    }

    fn label_name(&self, index: usize) -> Option<&str> {
        LABELS.get(index).copied()
    }
}

fn static_model() -> Arc<StaticModel> {
    Arc::new(StaticModel(LabelDistribution::new(vec![0.2, 0.7, 0.1])))
}

fn static_retriever() -> Arc<StaticRetriever> {
    let evidence: Vec<EvidenceItem> = (0..5).map(|i| EvidenceItem::new("doc1", i)).collect();
    Arc::new(StaticRetriever(evidence))
}

fn make_logits(n: usize) -> Vec<f64> {
    (0..n).map(|i| ((i * 7919) % 1000) as f64 / 10.0).collect()
}

fn bench_argmax(c: &mut Criterion) {
    let mut group = c.benchmark_group("argmax");

    for size in [3, 64, 4096] {
        let distribution = LabelDistribution::new(make_logits(size));
        group.bench_with_input(
            BenchmarkId::new("label_distribution", size),
            &distribution,
            |b, distribution| {
                b.iter(|| black_box(distribution).argmax());
            },
        );
    }

    group.finish();
}

fn bench_predict(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let predictor = Predictor::new(static_retriever(), static_model());
    let claim = Claim::new("The sky is blue.").unwrap();

    c.bench_function("predict_single", |b| {
        b.iter(|| rt.block_on(predictor.predict(black_box(&claim))));
    });
}

fn bench_predict_batch(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let predictor = Predictor::new(static_retriever(), static_model());

    let mut group = c.benchmark_group("predict_batch");

    for size in [10, 100] {
        let claims: Vec<Claim> = (0..size)
            .map(|i| Claim::new(format!("claim number {i}")).unwrap())
            .collect();
        for concurrency in [1, 8] {
            group.bench_with_input(
                BenchmarkId::new(format!("concurrency_{concurrency}"), size),
                &claims,
                |b, claims| {
                    b.iter(|| rt.block_on(predictor.predict_batch(black_box(claims), concurrency)));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_argmax, bench_predict, bench_predict_batch);
criterion_main!(benches);
