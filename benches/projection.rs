use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trick_combo_graph::{marshal, normalize, to_graph, to_sequence, ComboGraph, MovementNode};

fn combo(tricks: usize) -> ComboGraph {
    let graph = ComboGraph::from_movements(
        (0..tricks)
            .map(|i| MovementNode::new(format!("movement-{i}")))
            .collect(),
    );
    (0..tricks.saturating_sub(1))
        .step_by(2)
        .fold(graph, |graph, i| graph.with_transition(i, "skip"))
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    for size in [4, 32, 256] {
        let graph = combo(size);
        let sequence = to_sequence(&graph).unwrap();

        group.bench_with_input(BenchmarkId::new("to_sequence", size), &graph, |b, graph| {
            b.iter(|| to_sequence(black_box(graph)))
        });
        group.bench_with_input(BenchmarkId::new("to_graph", size), &sequence, |b, sequence| {
            b.iter(|| to_graph(black_box(sequence)))
        });
        group.bench_with_input(BenchmarkId::new("normalize", size), &sequence, |b, sequence| {
            b.iter(|| normalize(black_box(sequence)))
        });
        group.bench_with_input(BenchmarkId::new("marshal", size), &graph, |b, graph| {
            b.iter(|| marshal(black_box(graph)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_projection);
criterion_main!(benches);
