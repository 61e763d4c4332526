//! Criterion benchmarks for the graph algorithm suite.
//!
//! Measures traversal, spanning tree, shortest-path and Hamiltonian search
//! cost over ring-plus-chords graphs of increasing size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphkit_core::{vertex_label, Graph, RunContext};

/// Undirected ring over `n` vertices with a chord from every vertex to the
/// one three steps ahead.
fn ring_with_chords(n: usize) -> Graph {
    let mut g = Graph::new();
    for i in 0..n {
        g.add_vertex(&vertex_label(i)).expect("fresh name");
    }
    for i in 0..n {
        let a = vertex_label(i);
        let _ = g.add_edge_both_ways(&a, &vertex_label((i + 1) % n), (i % 7 + 1) as i64);
        let _ = g.add_edge_both_ways(&a, &vertex_label((i + 3) % n), (i % 5 + 2) as i64);
    }
    g
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for n in [16, 64, 256] {
        let g = ring_with_chords(n);
        group.bench_with_input(BenchmarkId::new("bfs", n), &g, |b, g| {
            b.iter(|| g.bfs(black_box("A"), &mut RunContext::new()))
        });
        group.bench_with_input(BenchmarkId::new("dfs_matrix", n), &g, |b, g| {
            b.iter(|| g.dfs_matrix(black_box("A"), &mut RunContext::new()))
        });
    }
    group.finish();
}

fn bench_spanning_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst");
    for n in [16, 64, 256] {
        let g = ring_with_chords(n);
        group.bench_with_input(BenchmarkId::new("kruskal", n), &g, |b, g| {
            b.iter(|| g.kruskal(&mut RunContext::new()))
        });
        group.bench_with_input(BenchmarkId::new("prim", n), &g, |b, g| {
            b.iter(|| g.prim(&mut RunContext::new()))
        });
    }
    group.finish();
}

fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest");
    for n in [16, 64, 128] {
        let g = ring_with_chords(n);
        group.bench_with_input(BenchmarkId::new("dijkstra", n), &g, |b, g| {
            b.iter(|| g.dijkstra(black_box("A"), &mut RunContext::new()))
        });
        group.bench_with_input(BenchmarkId::new("bellman_ford", n), &g, |b, g| {
            b.iter(|| g.bellman_ford(black_box("A"), &mut RunContext::new()))
        });
        group.bench_with_input(BenchmarkId::new("floyd", n), &g, |b, g| {
            b.iter(|| g.floyd(&mut RunContext::new()))
        });
    }
    group.finish();
}

fn bench_hamilton(c: &mut Criterion) {
    let mut group = c.benchmark_group("hamilton");
    group.sample_size(10);
    for n in [6, 8] {
        let g = ring_with_chords(n);
        group.bench_with_input(BenchmarkId::new("backtracking", n), &g, |b, g| {
            b.iter(|| g.hamilton_backtracking(&mut RunContext::new()))
        });
        group.bench_with_input(BenchmarkId::new("roberts_flores", n), &g, |b, g| {
            b.iter(|| g.hamilton_roberts_flores(black_box("A"), &mut RunContext::new()))
        });
        group.bench_with_input(BenchmarkId::new("algebraic", n), &g, |b, g| {
            b.iter(|| g.hamilton_algebraic(black_box("A"), &mut RunContext::new()))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_traversal,
    bench_spanning_trees,
    bench_shortest_paths,
    bench_hamilton
);
criterion_main!(benches);
