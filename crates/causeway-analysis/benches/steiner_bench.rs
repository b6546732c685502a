//! Pattern generation benchmarks.
//!
//! Benchmarks: all-pairs paths plus Steiner tree over synthetic dependency
//! trees, and full query generation for one annotated sentence.
//! Run with: cargo bench -p causeway-analysis --bench steiner_bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use causeway_analysis::graph::{steiner_tree, PathTable, WeightedDigraph};
use causeway_analysis::patterns::PatternGenerator;
use causeway_analysis::sentence::{ParsedSentence, SentenceBuilder};
use causeway_core::PatternType;

/// A branching tree: node i hangs from (i - 1) / 3.
fn branching_tree(nodes: usize) -> WeightedDigraph {
    let mut graph = WeightedDigraph::with_nodes(nodes);
    for i in 1..nodes {
        graph.add_edge((i - 1) / 3, i, 1.0);
    }
    graph
}

/// A sentence of `len` tokens hanging off one verb in a chain of modifiers.
fn long_sentence(len: usize) -> ParsedSentence {
    let mut b = SentenceBuilder::new();
    let cause = b.add_token("heat", "heat", "NN");
    let verb = b.add_token("causes", "cause", "VBZ");
    b.add_edge(0, verb, "root").add_edge(verb, cause, "nsubj");
    let mut previous = verb;
    for i in 0..len {
        let word = format!("w{i}");
        let next = b.add_token(&word, &word, "NN");
        b.add_edge(previous, next, if i % 2 == 0 { "dobj" } else { "nmod" });
        previous = next;
    }
    b.build().unwrap()
}

fn steiner_over_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("steiner_tree");

    for size in [20, 60, 120] {
        let graph = branching_tree(size);
        let paths = PathTable::compute(&graph, false);
        let terminals = [size / 4, size / 2, size - 1];

        group.bench_with_input(BenchmarkId::new("kmb", size), &size, |b, _| {
            b.iter(|| steiner_tree(&graph, &terminals, &paths));
        });
        group.bench_with_input(BenchmarkId::new("all_pairs", size), &size, |b, _| {
            b.iter(|| PathTable::compute(&graph, false));
        });
    }
    group.finish();
}

fn generate_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("pattern_generation");
    let generator = PatternGenerator::with_settings(PatternType::Dependency, 6);

    for len in [4, 8] {
        let sentence = long_sentence(len);
        // Effect sits at the end of the modifier chain.
        let effect = sentence.len() - 1;
        group.bench_with_input(BenchmarkId::new("dependency", len), &len, |b, _| {
            b.iter(|| generator.generate(&sentence, &[2], &[1], &[effect]));
        });
    }
    group.finish();
}

criterion_group!(benches, steiner_over_trees, generate_patterns);
criterion_main!(benches);
