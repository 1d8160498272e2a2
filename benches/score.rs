use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use east_core::{build_index, text, Algorithm};
use rand::{rngs::StdRng, Rng, SeedableRng};

const BENCH_TEXT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat.";
const QUERIES: [&str; 4] = ["DOLOR", "IPSUM", "EXERCITATION", "NONEXISTENT"];

fn random_fragments(rng: &mut StdRng, count: usize, len: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            (0..len)
                .map(|_| char::from(b'A' + rng.gen_range(0..26)))
                .collect()
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    let fragments = text::text_to_fragments(BENCH_TEXT, text::DEFAULT_WORDS_PER_FRAGMENT);

    for algorithm in [Algorithm::Naive, Algorithm::Linear, Algorithm::Easa] {
        group.bench_with_input(
            BenchmarkId::new("lorem", algorithm.name()),
            &algorithm,
            |b, &algorithm| b.iter(|| build_index(black_box(&fragments), algorithm).unwrap()),
        );
    }

    let mut rng = StdRng::seed_from_u64(42);
    for count in [10, 100, 1000] {
        let fragments = random_fragments(&mut rng, count, 12);
        for algorithm in [Algorithm::Linear, Algorithm::Easa] {
            group.bench_with_input(
                BenchmarkId::new(format!("random/{}", algorithm.name()), count),
                &count,
                |b, _| b.iter(|| build_index(black_box(&fragments), algorithm).unwrap()),
            );
        }
    }
    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoring");
    let fragments = text::text_to_fragments(BENCH_TEXT, text::DEFAULT_WORDS_PER_FRAGMENT);

    for algorithm in [Algorithm::Naive, Algorithm::Linear, Algorithm::Easa] {
        let index = build_index(&fragments, algorithm).unwrap();
        group.bench_with_input(
            BenchmarkId::new("queries", algorithm.name()),
            &index,
            |b, index| {
                b.iter(|| {
                    for query in QUERIES {
                        black_box(index.score(query));
                    }
                })
            },
        );
    }

    // Query length sweep against a fixed index.
    let index = build_index(&fragments, Algorithm::Easa).unwrap();
    for len in [2, 4, 8, 16] {
        let query: String = "DOLORSITAMETDOLO".chars().take(len).collect();
        group.bench_with_input(BenchmarkId::new("query_length", len), &len, |b, _| {
            b.iter(|| black_box(index.score(&query)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_scoring);
criterion_main!(benches);
