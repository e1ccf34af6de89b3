use ccheck_engine::parser::Lexer;
use ccheck_engine::suggest::{FuzzySearch, IdentifierTrie};
use ccheck_engine::Checker;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

const PROGRAM: &str = r#"
int total;
long counter = 0;

int add(int a, int b) {
    int sum = a + b;
    return sum;
}

void report(void) {
    printf("%d\n", total);
}

int main() {
    for (int i = 0; i < 100; i++) {
        if (i % 3 == 0 && i != 0) {
            total += add(i, 0x1F);
        } else {
            counter++;
        }
    }
    while (counter > 0) {
        counter = counter - 1;
    }
    report();
    return 0;
}
"#;

fn identifiers(count: usize) -> IdentifierTrie {
    const STEMS: &[&str] = &["count", "index", "buffer", "value", "result", "total", "node", "len"];
    const SUFFIXES: &[&str] = &["", "_max", "_min", "_tmp", "_ptr", "_size", "_next", "_prev"];

    let mut trie = IdentifierTrie::new();
    'outer: for n in 0.. {
        for stem in STEMS {
            for suffix in SUFFIXES {
                if trie.len() >= count {
                    break 'outer;
                }
                trie.insert(&format!("{}{}{}", stem, suffix, n));
            }
        }
    }
    trie
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(PROGRAM.len() as u64));
    group.bench_function("program", |b| {
        b.iter(|| Lexer::new(black_box(PROGRAM)).tokenize());
    });
    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let checker = Checker::default();
    c.bench_function("check_program", |b| {
        b.iter(|| checker.check_with_libraries(black_box(PROGRAM), &["printf"]));
    });
}

fn bench_fuzzy(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy_search");
    let search = FuzzySearch::default();

    for size in [64, 512, 4096] {
        let trie = identifiers(size);
        group.bench_with_input(BenchmarkId::new("typo", size), &trie, |b, trie| {
            b.iter(|| search.search(trie, black_box("bufer_szie3"), 3));
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &trie, |b, trie| {
            b.iter(|| search.search(trie, black_box("qqqqqqqqqq"), 3));
        });
    }

    group.finish();
}

fn bench_prefix(c: &mut Criterion) {
    let trie = identifiers(4096);
    c.bench_function("prefix_lookup", |b| {
        b.iter(|| trie.find_words_with_prefix(black_box("value_"), 10));
    });
}

criterion_group!(benches, bench_lexer, bench_check, bench_fuzzy, bench_prefix);
criterion_main!(benches);
