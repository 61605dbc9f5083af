//! Lexer throughput benchmark.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minic_lex::Lexer;

fn sample_program(repeat: usize) -> String {
    let unit = "int a = 5 + 3 * 2;\n\
                float b = a / 2 + 1.5;\n\
                bool keep = true;\n\
                while (keep) {\n\
                    print(b);\n\
                    if (a >= 10) { keep = false; }\n\
                    a = a + 1;\n\
                }\n";
    unit.repeat(repeat)
}

fn bench_lexer(c: &mut Criterion) {
    let small = sample_program(1);
    let large = sample_program(128);

    c.bench_function("lex_small_program", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(&small));
            black_box(lexer.tokenize())
        })
    });

    c.bench_function("lex_large_program", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(&large));
            black_box(lexer.tokenize())
        })
    });
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
