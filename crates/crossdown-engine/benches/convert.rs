use criterion::{Criterion, criterion_group, criterion_main};
use crossdown_engine::{Dialect, Variables};

fn generate_document(sections: usize) -> String {
    let mut text = String::new();
    for section in 1..=sections {
        text.push_str(&format!("{section}.1 Section {section}\n\n"));
        text.push_str(
            "Body with a [base]^(gloss) span, a [note]-(hidden text) span, and `#anchor` code.\n\n",
        );
        text.push_str("```dialogue\nAlice>Hello there\nBob<Hi!\nAlice>>I was not sure\n```\n\n");
    }
    text
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.sample_size(10);

    let text = generate_document(100);
    let dialect = Dialect::new();
    let variables = Variables::new();
    group.bench_function("mixed_document", |b| {
        b.iter(|| {
            let rendered = dialect.convert(std::hint::black_box(&text), &variables);
            std::hint::black_box(rendered);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
