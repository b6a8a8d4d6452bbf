use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use school_url_checker::validation::{contains_school_name, extract_visible_text, rank_gate};

fn sample_page(paragraphs: usize) -> String {
    let mut html = String::from(
        "<html><head><title>Lincoln High School</title>\
         <style>body { font-family: sans-serif; }</style>\
         <script>window.analytics = { school: 'Hidden' };</script></head><body>",
    );
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p>Paragraph {} about athletics, <b>enrollment</b> and the district calendar.</p>",
            i
        ));
    }
    html.push_str("<footer>Welcome to Lincoln High School</footer></body></html>");
    html
}

fn bench_visible_text(c: &mut Criterion) {
    let pages = vec![sample_page(10), sample_page(200), sample_page(2000)];

    let mut group = c.benchmark_group("visible_text");
    group.throughput(Throughput::Elements(pages.len() as u64));

    group.bench_function("extract_visible_text", |b| {
        b.iter(|| {
            for page in &pages {
                black_box(extract_visible_text(page));
            }
        })
    });

    group.finish();
}

fn bench_school_match(c: &mut Criterion) {
    let text = extract_visible_text(&sample_page(2000));
    let names = vec!["Lincoln High", "Roosevelt Preparatory Academy", "lincoln high school"];

    let mut group = c.benchmark_group("school_match");
    group.throughput(Throughput::Elements(names.len() as u64));

    group.bench_function("contains_school_name", |b| {
        b.iter(|| {
            for name in &names {
                black_box(contains_school_name(&text, name));
            }
        })
    });

    group.bench_function("rank_gate", |b| {
        b.iter(|| {
            for rank in ["1", "5", "6", "12", "n/a"] {
                black_box(rank_gate(rank));
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_visible_text, bench_school_match);
criterion_main!(benches);
