use artext::{Artext, Config, ImageInfo, ImageKind, StaticProbe};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use url::Url;

pub fn bench(c: &mut Criterion) {
    let html = include_str!("../resources/tests/article.html").to_string();
    let config = Config {
        sample_theme: false,
        ..Config::default()
    };
    let probe = StaticProbe::new().with(
        "https://news.example.com/images/lead.jpg",
        ImageInfo::new(ImageKind::Jpeg, 1200, 800),
    );
    let artext = Artext::with_probe(config, Box::new(probe)).unwrap();
    let url = Url::parse("https://news.example.com/2015/06/harbour.html").unwrap();

    c.bench_function("extract", |b| {
        b.iter(|| artext.extract_html(black_box(&html), &url).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench
}
criterion_main!(benches);
