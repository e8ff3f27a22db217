use criterion::{black_box, criterion_group, criterion_main, Criterion};
use postgate_review::Reviewer;
use serde_json::json;

fn bench_review(c: &mut Criterion) {
    let payload = json!({
        "posts": {
            "linkedin": "Excited to announce our new platform for developers",
            "twitter": "New dev platform launches today #tech",
            "instagram": "Meet the future of development",
            "facebook": "Join our growing tech community today"
        }
    });
    let fenced = json!({
        "content": [{
            "type": "text",
            "text": format!("Here are the posts:\n\n```json\n{}\n```\n\nEnjoy!", payload)
        }],
        "usage": {"input_tokens": 500, "output_tokens": 200}
    });
    let reviewer = Reviewer::default();

    c.bench_function("review_fenced_claude", |b| {
        b.iter(|| reviewer.review(black_box(&fenced), "claude"))
    });
}

criterion_group!(benches, bench_review);
criterion_main!(benches);
