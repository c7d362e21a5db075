use std::hint::black_box;

use axum::body::Body;
use axum::http::Request;
use criterion::{Criterion, criterion_group, criterion_main};
use tower::ServiceExt;

use gateway::checkout::{CheckoutRequest, build_payload};
use gateway::config::Settings;
use gateway::server;
use gateway::webhook::{sign, verify_signature};

const BODY: &str =
    r#"{"productId":"prod_1","planName":"Pro","amount":9.99,"userId":"u1","email":"a@b.co"}"#;

fn bench_payload(c: &mut Criterion) {
    c.bench_function("parse_validate_build_payload", |b| {
        b.iter(|| {
            let req = CheckoutRequest::from_json(black_box(BODY.as_bytes())).unwrap();
            let valid = req.validate().unwrap();
            black_box(build_payload(&valid, "https://studio.example"));
        })
    });
}

fn bench_webhook_signature(c: &mut Criterion) {
    let body = br#"{"type":"checkout.completed","data":{"metadata":{"userId":"u1"}}}"#;
    let sig = sign("whsec_bench", body).unwrap();
    c.bench_function("verify_webhook_signature", |b| {
        b.iter(|| verify_signature("whsec_bench", black_box(body), Some(&sig)).unwrap())
    });
}

fn bench_mock_checkout(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut settings = Settings::default();
    settings.creem.mock_mode = true;
    let app = server::create_app(settings).unwrap();

    c.bench_function("mock_checkout_roundtrip", |b| {
        b.to_async(&rt).iter(|| {
            let app = app.clone();
            async move {
                let req = Request::builder()
                    .method("POST")
                    .uri("/api/creem-checkout")
                    .header("content-type", "application/json")
                    .body(Body::from(BODY))
                    .unwrap();
                let res = app.oneshot(req).await.unwrap();
                black_box(res.status());
            }
        })
    });
}

criterion_group!(benches, bench_payload, bench_webhook_signature, bench_mock_checkout);
criterion_main!(benches);
