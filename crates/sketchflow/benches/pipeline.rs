use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::json;
use sketchflow::{generate_sync, GenerateOptions};

fn medium_flow() -> serde_json::Value {
    let nodes: Vec<serde_json::Value> = (0..40)
        .map(|i| json!({"id": format!("n{i}"), "label": format!("Step {i}")}))
        .collect();
    let edges: Vec<serde_json::Value> = (0..39)
        .map(|i| json!({"from": format!("n{i}"), "to": format!("n{}", i + 1)}))
        .collect();
    json!({
        "type": "flow",
        "title": "Pipeline",
        "nodes": nodes,
        "edges": edges,
        "groups": [
            {"id": "g1", "label": "Head", "contains": ["n0", "n1", "n2", "n3"]},
            {"id": "g2", "label": "Tail", "contains": ["n36", "n37", "n38", "n39"]},
        ],
    })
}

fn medium_sequence() -> serde_json::Value {
    let participants: Vec<serde_json::Value> = (0..6)
        .map(|i| json!({"id": format!("p{i}"), "label": format!("Party {i}")}))
        .collect();
    let messages: Vec<serde_json::Value> = (0..30)
        .map(|i| json!({"from": format!("p{}", i % 6), "to": format!("p{}", (i + 1) % 6), "label": format!("msg {i}")}))
        .collect();
    json!({
        "type": "sequence",
        "participants": participants,
        "messages": messages,
    })
}

fn bench_pipeline(c: &mut Criterion) {
    let flow = medium_flow();
    let sequence = medium_sequence();
    let options = GenerateOptions::default();

    c.bench_function("generate_flow_40_nodes", |b| {
        b.iter(|| generate_sync(&flow, &options).unwrap())
    });
    c.bench_function("generate_sequence_30_messages", |b| {
        b.iter(|| generate_sync(&sequence, &options).unwrap())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
