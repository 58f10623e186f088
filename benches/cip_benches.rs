use criterion::{black_box, criterion_group, criterion_main, Criterion};
use logix_diag::{
    decode_text, extract_attribute_payload, AttributeRequest, FaultClass, FaultRecord,
    FAULT_RECORD_OFFSET,
};

fn bench_requests(c: &mut Criterion) {
    c.bench_function("attribute_request_narrow", |b| {
        b.iter(|| {
            AttributeRequest::new(black_box(0x70), black_box(24), black_box(5))
                .map(|r| r.to_bytes())
        })
    });

    c.bench_function("attribute_request_wide", |b| {
        b.iter(|| {
            AttributeRequest::new(black_box(0x70), black_box(24), black_box(300))
                .map(|r| r.to_bytes())
        })
    });
}

fn bench_replies(c: &mut Criterion) {
    let mut fault_reply = vec![0u8; FAULT_RECORD_OFFSET + 38];
    fault_reply[FAULT_RECORD_OFFSET + 20] = 1;
    fault_reply[FAULT_RECORD_OFFSET + 32] = 34;

    c.bench_function("fault_record_classify", |b| {
        b.iter(|| {
            FaultRecord::from_reply(black_box(&fault_reply), FAULT_RECORD_OFFSET)
                .map(|record| FaultClass::of(&record))
        })
    });

    let mut name_reply = vec![0u8; 54];
    name_reply.extend_from_slice(b"Periodic_100ms");

    c.bench_function("task_name_decode", |b| {
        b.iter(|| {
            extract_attribute_payload(black_box(&name_reply), 54).and_then(decode_text)
        })
    });
}

criterion_group!(benches, bench_requests, bench_replies);
criterion_main!(benches);
