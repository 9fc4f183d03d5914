//! 工具函数性能基准测试

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use travel_catalog::utils::{
    clean_pdf_link, decode_list, encode_list, normalize_pdf_link, split_list, validate_pdf_link,
};

const DRIVE_VIEW: &str = "https://drive.google.com/file/d/1AbC_d-2XyZ/view?usp=sharing";
const DRIVE_PREVIEW: &str = "https://drive.google.com/file/d/1AbC_d-2XyZ/preview";

fn amenities(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Servicio {}", i)).collect()
}

// ============== 列表字段 ==============

fn bench_list_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/list_field");

    group.bench_function("split_legacy_text", |b| {
        b.iter(|| split_list(black_box("WiFi, Piscina, , Spa ,Gimnasio")));
    });

    for count in [5usize, 50, 500] {
        let items = amenities(count);
        let json = encode_list(&items);
        let legacy = items.join(", ");

        group.bench_with_input(BenchmarkId::new("decode_json", count), &json, |b, json| {
            b.iter(|| {
                assert_eq!(decode_list(black_box(json)).len(), count);
            });
        });
        group.bench_with_input(BenchmarkId::new("decode_legacy", count), &legacy, |b, raw| {
            b.iter(|| {
                assert_eq!(decode_list(black_box(raw)).len(), count);
            });
        });
    }

    group.finish();
}

// ============== PDF 链接 ==============

fn bench_pdf_link(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/pdf_link");

    group.bench_function("validate_valid", |b| {
        b.iter(|| {
            assert!(validate_pdf_link(black_box(DRIVE_VIEW)).is_ok());
        });
    });

    // 前缀不符时应尽早返回
    group.bench_function("validate_wrong_prefix", |b| {
        b.iter(|| {
            assert!(validate_pdf_link(black_box("https://example.com/folleto.pdf")).is_err());
        });
    });

    group.bench_function("normalize_view", |b| {
        b.iter(|| {
            assert_eq!(normalize_pdf_link(black_box(DRIVE_VIEW)), DRIVE_PREVIEW);
        });
    });

    group.bench_function("normalize_idempotent", |b| {
        b.iter(|| {
            assert_eq!(normalize_pdf_link(black_box(DRIVE_PREVIEW)), DRIVE_PREVIEW);
        });
    });

    group.bench_function("clean_full_path", |b| {
        let padded = format!("  {}  ", DRIVE_VIEW);
        b.iter(|| {
            assert_eq!(
                clean_pdf_link(black_box(Some(padded.as_str()))).unwrap().as_deref(),
                Some(DRIVE_PREVIEW)
            );
        });
    });

    group.finish();
}

criterion_group!(benches, bench_list_fields, bench_pdf_link);
criterion_main!(benches);
