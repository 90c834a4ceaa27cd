// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the photopdf-document crate: building a document
// from photos, deleting a page, merging two stored documents, and rendering a
// thumbnail.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use photopdf_core::StoredDocumentRecord;
use photopdf_document::pdf::editor;
use photopdf_document::{Document, DocumentBuilder, DocumentMerger, ThumbnailRenderer};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// `count` 320x240 photos with a horizontal gradient, so the encoder has
/// something other than a flat colour to compress.
fn photos(count: usize) -> Vec<DynamicImage> {
    (0..count)
        .map(|i| {
            let img = RgbImage::from_fn(320, 240, |x, y| {
                Rgb([(x % 256) as u8, (y % 256) as u8, (i * 40 % 256) as u8])
            });
            DynamicImage::ImageRgb8(img)
        })
        .collect()
}

fn built(count: usize) -> Document {
    DocumentBuilder::default()
        .build(photos(count))
        .expect("benchmark fixture builds")
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_build(c: &mut Criterion) {
    let images = photos(5);
    c.bench_function("build (5 photos, 320x240)", |b| {
        b.iter(|| {
            let doc = DocumentBuilder::default()
                .build(black_box(images.clone()))
                .expect("build");
            black_box(doc.page_count());
        });
    });
}

fn bench_delete_page(c: &mut Criterion) {
    let doc = built(10);
    c.bench_function("delete_page (10 pages)", |b| {
        b.iter(|| {
            let edited = editor::delete_page(black_box(&doc), 4).expect("delete");
            black_box(edited.page_count());
        });
    });
}

fn bench_merge(c: &mut Criterion) {
    let a = StoredDocumentRecord::new("a", built(5).to_bytes().expect("bytes"), None);
    let b = StoredDocumentRecord::new("b", built(5).to_bytes().expect("bytes"), None);
    let sources = vec![a, b];
    let merger = DocumentMerger::default();
    c.bench_function("merge (2 x 5 pages)", |bench| {
        bench.iter(|| {
            let outcome = merger.merge(black_box(&sources)).expect("merge");
            black_box(outcome.document.page_count());
        });
    });
}

fn bench_thumbnail(c: &mut Criterion) {
    let doc = built(1);
    let renderer = ThumbnailRenderer::default();
    c.bench_function("thumbnail_png (100x150)", |b| {
        b.iter(|| black_box(renderer.render_png(black_box(&doc), 0)));
    });
}

criterion_group!(benches, bench_build, bench_delete_page, bench_merge, bench_thumbnail);
criterion_main!(benches);
