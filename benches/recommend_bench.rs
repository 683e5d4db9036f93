//! Benchmark suite for exam-recommender
//!
//! Run with: cargo bench

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exam_recommender::achievement::{derive_user_stats, evaluate_catalog};
use exam_recommender::mock::MockDataGenerator;
use exam_recommender::RecommendationEngine;

fn bench_generate_recommendations(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    let mut generator = MockDataGenerator::with_seed(1);
    let student = generator.student("bench", now);
    let exams = generator.exam_catalog(200);
    let engine = RecommendationEngine::default();

    c.bench_function("generate_recommendations/200", |b| {
        b.iter(|| engine.generate_recommendations_at(black_box(&student), black_box(&exams), 5, now))
    });
}

fn bench_recommend_batch(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    let mut generator = MockDataGenerator::with_seed(2);
    let students = generator.students(64, now);
    let exams = generator.exam_catalog(100);
    let engine = RecommendationEngine::default();

    c.bench_function("recommend_batch/64x100", |b| {
        b.iter(|| engine.recommend_batch(black_box(&students), black_box(&exams), 5, now))
    });
}

fn bench_evaluate_achievements(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();
    let student = MockDataGenerator::with_seed(3).student("bench", now);
    let stats = derive_user_stats(&student.exam_history, now);

    c.bench_function("evaluate_catalog", |b| {
        b.iter(|| evaluate_catalog(&[], black_box(&stats), now))
    });
}

criterion_group!(
    benches,
    bench_generate_recommendations,
    bench_recommend_batch,
    bench_evaluate_achievements
);
criterion_main!(benches);
