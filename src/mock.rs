//! Mock Data Generation
//!
//! Deterministic stand-ins for the storage layer: seeded students, exam
//! catalogs and history, all positioned relative to an injected `now`.

use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::types::{
    CandidateExam, DifficultyLevel, ExamAttempt, StudentPerformance, StudyPattern,
};

// ==================== Constants ====================

const SUBJECTS: &[(&str, &[&str])] = &[
    ("Mathematics", &["Algebra", "Geometry", "Calculus", "Statistics", "Trigonometry"]),
    ("Physics", &["Mechanics", "Optics", "Thermodynamics", "Electromagnetism"]),
    ("Chemistry", &["Organic Chemistry", "Inorganic Chemistry", "Physical Chemistry", "Stoichiometry"]),
    ("Biology", &["Genetics", "Ecology", "Cell Biology", "Human Physiology"]),
    ("English", &["Grammar", "Comprehension", "Essay Writing", "Literature"]),
    ("History", &["Ancient Civilizations", "World Wars", "Modern History"]),
];

const DURATIONS: &[u32] = &[30, 45, 60, 90, 120, 180, 200];
const TOTAL_MARKS: &[u32] = &[50, 100, 150, 200, 300, 400];
const EXAM_KINDS: &[&str] = &["Practice Test", "Unit Test", "Mock Exam", "Quiz", "Final Review"];

const DIFFICULTIES: [DifficultyLevel; 3] = [
    DifficultyLevel::Easy,
    DifficultyLevel::Medium,
    DifficultyLevel::Hard,
];

const STUDY_PATTERNS: [StudyPattern; 4] = [
    StudyPattern::Consistent,
    StudyPattern::Irregular,
    StudyPattern::Intensive,
    StudyPattern::Casual,
];

const MIN_HISTORY: usize = 5;
const MAX_HISTORY: usize = 15;
const MAX_HISTORY_SPAN_DAYS: i64 = 60;

pub struct MockDataGenerator {
    rng: ChaCha8Rng,
}

impl MockDataGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn subjects() -> impl Iterator<Item = &'static str> {
        SUBJECTS.iter().map(|(name, _)| *name)
    }

    fn topics_for(subject_idx: usize) -> &'static [&'static str] {
        SUBJECTS[subject_idx].1
    }

    fn pick_topics(&mut self, subject_idx: usize, max: usize) -> Vec<String> {
        let pool = Self::topics_for(subject_idx);
        let count = self.rng.gen_range(1..=max.min(pool.len()));
        pool.choose_multiple(&mut self.rng, count)
            .map(|t| t.to_string())
            .collect()
    }

    /// A chronological exam history ending before `now`.
    pub fn exam_history(&mut self, now: DateTime<Utc>) -> Vec<ExamAttempt> {
        let count = self.rng.gen_range(MIN_HISTORY..=MAX_HISTORY);
        let mut minutes_ago: Vec<i64> = (0..count)
            .map(|_| self.rng.gen_range(60..MAX_HISTORY_SPAN_DAYS * 24 * 60))
            .collect();
        minutes_ago.sort_unstable_by(|a, b| b.cmp(a));

        minutes_ago
            .into_iter()
            .enumerate()
            .map(|(i, ago)| {
                let subject_idx = self.rng.gen_range(0..SUBJECTS.len());
                let difficulty = DIFFICULTIES[self.rng.gen_range(0..DIFFICULTIES.len())];
                ExamAttempt {
                    exam_id: format!("attempt-{i}"),
                    subject: SUBJECTS[subject_idx].0.to_string(),
                    score: self.rng.gen_range(35..=100) as f64,
                    time_taken: self.rng.gen_range(15..=180) as f64,
                    difficulty,
                    topics: self.pick_topics(subject_idx, 2),
                    completed_at: now - Duration::minutes(ago),
                }
            })
            .collect()
    }

    pub fn student(&mut self, student_id: &str, now: DateTime<Utc>) -> StudentPerformance {
        let exam_history = self.exam_history(now);
        let average_score =
            exam_history.iter().map(|a| a.score).sum::<f64>() / exam_history.len().max(1) as f64;

        let mut subjects: Vec<usize> = (0..SUBJECTS.len()).collect();
        subjects.shuffle(&mut self.rng);
        let preferred_count = self.rng.gen_range(2..=3);
        let preferred_subjects = subjects[..preferred_count]
            .iter()
            .map(|&idx| SUBJECTS[idx].0.to_string())
            .collect();

        let weak_subject = subjects[preferred_count];
        let strong_subject = subjects[0];

        StudentPerformance {
            student_id: student_id.to_string(),
            exam_history,
            preferred_subjects,
            weak_areas: self.pick_topics(weak_subject, 2),
            strong_areas: self.pick_topics(strong_subject, 1),
            average_score,
            study_pattern: STUDY_PATTERNS[self.rng.gen_range(0..STUDY_PATTERNS.len())],
        }
    }

    pub fn students(&mut self, count: usize, now: DateTime<Utc>) -> Vec<StudentPerformance> {
        (0..count)
            .map(|i| self.student(&format!("student-{}", i + 1), now))
            .collect()
    }

    /// Candidate exams; roughly a quarter leave difficulty to inference.
    pub fn exam_catalog(&mut self, count: usize) -> Vec<CandidateExam> {
        (0..count)
            .map(|i| {
                let subject_idx = self.rng.gen_range(0..SUBJECTS.len());
                let subject = SUBJECTS[subject_idx].0;
                let kind = EXAM_KINDS[self.rng.gen_range(0..EXAM_KINDS.len())];
                let difficulty = if self.rng.gen_bool(0.25) {
                    None
                } else {
                    Some(DIFFICULTIES[self.rng.gen_range(0..DIFFICULTIES.len())])
                };

                CandidateExam {
                    id: format!("exam-{}", i + 1),
                    title: format!("{subject} {kind}"),
                    subject: subject.to_string(),
                    difficulty,
                    duration: DURATIONS.choose(&mut self.rng).copied(),
                    total_marks: TOTAL_MARKS.choose(&mut self.rng).copied(),
                    topics: Some(self.pick_topics(subject_idx, 3)),
                }
            })
            .collect()
    }
}
