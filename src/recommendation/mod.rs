//! Exam Recommendation Engine
//!
//! Ranks candidate exams for a student by combining five weighted sub-scores
//! computed from the student's exam history:
//!
//! - **subject preference** - rank of the exam's subject in the preference list
//! - **performance history** - subject average blended with the recent trend
//! - **difficulty progression** - fit between exam tier and recent results
//! - **weak-area improvement** - overlap of exam topics with weak areas
//! - **recency** - time since the subject was last practised
//!
//! The weighted sum is the recommendation's confidence. Candidates at or below
//! the confidence floor are dropped; the rest are sorted (stable, descending)
//! and truncated to the requested limit.
//!
//! Every function here is pure. `now` is injected so results are reproducible.

pub mod explain;
pub mod scoring;

use chrono::{DateTime, Utc};
use rayon::prelude::*;

use crate::config::RecommendationConfig;
use crate::types::{
    CandidateExam, ExamRecommendation, ScoreBreakdown, StudentPerformance, StudentRecommendations,
};

use self::scoring::SubjectStats;

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommendationConfig {
        &self.config
    }

    /// Ranks `exams` for `student` against the current wall clock.
    pub fn generate_recommendations(
        &self,
        student: &StudentPerformance,
        exams: &[CandidateExam],
        limit: usize,
    ) -> Vec<ExamRecommendation> {
        self.generate_recommendations_at(student, exams, limit, Utc::now())
    }

    pub fn generate_recommendations_at(
        &self,
        student: &StudentPerformance,
        exams: &[CandidateExam],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<ExamRecommendation> {
        if limit == 0 || exams.is_empty() {
            return Vec::new();
        }

        let mut recommendations: Vec<ExamRecommendation> = exams
            .iter()
            .filter_map(|exam| {
                let stats = SubjectStats::from_history(student, &exam.subject);
                let breakdown = self.breakdown(student, exam, &stats, now);
                if breakdown.confidence > self.config.min_confidence {
                    Some(self.build_recommendation(student, exam, &breakdown, &stats))
                } else {
                    tracing::debug!(
                        student_id = %student.student_id,
                        exam_id = %exam.id,
                        confidence = breakdown.confidence,
                        "candidate below confidence floor"
                    );
                    None
                }
            })
            .collect();

        // sort_by is stable: equal confidences keep input order
        recommendations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        recommendations.truncate(limit);

        tracing::debug!(
            student_id = %student.student_id,
            candidates = exams.len(),
            returned = recommendations.len(),
            "recommendations generated"
        );

        recommendations
    }

    /// Sub-scores and confidence for a single candidate, without filtering.
    pub fn score_exam(
        &self,
        student: &StudentPerformance,
        exam: &CandidateExam,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        let stats = SubjectStats::from_history(student, &exam.subject);
        self.breakdown(student, exam, &stats, now)
    }

    /// Runs the engine for many students in parallel. Output order follows `students`.
    pub fn recommend_batch(
        &self,
        students: &[StudentPerformance],
        exams: &[CandidateExam],
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<StudentRecommendations> {
        students
            .par_iter()
            .map(|student| StudentRecommendations {
                student_id: student.student_id.clone(),
                recommendations: self.generate_recommendations_at(student, exams, limit, now),
            })
            .collect()
    }

    fn breakdown(
        &self,
        student: &StudentPerformance,
        exam: &CandidateExam,
        stats: &SubjectStats,
        now: DateTime<Utc>,
    ) -> ScoreBreakdown {
        let difficulty = scoring::resolve_difficulty(exam);
        let subject_preference =
            scoring::subject_preference_score(&exam.subject, &student.preferred_subjects);
        let performance_history = scoring::performance_history_score(stats);
        let difficulty_progression = scoring::difficulty_progression_score(stats, difficulty);
        let weak_area_improvement =
            scoring::weak_area_improvement_score(exam.topics(), &student.weak_areas);
        let recency = scoring::recency_score(stats, now);

        let w = &self.config.weights;
        let weighted = subject_preference * w.subject_preference
            + performance_history * w.performance_history
            + difficulty_progression * w.difficulty_progression
            + weak_area_improvement * w.weak_area_improvement
            + recency * w.recency;

        ScoreBreakdown {
            difficulty,
            subject_preference,
            performance_history,
            difficulty_progression,
            weak_area_improvement,
            recency,
            confidence: weighted.min(1.0),
        }
    }

    fn build_recommendation(
        &self,
        student: &StudentPerformance,
        exam: &CandidateExam,
        breakdown: &ScoreBreakdown,
        stats: &SubjectStats,
    ) -> ExamRecommendation {
        let targets_weak_area = scoring::targets_weak_area(exam.topics(), &student.weak_areas);

        ExamRecommendation {
            exam_id: exam.id.clone(),
            title: exam.title.clone(),
            subject: exam.subject.clone(),
            difficulty: breakdown.difficulty,
            estimated_score: explain::estimate_score(
                stats,
                student.average_score,
                breakdown.difficulty,
            ),
            confidence: breakdown.confidence,
            reasons: explain::build_reasons(&exam.subject, breakdown, stats, &self.config),
            priority: explain::assign_priority(breakdown.confidence, targets_weak_area, &self.config),
            topics: exam.topics().to_vec(),
            estimated_duration: exam.resolved_duration(),
        }
    }
}

/// Ranks `exams` for `student` with the default configuration.
pub fn generate_recommendations(
    student: &StudentPerformance,
    exams: &[CandidateExam],
    limit: usize,
) -> Vec<ExamRecommendation> {
    RecommendationEngine::default().generate_recommendations(student, exams, limit)
}
