use std::process::ExitCode;

use chrono::Utc;
use serde::Serialize;

use exam_recommender::achievement::{self, AchievementEvaluation, LevelProgress};
use exam_recommender::config::AppConfig;
use exam_recommender::input::{InputError, RecommendationInput};
use exam_recommender::logging;
use exam_recommender::mock::MockDataGenerator;
use exam_recommender::{ExamRecommendation, RecommendationEngine};

const MOCK_CATALOG_SIZE: usize = 12;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    student_id: String,
    recommendations: Vec<ExamRecommendation>,
    achievements: AchievementEvaluation,
    level: LevelProgress,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = logging::init_tracing(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "recommendation run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig) -> Result<(), InputError> {
    let now = Utc::now();

    let input = match &config.input_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading request");
            RecommendationInput::from_file(path)?
        }
        None => {
            tracing::info!(seed = config.mock_seed, "generating mock request");
            let mut generator = MockDataGenerator::with_seed(config.mock_seed);
            RecommendationInput {
                student: generator.student("demo-student", now),
                exams: generator.exam_catalog(MOCK_CATALOG_SIZE),
                limit: None,
            }
        }
    };

    let engine = RecommendationEngine::new(config.recommendation.clone());
    let limit = input.limit.unwrap_or(config.recommendation.default_limit);
    let recommendations =
        engine.generate_recommendations_at(&input.student, &input.exams, limit, now);

    let stats = achievement::derive_user_stats(&input.student.exam_history, now);
    let achievements = achievement::evaluate_catalog(&[], &stats, now);
    let level = achievement::level_progress(stats.total_points + achievements.points_awarded);

    tracing::info!(
        student_id = %input.student.student_id,
        recommendations = recommendations.len(),
        unlocked = achievements.newly_unlocked.len(),
        level = level.level,
        "run complete"
    );

    let report = Report {
        student_id: input.student.student_id.clone(),
        recommendations,
        achievements,
        level,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
