use super::{AchievementCategory, AchievementDefinition, Requirement, RequirementType};

const fn requirement(kind: RequirementType, target: f64) -> Requirement {
    Requirement {
        kind,
        target,
        subject: None,
    }
}

/// Built-in achievement definitions, in display order.
pub static ACHIEVEMENTS: &[AchievementDefinition] = &[
    AchievementDefinition {
        id: "first_steps",
        title: "First Steps",
        description: "Complete your first exam",
        category: AchievementCategory::Progress,
        points: 10,
        requirement: requirement(RequirementType::ExamCount, 1.0),
    },
    AchievementDefinition {
        id: "dedicated_learner",
        title: "Dedicated Learner",
        description: "Complete 10 exams",
        category: AchievementCategory::Progress,
        points: 50,
        requirement: requirement(RequirementType::ExamCount, 10.0),
    },
    AchievementDefinition {
        id: "exam_veteran",
        title: "Exam Veteran",
        description: "Complete 50 exams",
        category: AchievementCategory::Progress,
        points: 200,
        requirement: requirement(RequirementType::ExamCount, 50.0),
    },
    AchievementDefinition {
        id: "high_achiever",
        title: "High Achiever",
        description: "Maintain an average score of 85% or more",
        category: AchievementCategory::Performance,
        points: 100,
        requirement: requirement(RequirementType::ScoreThreshold, 85.0),
    },
    AchievementDefinition {
        id: "perfectionist",
        title: "Perfectionist",
        description: "Score 100% on an exam",
        category: AchievementCategory::Performance,
        points: 75,
        requirement: requirement(RequirementType::Perfect, 1.0),
    },
    AchievementDefinition {
        id: "flawless_five",
        title: "Flawless Five",
        description: "Score 100% on five exams",
        category: AchievementCategory::Performance,
        points: 150,
        requirement: requirement(RequirementType::Perfect, 5.0),
    },
    AchievementDefinition {
        id: "week_warrior",
        title: "Week Warrior",
        description: "Study seven days in a row",
        category: AchievementCategory::Consistency,
        points: 75,
        requirement: requirement(RequirementType::Streak, 7.0),
    },
    AchievementDefinition {
        id: "unstoppable",
        title: "Unstoppable",
        description: "Study thirty days in a row",
        category: AchievementCategory::Consistency,
        points: 300,
        requirement: requirement(RequirementType::Streak, 30.0),
    },
    AchievementDefinition {
        id: "subject_master",
        title: "Subject Master",
        description: "Reach 90% mastery in any subject",
        category: AchievementCategory::Mastery,
        points: 150,
        requirement: requirement(RequirementType::SubjectMaster, 90.0),
    },
    AchievementDefinition {
        id: "marathon_scholar",
        title: "Marathon Scholar",
        description: "Spend ten hours taking exams",
        category: AchievementCategory::Consistency,
        points: 100,
        requirement: requirement(RequirementType::TimeSpent, 600.0),
    },
    AchievementDefinition {
        id: "point_collector",
        title: "Point Collector",
        description: "Earn 1000 points",
        category: AchievementCategory::Special,
        points: 100,
        requirement: requirement(RequirementType::Milestone, 1000.0),
    },
    AchievementDefinition {
        id: "speed_demon",
        title: "Speed Demon",
        description: "Finish five exams in under half the allotted time",
        category: AchievementCategory::Special,
        points: 50,
        requirement: requirement(RequirementType::Speed, 5.0),
    },
];

pub fn find(id: &str) -> Option<&'static AchievementDefinition> {
    ACHIEVEMENTS.iter().find(|def| def.id == id)
}
