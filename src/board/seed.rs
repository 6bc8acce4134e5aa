//! Default stage set and sample roster used when no remote persistence is
//! configured, or when an initial remote fetch fails.

use super::domain::{Applicant, ApplicantId, EvaluationProgress, RegistrationType, StageId, StageInfo};

/// Stage id of the pinned terminal column.
pub const HIRED_STAGE: &str = "hired";

/// Palette offered by the add-column dialog.
pub const STAGE_COLORS: [&str; 12] = [
    "#F59E0B", "#10B981", "#3B82F6", "#8B5CF6", "#EC4899", "#14B8A6", "#06B6D4", "#EF4444",
    "#6366F1", "#84CC16", "#F97316", "#0EA5E9",
];

const DEFAULT_STAGES: [(&str, &str, &str, bool); 7] = [
    ("application", "Application Review", "#F59E0B", false),
    ("screen_call", "Recruiter Screen", "#10B981", false),
    ("coding_test", "Coding Test", "#3B82F6", false),
    ("interview_1", "Interview I (Team)", "#8B5CF6", false),
    ("interview_2", "Interview II (Exec)", "#EC4899", false),
    ("final_negotiation", "Offer Negotiation", "#14B8A6", false),
    (HIRED_STAGE, "Hired", "#06B6D4", true),
];

pub fn default_stages() -> Vec<StageInfo> {
    DEFAULT_STAGES
        .iter()
        .map(|(id, title, color, is_fixed)| StageInfo {
            id: StageId((*id).to_string()),
            title: (*title).to_string(),
            color: (*color).to_string(),
            is_fixed: *is_fixed,
        })
        .collect()
}

struct SeedRow(&'static str, &'static str, &'static str, RegistrationType, &'static str, u32, u32);

const D: RegistrationType = RegistrationType::Direct;
const P: RegistrationType = RegistrationType::Posted;

fn seed_rows() -> Vec<SeedRow> {
    vec![
        SeedRow("A001", "Kim Jiwon", "application", D, "2025. 09. 02", 0, 1),
        SeedRow("A002", "Lee Seojun", "application", P, "2025. 09. 03", 1, 2),
        SeedRow("A003", "Park Minseo", "application", D, "2025. 09. 04", 0, 1),
        SeedRow("A004", "Choi Sua", "application", P, "2025. 09. 05", 2, 3),
        SeedRow("A005", "Jung Yejun", "application", D, "2025. 09. 06", 0, 1),
        SeedRow("A006", "Kang Hayun", "application", P, "2025. 09. 07", 1, 1),
        SeedRow("A007", "Cho Siwoo", "application", D, "2025. 09. 08", 0, 2),
        SeedRow("A008", "Yoon Doyun", "application", P, "2025. 09. 09", 1, 2),
        SeedRow("A009", "Jang Seoyun", "application", D, "2025. 09. 10", 0, 1),
        SeedRow("A010", "Lim Juwon", "application", P, "2025. 09. 11", 2, 2),
        SeedRow("A011", "Han Jiho", "application", D, "2025. 09. 12", 0, 1),
        SeedRow("A012", "Oh Minjun", "application", P, "2025. 09. 13", 1, 3),
        SeedRow("B001", "Seo Yujin", "screen_call", D, "2025. 08. 25", 1, 2),
        SeedRow("B002", "Shin Hajun", "screen_call", P, "2025. 08. 26", 0, 1),
        SeedRow("B003", "Kwon Jian", "screen_call", D, "2025. 08. 27", 2, 2),
        SeedRow("B004", "Hwang Eunwoo", "screen_call", P, "2025. 08. 28", 1, 1),
        SeedRow("C001", "Song Taehyun", "coding_test", D, "2025. 08. 20", 0, 1),
        SeedRow("C002", "Jeon Sohee", "coding_test", P, "2025. 08. 21", 1, 2),
        SeedRow("C003", "Hong Minjae", "coding_test", D, "2025. 08. 22", 0, 1),
        SeedRow("D001", "Moon Jiyoung", "interview_1", P, "2025. 08. 15", 1, 1),
        SeedRow("D002", "Bae Sungmin", "interview_1", D, "2025. 08. 16", 0, 2),
        SeedRow("E001", "Baek Seungho", "interview_2", P, "2025. 08. 10", 2, 2),
        SeedRow("E002", "Yoo Nayeon", "interview_2", D, "2025. 08. 11", 1, 1),
        SeedRow("F001", "Noh Hyunwoo", "final_negotiation", P, "2025. 08. 05", 1, 1),
        SeedRow("G001", "Ahn Junghoon", HIRED_STAGE, D, "2025. 08. 01", 1, 1),
    ]
}

pub fn sample_applicants() -> Vec<Applicant> {
    seed_rows()
        .into_iter()
        .map(|SeedRow(id, name, stage, registration_type, applied_date, current, total)| Applicant {
            id: ApplicantId(id.to_string()),
            name: name.to_string(),
            stage: StageId(stage.to_string()),
            registration_type,
            applied_date: applied_date.to_string(),
            evaluation: EvaluationProgress::new(current, total),
        })
        .collect()
}
