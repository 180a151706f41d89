use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// 求人に学歴要件があるのに候補者の学歴が空の場合のスコア
pub const MISSING_EDUCATION_SCORE: f64 = 0.4;
/// 候補者側に学位キーワードが見つからない場合のレベルスコア
const UNKNOWN_LEVEL_SCORE: f64 = 0.5;

/// キーワード → 学位レベル（大きいほど上位）。部分文字列で照合する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EducationLevels {
    pub levels: Vec<(String, u8)>,
}

const BUILTIN_LEVELS: &[(&str, u8)] = &[
    ("phd", 5),
    ("doctorate", 5),
    ("master", 4),
    ("msc", 4),
    ("mtech", 4),
    ("mba", 4),
    ("m.e", 4),
    ("bachelor", 3),
    ("btech", 3),
    ("b.e", 3),
    ("bsc", 3),
    ("diploma", 2),
    ("certification", 1),
    ("certificate", 1),
];

static DEFAULT_LEVELS: LazyLock<EducationLevels> = LazyLock::new(|| EducationLevels {
    levels: BUILTIN_LEVELS
        .iter()
        .map(|(keyword, level)| ((*keyword).to_string(), *level))
        .collect(),
});

impl Default for EducationLevels {
    fn default() -> Self {
        (*DEFAULT_LEVELS).clone()
    }
}

impl EducationLevels {
    /// `text`（小文字化済み）に含まれるキーワードの最高レベル。なければ 0
    pub fn highest_in(&self, text: &str) -> u8 {
        self.levels
            .iter()
            .filter(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, level)| *level)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EducationScorer {
    levels: EducationLevels,
}

impl EducationScorer {
    pub fn new(levels: EducationLevels) -> Self {
        Self { levels }
    }

    /// キーワード一致率と学位レベル比較の高い方
    pub fn score(&self, candidate_education: &[String], job_keywords: &[String]) -> f64 {
        if job_keywords.is_empty() {
            return 1.0;
        }
        if candidate_education.is_empty() {
            return MISSING_EDUCATION_SCORE;
        }

        let lowered_lines: Vec<String> = candidate_education
            .iter()
            .map(|line| line.to_lowercase())
            .collect();
        let lowered_keywords: Vec<String> =
            job_keywords.iter().map(|kw| kw.to_lowercase()).collect();

        let candidate_level = lowered_lines
            .iter()
            .map(|line| self.levels.highest_in(line))
            .max()
            .unwrap_or(0);
        let required_level = lowered_keywords
            .iter()
            .map(|kw| self.levels.highest_in(kw))
            .max()
            .unwrap_or(0);

        let candidate_text = lowered_lines.join(" ");
        let keyword_hits = lowered_keywords
            .iter()
            .filter(|kw| candidate_text.contains(kw.as_str()))
            .count();
        let keyword_score = keyword_hits as f64 / lowered_keywords.len() as f64;

        let level_score = if candidate_level >= required_level {
            1.0
        } else if candidate_level > 0 {
            f64::from(candidate_level) / f64::from(required_level)
        } else {
            UNKNOWN_LEVEL_SCORE
        };

        keyword_score.max(level_score).clamp(0.0, 1.0)
    }
}

/// 組み込みのレベル表で採点する
pub fn calculate_education_score(candidate_education: &[String], job_keywords: &[String]) -> f64 {
    EducationScorer::default().score(candidate_education, job_keywords)
}
