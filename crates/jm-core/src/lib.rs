pub mod error;
pub mod logging;
pub mod matching;
pub mod skill_normalizer;

use serde::{Deserialize, Deserializer, Serialize};

pub use error::MatchError;
pub use matching::pipeline::MatchingEngine;
pub use matching::scoring::MatchingConfig;

/// `null` を欠落キーと同じく既定値として読む
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// プロフィール解析側から渡される候補者情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    /// "3 years" や "2-4 yrs" などの自由記述
    pub experience: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub education: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Active,
    Inactive,
}

/// 求人1件。欠落・`null` のフィールドは既定値になる
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobPosting {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    /// 必要経験年数
    #[serde(deserialize_with = "null_as_default")]
    pub min_experience: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub education_keywords: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: JobStatus,
}

impl JobPosting {
    pub fn is_active(&self) -> bool {
        self.status == JobStatus::Active
    }

    /// スコア計算できない数値フィールドを持つ求人を弾く
    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.min_experience.is_finite() || self.min_experience < 0.0 {
            return Err(MatchError::InvalidField {
                job_id: self.id.clone(),
                field: "min_experience",
                reason: format!("expected non-negative years, got {}", self.min_experience),
            });
        }
        Ok(())
    }
}

/// 丸め済みの各スコア（いずれも 0.0〜1.0）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchScores {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub raw_final: f64,
    #[serde(rename = "final")]
    pub final_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub title: String,
    pub company: String,
    /// `final_score * 100` を小数1桁に丸めた値
    pub match_percentage: f64,
    pub scores: MatchScores,
}
