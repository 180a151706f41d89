use super::{
    skills::SkillScoringParams,
    weights::{DEFAULT_WEIGHTS, Weights},
};
use crate::{JobPosting, MatchError, MatchResult, MatchScores};

/// 表示用に素点へ掛けるロジスティック曲線
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    /// `k`: 中点での傾き
    pub steepness: f64,
    /// `x0`: ちょうど 0.5 に写る素点
    pub midpoint: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            steepness: 6.0,
            midpoint: 0.5,
        }
    }
}

impl CurveParams {
    pub fn apply(&self, raw: f64) -> f64 {
        1.0 / (1.0 + (-self.steepness * (raw - self.midpoint)).exp())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    pub weights: Weights,
    pub location_bonus: f64,
    pub curve: CurveParams,
    pub skills: SkillScoringParams,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            location_bonus: 0.05,
            curve: CurveParams::default(),
            skills: SkillScoringParams::default(),
        }
    }
}

impl MatchingConfig {
    /// 既定値を `JM_*` 環境変数で上書きする。パースできない値は既定値のまま
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            weights: Weights {
                skill: env_f64("JM_SKILL_WEIGHT", defaults.weights.skill),
                experience: env_f64("JM_EXPERIENCE_WEIGHT", defaults.weights.experience),
                education: env_f64("JM_EDUCATION_WEIGHT", defaults.weights.education),
            },
            location_bonus: env_f64("JM_LOCATION_BONUS", defaults.location_bonus),
            curve: CurveParams {
                steepness: env_f64("JM_CURVE_STEEPNESS", defaults.curve.steepness),
                midpoint: env_f64("JM_CURVE_MIDPOINT", defaults.curve.midpoint),
            },
            skills: SkillScoringParams {
                fuzzy_threshold: env_f64("JM_FUZZY_THRESHOLD", defaults.skills.fuzzy_threshold),
                ..defaults.skills
            },
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        let params = [
            ("weights.skill", self.weights.skill),
            ("weights.experience", self.weights.experience),
            ("weights.education", self.weights.education),
            ("location_bonus", self.location_bonus),
            ("curve.steepness", self.curve.steepness),
            ("curve.midpoint", self.curve.midpoint),
            ("skills.fuzzy_threshold", self.skills.fuzzy_threshold),
            ("skills.breadth_bonus_per_skill", self.skills.breadth_bonus_per_skill),
            ("skills.breadth_bonus_cap", self.skills.breadth_bonus_cap),
        ];
        if let Some((name, value)) = params
            .iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            return Err(MatchError::InvalidConfig(format!(
                "{name} must be a non-negative number, got {value}"
            )));
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(MatchError::InvalidConfig(format!(
                "weights must sum to 1.0, got {sum:.6}"
            )));
        }

        Ok(())
    }
}

fn env_f64(key: &str, default: f64) -> f64 {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// 求人ごとの丸め前サブスコア
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
    pub location_bonus: f64,
}

/// 重み付き素点（クランプ済み）と曲線適用後の表示スコア
pub fn combine(config: &MatchingConfig, sub: &SubScores) -> (f64, f64) {
    let raw = (config.weights.combine(
        sub.skill.clamp(0.0, 1.0),
        sub.experience.clamp(0.0, 1.0),
        sub.education.clamp(0.0, 1.0),
    ) + sub.location_bonus)
        .clamp(0.0, 1.0);
    let curved = config.curve.apply(raw).clamp(0.0, 1.0);
    (raw, curved)
}

pub fn build_result(config: &MatchingConfig, job: &JobPosting, sub: &SubScores) -> MatchResult {
    let (raw, curved) = combine(config, sub);

    MatchResult {
        id: job.id.clone(),
        title: job.title.clone(),
        company: job.company.clone(),
        match_percentage: round_to(curved * 100.0, 1).clamp(0.0, 100.0),
        scores: MatchScores {
            skill: round_to(sub.skill.clamp(0.0, 1.0), 3),
            experience: round_to(sub.experience.clamp(0.0, 1.0), 3),
            education: round_to(sub.education.clamp(0.0, 1.0), 3),
            raw_final: round_to(raw, 3),
            final_score: round_to(curved, 3),
        },
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
