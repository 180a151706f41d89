use std::collections::HashSet;

use super::sequence::sequence_ratio;
use crate::skill_normalizer::{SkillNormalizer, normalize_skill_set};

const EXACT_WEIGHT: f64 = 0.7;
const FUZZY_WEIGHT: f64 = 0.2;
const COVERAGE_WEIGHT: f64 = 0.1;

/// あいまい一致と幅広さボーナスの調整値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillScoringParams {
    /// この値以下の類似度は一致なしとして扱う
    pub fuzzy_threshold: f64,
    pub breadth_bonus_per_skill: f64,
    pub breadth_bonus_cap: f64,
}

impl Default for SkillScoringParams {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.8,
            breadth_bonus_per_skill: 0.02,
            breadth_bonus_cap: 0.1,
        }
    }
}

/// 組み込みの同義語テーブルと既定値で類似度を計算する
pub fn calculate_skill_similarity(candidate_skills: &[String], job_skills: &[String]) -> f64 {
    let candidate = normalize_skill_set(candidate_skills);
    let job = normalize_skill_set(job_skills);
    score_normalized_sets(&candidate, &job, &SkillScoringParams::default())
}

pub fn skill_similarity(
    normalizer: &SkillNormalizer,
    candidate_skills: &[String],
    job_skills: &[String],
    params: &SkillScoringParams,
) -> f64 {
    let candidate = normalizer.normalize_set(candidate_skills);
    let job = normalizer.normalize_set(job_skills);
    score_normalized_sets(&candidate, &job, params)
}

/// 正規化済みのスキル集合同士を採点する
///
/// 完全一致が主。一致しなかった必須スキルは候補者側の近い綴りから部分点を得られ、
/// 候補者の追加スキルには上限付きの小さなボーナスが付く。
pub fn score_normalized_sets(
    candidate: &HashSet<String>,
    job: &HashSet<String>,
    params: &SkillScoringParams,
) -> f64 {
    if candidate.is_empty() || job.is_empty() {
        return 0.0;
    }

    let job_len = job.len() as f64;
    let exact_matches = candidate.intersection(job).count() as f64;
    let exact_score = exact_matches / job_len;

    let unmatched_job: Vec<&String> = job.difference(candidate).collect();
    let unmatched_candidate: Vec<&String> = candidate.difference(job).collect();

    // 全要件が完全一致していればあいまい一致は満点
    let fuzzy_score = if unmatched_job.is_empty() {
        1.0
    } else {
        let recovered: f64 = unmatched_job
            .iter()
            .map(|job_skill| best_fuzzy_ratio(job_skill, &unmatched_candidate, params))
            .sum();
        recovered / unmatched_job.len() as f64
    };

    let coverage_score = (exact_matches + fuzzy_score * unmatched_job.len() as f64) / job_len;

    let bonus = if candidate.len() > job.len() {
        ((candidate.len() - job.len()) as f64 * params.breadth_bonus_per_skill)
            .min(params.breadth_bonus_cap)
    } else {
        0.0
    };

    (exact_score * EXACT_WEIGHT
        + fuzzy_score * FUZZY_WEIGHT
        + coverage_score * COVERAGE_WEIGHT
        + bonus)
        .clamp(0.0, 1.0)
}

fn best_fuzzy_ratio(job_skill: &str, candidates: &[&String], params: &SkillScoringParams) -> f64 {
    candidates
        .iter()
        .map(|candidate| sequence_ratio(job_skill, candidate))
        .filter(|ratio| *ratio > params.fuzzy_threshold)
        .fold(0.0, f64::max)
}
