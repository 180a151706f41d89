use std::{cmp::Ordering, collections::HashSet, time::Instant};

use rayon::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    education::{EducationLevels, EducationScorer},
    experience::{calculate_experience_score, extract_years},
    location::location_bonus,
    scoring::{MatchingConfig, SubScores, build_result},
    skills::score_normalized_sets,
};
use crate::{
    CandidateProfile, JobPosting, MatchError, MatchResult,
    skill_normalizer::{SkillNormalizer, SynonymTable},
};

/// 1回のランク付けで全求人が共有する候補者側の前処理結果
#[derive(Debug, Clone)]
pub struct PreparedCandidate<'a> {
    profile: &'a CandidateProfile,
    skills: HashSet<String>,
    years: f64,
    location: String,
}

/// 候補者を求人プールに対して採点する。読み取り専用のテーブルしか持たないので
/// 1つのエンジンを複数スレッドから共有できる
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
    normalizer: SkillNormalizer,
    education: EducationScorer,
}

enum Outcome {
    Scored(Box<MatchResult>),
    Inactive,
    Failed,
}

impl MatchingEngine {
    pub fn new(
        config: MatchingConfig,
        synonyms: SynonymTable,
        levels: EducationLevels,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            config,
            normalizer: SkillNormalizer::new(synonyms),
            education: EducationScorer::new(levels),
        })
    }

    pub fn with_config(config: MatchingConfig) -> Result<Self, MatchError> {
        Self::new(config, SynonymTable::default(), EducationLevels::default())
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn prepare<'a>(&self, candidate: &'a CandidateProfile) -> PreparedCandidate<'a> {
        PreparedCandidate {
            profile: candidate,
            skills: self.normalizer.normalize_set(&candidate.skills),
            years: extract_years(candidate.experience.as_deref()),
            location: candidate.location.trim().to_lowercase(),
        }
    }

    /// 求人1件を採点する。失敗するのは求人自体が使えない場合のみ
    pub fn score_job(
        &self,
        candidate: &PreparedCandidate<'_>,
        job: &JobPosting,
    ) -> Result<MatchResult, MatchError> {
        job.validate()?;

        let job_skills = self.normalizer.normalize_set(&job.skills);
        let sub = SubScores {
            skill: score_normalized_sets(&candidate.skills, &job_skills, &self.config.skills),
            experience: calculate_experience_score(candidate.years, job.min_experience),
            education: self
                .education
                .score(&candidate.profile.education, &job.education_keywords),
            location_bonus: location_bonus(
                &candidate.location,
                &job.location,
                self.config.location_bonus,
            ),
        };

        Ok(build_result(&self.config, job, &sub))
    }

    /// 型付きプールを一致度の高い順に並べる。非アクティブ・不正な求人は除外し、
    /// 採点は並列に行う
    pub fn rank_jobs(&self, candidate: &CandidateProfile, jobs: &[JobPosting]) -> Vec<MatchResult> {
        let prepared = self.prepare(candidate);
        let outcomes: Vec<Outcome> = jobs
            .par_iter()
            .map(|job| self.evaluate(&prepared, job))
            .collect();
        finish(jobs.len(), outcomes)
    }

    /// 求人ストアから受け取った型なしプールをランク付けする。求人としてデコード
    /// できない要素はログに残してスキップする
    pub fn rank_json(&self, candidate: &CandidateProfile, jobs: &[Value]) -> Vec<MatchResult> {
        let prepared = self.prepare(candidate);
        let outcomes: Vec<Outcome> = jobs
            .par_iter()
            .enumerate()
            .map(|(index, raw)| self.decode_and_evaluate(&prepared, index, raw))
            .collect();
        finish(jobs.len(), outcomes)
    }

    /// 逐次処理でランク付けし、`deadline` を過ぎたら新しい求人に手を付けない。
    /// それまでに採点できた分をソートして返す
    pub fn rank_jobs_until(
        &self,
        candidate: &CandidateProfile,
        jobs: &[JobPosting],
        deadline: Instant,
    ) -> Vec<MatchResult> {
        let prepared = self.prepare(candidate);
        let outcomes = until_deadline(jobs, deadline, |_, job| self.evaluate(&prepared, job));
        finish(jobs.len(), outcomes)
    }

    /// `rank_jobs_until` の型なしプール版。デコード規則は `rank_json` と同じ
    pub fn rank_json_until(
        &self,
        candidate: &CandidateProfile,
        jobs: &[Value],
        deadline: Instant,
    ) -> Vec<MatchResult> {
        let prepared = self.prepare(candidate);
        let outcomes = until_deadline(jobs, deadline, |index, raw| {
            self.decode_and_evaluate(&prepared, index, raw)
        });
        finish(jobs.len(), outcomes)
    }

    fn decode_and_evaluate(
        &self,
        candidate: &PreparedCandidate<'_>,
        index: usize,
        raw: &Value,
    ) -> Outcome {
        match JobPosting::deserialize(raw) {
            Ok(job) => self.evaluate(candidate, &job),
            Err(source) => {
                let err = MatchError::MalformedJob { index, source };
                let title = raw.get("title").and_then(Value::as_str).unwrap_or("unknown");
                warn!(error = %err, title, "skipping job");
                Outcome::Failed
            }
        }
    }

    fn evaluate(&self, candidate: &PreparedCandidate<'_>, job: &JobPosting) -> Outcome {
        if !job.is_active() {
            debug!(job_id = %job.id, "skipping inactive job");
            return Outcome::Inactive;
        }

        match self.score_job(candidate, job) {
            Ok(result) => Outcome::Scored(Box::new(result)),
            Err(err) => {
                warn!(job_id = %job.id, title = %job.title, error = %err, "skipping job");
                Outcome::Failed
            }
        }
    }
}

fn until_deadline<T>(
    jobs: &[T],
    deadline: Instant,
    mut evaluate: impl FnMut(usize, &T) -> Outcome,
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(jobs.len());

    for (index, job) in jobs.iter().enumerate() {
        if Instant::now() >= deadline {
            info!(
                processed = index,
                remaining = jobs.len() - index,
                "deadline reached; returning partial ranking"
            );
            break;
        }
        outcomes.push(evaluate(index, job));
    }

    outcomes
}

fn finish(pool_size: usize, outcomes: Vec<Outcome>) -> Vec<MatchResult> {
    let mut inactive = 0usize;
    let mut failed = 0usize;
    let mut results = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome {
            Outcome::Scored(result) => results.push(*result),
            Outcome::Inactive => inactive += 1,
            Outcome::Failed => failed += 1,
        }
    }

    sort_by_final_desc(&mut results);

    info!(
        pool_size,
        scored = results.len(),
        inactive,
        failed,
        "ranked job pool"
    );
    results
}

/// 安定ソート。同点はプール内の順序を保つ
pub fn sort_by_final_desc(results: &mut [MatchResult]) {
    results.sort_by(|a, b| {
        b.scores
            .final_score
            .partial_cmp(&a.scores.final_score)
            .unwrap_or(Ordering::Equal)
    });
}

/// 既定のエンジンでランク付けする
pub fn match_jobs(candidate: &CandidateProfile, jobs: &[JobPosting]) -> Vec<MatchResult> {
    MatchingEngine::default().rank_jobs(candidate, jobs)
}
