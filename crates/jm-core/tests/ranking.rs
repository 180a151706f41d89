use jm_core::{
    CandidateProfile, JobPosting, MatchingConfig, MatchingEngine,
    matching::{
        education::EducationLevels,
        pipeline::match_jobs,
        scoring::CurveParams,
    },
    skill_normalizer::{SynonymGroup, SynonymTable},
};
use serde_json::json;

fn jaipur_candidate() -> CandidateProfile {
    CandidateProfile {
        skills: vec!["Python".into(), "React".into()],
        experience: Some("3 years".into()),
        education: vec!["Bachelor of Science".into()],
        location: "Jaipur".into(),
    }
}

fn jaipur_job() -> JobPosting {
    JobPosting {
        id: "job-1".into(),
        title: "Full Stack Developer".into(),
        company: "Acme".into(),
        skills: vec!["python".into(), "react".into(), "sql".into()],
        min_experience: 2.0,
        education_keywords: vec!["bachelor".into()],
        location: "Jaipur, Rajasthan".into(),
        ..JobPosting::default()
    }
}

#[test]
fn end_to_end_single_job() {
    let results = match_jobs(&jaipur_candidate(), &[jaipur_job()]);
    assert_eq!(results.len(), 1);

    let result = &results[0];
    assert_eq!(result.id, "job-1");
    assert_eq!(result.company, "Acme");
    // "sql" expands to {sql, mysql}: 6 of 8 normalized job skills match exactly
    assert_eq!(result.scores.skill, 0.6);
    assert_eq!(result.scores.experience, 1.0);
    assert_eq!(result.scores.education, 1.0);
    // 0.5*0.6 + 0.3 + 0.2 + 0.05 location bonus
    assert_eq!(result.scores.raw_final, 0.85);
    assert_eq!(result.scores.final_score, 0.891);
    assert_eq!(result.match_percentage, 89.1);
}

#[test]
fn results_sorted_by_final_descending() {
    let candidate = CandidateProfile {
        skills: vec!["rust".into(), "docker".into(), "kubernetes".into()],
        experience: Some("5 years".into()),
        education: vec!["MSc Computer Science".into()],
        location: "Berlin".into(),
    };
    let pool = vec![
        JobPosting {
            id: "mid".into(),
            skills: vec!["rust".into(), "haskell".into()],
            min_experience: 8.0,
            ..JobPosting::default()
        },
        JobPosting {
            id: "low".into(),
            skills: vec!["cobol".into()],
            min_experience: 15.0,
            education_keywords: vec!["phd".into()],
            ..JobPosting::default()
        },
        JobPosting {
            id: "high".into(),
            skills: vec!["rust".into(), "k8s".into()],
            min_experience: 3.0,
            location: "Berlin, DE".into(),
            ..JobPosting::default()
        },
    ];

    let results = match_jobs(&candidate, &pool);
    let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["high", "mid", "low"]);
    assert!(
        results
            .windows(2)
            .all(|pair| pair[0].scores.final_score > pair[1].scores.final_score)
    );
}

#[test]
fn json_pool_skips_malformed_entries() {
    let engine = MatchingEngine::default();
    let pool = vec![
        json!({"id": "good", "skills": ["python"], "min_experience": 1}),
        json!({"id": "bad-skills", "skills": 42}),
        json!({"id": "bad-years", "min_experience": "two"}),
        json!({"id": "negative", "min_experience": -3}),
        json!({"id": "closed", "status": "inactive"}),
        json!("not an object"),
        json!({"id": "sparse"}),
    ];

    let results = engine.rank_json(&jaipur_candidate(), &pool);
    let mut ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["good", "sparse"]);
}

#[test]
fn sparse_job_scores_neutrally() {
    let engine = MatchingEngine::default();
    let results = engine.rank_json(&jaipur_candidate(), &[json!({"id": "sparse"})]);
    let result = &results[0];

    // no skills listed → 0, no experience/education requirement → 1.0 each
    assert_eq!(result.scores.skill, 0.0);
    assert_eq!(result.scores.experience, 1.0);
    assert_eq!(result.scores.education, 1.0);
    assert_eq!(result.scores.raw_final, 0.5);
    assert_eq!(result.scores.final_score, 0.5);
    assert_eq!(result.match_percentage, 50.0);
}

#[test]
fn null_fields_score_like_missing_ones() {
    let engine = MatchingEngine::default();
    let pool = [json!({
        "id": "nulls",
        "skills": null,
        "education_keywords": null,
        "location": null,
    })];
    let results = engine.rank_json(&jaipur_candidate(), &pool);
    assert_eq!(results.len(), 1);

    let sparse = engine.rank_json(&jaipur_candidate(), &[json!({"id": "nulls"})]);
    assert_eq!(results, sparse);
    assert_eq!(results[0].scores.skill, 0.0);
}

#[test]
fn empty_candidate_never_panics() {
    let results = match_jobs(&CandidateProfile::default(), &[jaipur_job()]);
    let result = &results[0];
    assert_eq!(result.scores.skill, 0.0);
    assert_eq!(result.scores.experience, 0.0);
    assert_eq!(result.scores.education, 0.4);
    assert!((0.0..=100.0).contains(&result.match_percentage));
}

#[test]
fn injected_tables_and_config_change_scores() {
    let synonyms = SynonymTable {
        groups: vec![SynonymGroup {
            canonical: "python".into(),
            spellings: vec!["python".into(), "py".into()],
        }],
    };
    let config = MatchingConfig {
        location_bonus: 0.0,
        curve: CurveParams {
            steepness: 10.0,
            midpoint: 0.5,
        },
        ..MatchingConfig::default()
    };
    let engine = MatchingEngine::new(config, synonyms, EducationLevels::default()).unwrap();

    let candidate = CandidateProfile {
        skills: vec!["py".into()],
        ..CandidateProfile::default()
    };
    let job = JobPosting {
        id: "py".into(),
        skills: vec!["Python".into()],
        ..JobPosting::default()
    };

    let result = &engine.rank_jobs(&candidate, &[job])[0];
    assert_eq!(result.scores.skill, 1.0);
    assert_eq!(result.scores.raw_final, 1.0);
    // 1 / (1 + e^-5)
    assert_eq!(result.scores.final_score, 0.993);
}

#[test]
fn results_serialize_to_plain_json() {
    let results = match_jobs(&jaipur_candidate(), &[jaipur_job()]);
    let value = serde_json::to_value(&results).unwrap();
    assert_eq!(value[0]["id"], "job-1");
    assert_eq!(value[0]["match_percentage"], 89.1);
    assert_eq!(value[0]["scores"]["final"], 0.891);
    assert!(value[0]["scores"].get("final_score").is_none());
}
