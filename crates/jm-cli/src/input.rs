use std::{fs, path::Path};

use jm_core::{
    CandidateProfile, MatchError,
    matching::education::EducationLevels,
    skill_normalizer::SynonymTable,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: expected a JSON array of job postings")]
    NotAnArray { path: String },
    #[error(transparent)]
    Config(#[from] MatchError),
    #[error("failed to write results: {0}")]
    Output(#[source] serde_json::Error),
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| CliError::Parse {
        path: display,
        source,
    })
}

pub fn load_candidate(path: &Path) -> Result<CandidateProfile, CliError> {
    read_json(path)
}

/// Job entries stay untyped so one bad posting does not reject the file.
pub fn load_jobs(path: &Path) -> Result<Vec<Value>, CliError> {
    match read_json::<Value>(path)? {
        Value::Array(jobs) => Ok(jobs),
        _ => Err(CliError::NotAnArray {
            path: path.display().to_string(),
        }),
    }
}

pub fn load_synonyms(path: Option<&Path>) -> Result<SynonymTable, CliError> {
    path.map_or_else(|| Ok(SynonymTable::default()), read_json)
}

pub fn load_education_levels(path: Option<&Path>) -> Result<EducationLevels, CliError> {
    path.map_or_else(|| Ok(EducationLevels::default()), read_json)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn file_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_candidate_with_missing_fields() {
        let file = file_with(r#"{"skills": ["Rust"], "location": "Pune"}"#);
        let candidate = load_candidate(file.path()).unwrap();
        assert_eq!(candidate.skills, vec!["Rust".to_string()]);
        assert!(candidate.education.is_empty());
    }

    #[test]
    fn keeps_malformed_jobs_for_the_engine() {
        let file = file_with(r#"[{"id": "a"}, {"skills": 1}]"#);
        assert_eq!(load_jobs(file.path()).unwrap().len(), 2);
    }

    #[test]
    fn rejects_non_array_job_file() {
        let file = file_with(r#"{"id": "a"}"#);
        assert!(matches!(
            load_jobs(file.path()),
            Err(CliError::NotAnArray { .. })
        ));
    }

    #[test]
    fn reports_missing_file() {
        let err = load_candidate(Path::new("/nonexistent/candidate.json")).unwrap_err();
        assert!(matches!(err, CliError::Read { .. }));
    }

    #[test]
    fn optional_tables_fall_back_to_builtin() {
        assert_eq!(load_synonyms(None).unwrap(), SynonymTable::default());
        assert_eq!(
            load_education_levels(None).unwrap(),
            EducationLevels::default()
        );

        let file = file_with(r#"[["licence", 3]]"#);
        let levels = load_education_levels(Some(file.path())).unwrap();
        assert_eq!(levels.levels, vec![("licence".to_string(), 3)]);
    }
}
