use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// 正規スキル名と、それとして受け付ける綴りの一覧
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub canonical: String,
    pub spellings: Vec<String>,
}

/// 順序付きの同義語グループ。複数グループに載っている綴り（例: `sql`）は
/// 最初のグループだけで展開する
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    pub groups: Vec<SynonymGroup>,
}

const BUILTIN_SYNONYMS: &[(&str, &[&str])] = &[
    ("javascript", &["js", "javascript", "ecmascript", "node.js", "nodejs"]),
    ("python", &["python", "python3", "py"]),
    ("java", &["java", "java8", "java11", "java17"]),
    ("react", &["react", "reactjs", "react.js"]),
    ("angular", &["angular", "angularjs", "angular2+"]),
    ("vue", &["vue", "vuejs", "vue.js"]),
    ("node.js", &["node", "nodejs", "node.js"]),
    ("mongodb", &["mongodb", "mongo", "nosql"]),
    ("mysql", &["mysql", "sql"]),
    ("postgresql", &["postgresql", "postgres", "sql"]),
    ("aws", &["aws", "amazon web services", "cloud"]),
    ("docker", &["docker", "containerization"]),
    ("kubernetes", &["kubernetes", "k8s"]),
    (
        "machine learning",
        &["ml", "machine learning", "artificial intelligence", "ai"],
    ),
    ("data science", &["data science", "data analysis", "analytics"]),
    ("html", &["html", "html5"]),
    ("css", &["css", "css3", "styling"]),
    ("git", &["git", "version control", "github", "gitlab"]),
    ("rest api", &["rest", "api", "restful", "web services"]),
    ("graphql", &["graphql", "graph ql"]),
    ("typescript", &["typescript", "ts"]),
    ("express", &["express", "expressjs", "express.js"]),
    ("django", &["django", "python web framework"]),
    ("flask", &["flask", "python web framework"]),
    ("spring", &["spring", "spring boot", "java framework"]),
    ("devops", &["devops", "ci/cd", "deployment"]),
    ("agile", &["agile", "scrum", "kanban"]),
    (
        "testing",
        &["testing", "unit testing", "integration testing", "qa"],
    ),
    ("frontend", &["frontend", "front-end", "ui", "user interface"]),
    ("backend", &["backend", "back-end", "server-side"]),
    ("fullstack", &["fullstack", "full-stack", "full stack"]),
];

impl Default for SynonymTable {
    fn default() -> Self {
        Self {
            groups: BUILTIN_SYNONYMS
                .iter()
                .map(|(canonical, spellings)| SynonymGroup {
                    canonical: (*canonical).to_string(),
                    spellings: spellings.iter().map(|s| (*s).to_string()).collect(),
                })
                .collect(),
        }
    }
}

static DEFAULT_NORMALIZER: LazyLock<SkillNormalizer> =
    LazyLock::new(|| SkillNormalizer::new(SynonymTable::default()));

/// 生のスキル文字列を比較可能なトークン集合に変換する
#[derive(Debug, Clone)]
pub struct SkillNormalizer {
    table: SynonymTable,
    /// 綴り → それを含む最初のグループの添字
    spelling_to_group: HashMap<String, usize>,
}

impl Default for SkillNormalizer {
    fn default() -> Self {
        (*DEFAULT_NORMALIZER).clone()
    }
}

impl SkillNormalizer {
    pub fn new(table: SynonymTable) -> Self {
        let mut spelling_to_group = HashMap::new();
        for (idx, group) in table.groups.iter().enumerate() {
            for spelling in &group.spellings {
                spelling_to_group.entry(spelling.clone()).or_insert(idx);
            }
        }
        Self {
            table,
            spelling_to_group,
        }
    }

    pub fn table(&self) -> &SynonymTable {
        &self.table
    }

    /// `token` の展開先グループの正規名
    pub fn canonical_of(&self, token: &str) -> Option<&str> {
        let idx = self.spelling_to_group.get(token)?;
        Some(self.table.groups[*idx].canonical.as_str())
    }

    /// 整形済みトークンに加え、既知の綴りなら同義語リスト全体を返す
    pub fn normalize_set(&self, skills: &[String]) -> HashSet<String> {
        let mut normalized = HashSet::new();

        for raw in skills {
            let Some(token) = clean_token(raw) else {
                continue;
            };

            if let Some(idx) = self.spelling_to_group.get(&token) {
                normalized.extend(self.table.groups[*idx].spellings.iter().cloned());
            }
            normalized.insert(token);
        }

        normalized
    }
}

/// 小文字化・前後空白除去・`. + -` 以外の記号除去のあと、`.js` / `.py` を取り除く。
/// 空入力は `None`
pub fn clean_token(raw: &str) -> Option<String> {
    let lowered = raw.nfkc().collect::<String>().to_lowercase();
    let trimmed = lowered.trim();
    if trimmed.is_empty() {
        return None;
    }

    let kept: String = trimmed
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '.' | '+' | '-')
        })
        .collect();

    Some(kept.replace(".js", "").replace(".py", ""))
}

/// 組み込みの同義語テーブルで正規化する
pub fn normalize_skill_set(skills: &[String]) -> HashSet<String> {
    DEFAULT_NORMALIZER.normalize_set(skills)
}
