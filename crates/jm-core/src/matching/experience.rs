use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Years,
    Months,
}

struct ExperiencePattern {
    regex: Regex,
    unit: Unit,
    is_range: bool,
}

impl ExperiencePattern {
    fn new(pattern: &str, unit: Unit, is_range: bool) -> Self {
        Self {
            regex: Regex::new(pattern).expect("experience pattern must compile"),
            unit,
            is_range,
        }
    }
}

/// 上から順に試し、最初にどこかで一致したパターンを採用する
static PATTERNS: Lazy<Vec<ExperiencePattern>> = Lazy::new(|| {
    vec![
        // "2-4 years", "2 to 4 years"
        ExperiencePattern::new(
            r"(\d+(?:\.\d+)?)\s*(?:to|-)\s*(\d+(?:\.\d+)?)\s*years?",
            Unit::Years,
            true,
        ),
        // "3+ years", "3 years"
        ExperiencePattern::new(r"(\d+(?:\.\d+)?)\+?\s*years?", Unit::Years, false),
        // "6-8 months": 下限をそのまま使う（月→年の換算なし）
        ExperiencePattern::new(
            r"(\d+(?:\.\d+)?)\s*(?:to|-)\s*(\d+(?:\.\d+)?)\s*months?",
            Unit::Months,
            true,
        ),
        ExperiencePattern::new(r"(\d+(?:\.\d+)?)\s*months?", Unit::Months, false),
        ExperiencePattern::new(r"over\s+(\d+(?:\.\d+)?)\s*years?", Unit::Years, false),
        ExperiencePattern::new(r"more\s+than\s+(\d+(?:\.\d+)?)\s*years?", Unit::Years, false),
        // "3yrs", "3yr", "3y"
        ExperiencePattern::new(r"(\d+(?:\.\d+)?)\s*yr?s?", Unit::Years, false),
    ]
});

/// 自由記述の経験を年数に変換する。読み取れない・未記入なら 0
pub fn extract_years(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };
    let lowered = text.to_lowercase();

    for pattern in PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(&lowered) else {
            continue;
        };
        let Some(value) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) else {
            continue;
        };

        if pattern.is_range {
            return value;
        }
        return match pattern.unit {
            Unit::Years => value,
            Unit::Months => value / 12.0,
        };
    }

    0.0
}

/// 候補者の経験年数を求人の必要年数と比べる
///
/// 要件を満たせば 1.0。超過分のボーナスは `min(1.0, ..)` の前に加算されるため、
/// 結果には現れない。
pub fn calculate_experience_score(candidate_years: f64, required_years: f64) -> f64 {
    if required_years <= 0.0 {
        return 1.0;
    }

    let candidate_years = candidate_years.max(0.0);
    if candidate_years >= required_years {
        let bonus = ((candidate_years - required_years) * 0.05).min(0.1);
        return (1.0 + bonus).min(1.0);
    }

    (candidate_years / required_years).sqrt().clamp(0.0, 1.0)
}
