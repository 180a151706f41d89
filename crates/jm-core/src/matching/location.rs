/// 候補者の勤務地の単語はこの長さを超えるものだけ判定に使う
const MIN_WORD_LEN: usize = 2;

/// 候補者の勤務地の単語（3文字以上）のいずれかが求人の勤務地に含まれれば `bonus`
/// （大文字小文字は区別しない）。それ以外やどちらかが空なら 0.0
///
/// `candidate_location` は小文字化済みであること（ランク付け1回につき1度だけ準備する）
pub fn location_bonus(candidate_location: &str, job_location: &str, bonus: f64) -> f64 {
    if candidate_location.trim().is_empty() || job_location.trim().is_empty() {
        return 0.0;
    }

    let job_location = job_location.to_lowercase();
    let overlaps = candidate_location
        .split_whitespace()
        .filter(|word| word.chars().count() > MIN_WORD_LEN)
        .any(|word| job_location.contains(word));

    if overlaps { bonus } else { 0.0 }
}
