/// 素点における各サブスコアの重み
pub const DEFAULT_WEIGHTS: Weights = Weights {
    skill: 0.5,
    experience: 0.3,
    education: 0.2,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub skill: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.skill + self.experience + self.education
    }

    pub fn combine(&self, skill: f64, experience: f64, education: f64) -> f64 {
        self.skill * skill + self.experience * experience + self.education * education
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn combine_is_weighted_sum() {
        let raw = DEFAULT_WEIGHTS.combine(1.0, 0.5, 0.0);
        assert!((raw - 0.65).abs() < 1e-12);
    }
}
