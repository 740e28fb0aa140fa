use serde::{Deserialize, Serialize};

/// Coarse label derived from the rounded total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl Grade {
    /// Excellent ≥80, Good ≥60, Fair ≥40, else Poor.
    pub fn from_score(total_score: u32) -> Self {
        if total_score >= 80 {
            Grade::Excellent
        } else if total_score >= 60 {
            Grade::Good
        } else if total_score >= 40 {
            Grade::Fair
        } else {
            Grade::Poor
        }
    }
}

/// Per-category points. `keywords` stays fractional; only the total is rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub contact_info: u32, // 0 – 20
    pub skills: u32,       // 0 or 25
    pub experience: u32,   // 0 or 25
    pub education: u32,    // 0 or 15
    pub keywords: f64,     // 0.0 – 10.0
    pub formatting: u32,   // 0 or 5
}

impl ScoreBreakdown {
    /// Unrounded sum of all six fields.
    pub fn sum(&self) -> f64 {
        f64::from(self.contact_info + self.skills + self.experience + self.education + self.formatting)
            + self.keywords
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub total_score: u32, // 0 – 100
    pub breakdown: ScoreBreakdown,
    pub grade: Grade,
}

impl ScoreReport {
    /// Rounds the breakdown sum, then grades the rounded value so that e.g.
    /// 79.6 reports 80 and Excellent together.
    pub fn from_breakdown(breakdown: ScoreBreakdown) -> Self {
        let total_score = (breakdown.sum().round().clamp(0.0, 100.0)) as u32;
        Self {
            total_score,
            grade: Grade::from_score(total_score),
            breakdown,
        }
    }
}
