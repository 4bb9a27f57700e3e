//! Financial health score

use serde::Serialize;
use std::fmt;

use super::types::PeriodFigures;

/// Points deducted when expenses exceed a set budget
const OVER_BUDGET_PENALTY: u8 = 20;

/// Health band derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthStatus {
    Critical,
    Average,
    Good,
    Excellent,
}

impl HealthStatus {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => HealthStatus::Excellent,
            60..=79 => HealthStatus::Good,
            40..=59 => HealthStatus::Average,
            _ => HealthStatus::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "Critical",
            HealthStatus::Average => "Average",
            HealthStatus::Good => "Good",
            HealthStatus::Excellent => "Excellent",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "text-emerald-500",
            HealthStatus::Good => "text-lime-500",
            HealthStatus::Average => "text-amber-500",
            HealthStatus::Critical => "text-rose-500",
        }
    }

    pub fn ring_color(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "#10b981",
            HealthStatus::Good => "#84cc16",
            HealthStatus::Average => "#f59e0b",
            HealthStatus::Critical => "#f43f5e",
        }
    }

    pub fn bg_color(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "bg-emerald-500/10",
            HealthStatus::Good => "bg-lime-500/10",
            HealthStatus::Average => "bg-amber-500/10",
            HealthStatus::Critical => "bg-rose-500/10",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "check-circle-2",
            HealthStatus::Good => "trending-up",
            HealthStatus::Average => "alert-circle",
            HealthStatus::Critical => "shield-alert",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Health score for a period with its display tokens
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HealthResult {
    pub savings: f64,
    /// Rounded to the nearest whole percent
    pub savings_rate: i64,
    /// 0-100
    pub score: u8,
    pub status: HealthStatus,
    pub color_class: &'static str,
    pub ring_color: &'static str,
    pub bg_color: &'static str,
    pub icon: &'static str,
}

fn base_score(savings_rate: f64) -> u8 {
    if savings_rate >= 30.0 {
        100
    } else if savings_rate >= 20.0 {
        80
    } else if savings_rate >= 10.0 {
        60
    } else if savings_rate >= 0.0 {
        40
    } else {
        10
    }
}

/// Score a period from its savings rate, with a penalty for going over budget
///
/// No activity at all (income and expenses both 0) still produces a score
/// (rate 0, so 40/Average); callers hide the result in that case, see
/// [`has_financial_activity`].
pub fn calculate_financial_health(income: f64, expenses: f64, budget_limit: f64) -> HealthResult {
    let figures = PeriodFigures::new(income, expenses, budget_limit);
    let savings_rate = figures.savings_rate();

    let mut score = base_score(savings_rate);
    if budget_limit > 0.0 && expenses > budget_limit {
        score = score.saturating_sub(OVER_BUDGET_PENALTY);
    }

    let status = HealthStatus::from_score(score);
    HealthResult {
        savings: figures.savings(),
        savings_rate: super::round_half_up(savings_rate) as i64,
        score,
        status,
        color_class: status.color_class(),
        ring_color: status.ring_color(),
        bg_color: status.bg_color(),
        icon: status.icon(),
    }
}

/// Whether a health score means anything for these figures
pub fn has_financial_activity(income: f64, expenses: f64) -> bool {
    !(income == 0.0 && expenses == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excellent() {
        let result = calculate_financial_health(1000.0, 500.0, 0.0);
        assert_eq!(result.savings_rate, 50);
        assert_eq!(result.score, 100);
        assert_eq!(result.status, HealthStatus::Excellent);
        assert_eq!(result.savings, 500.0);
        assert_eq!(result.ring_color, "#10b981");
        assert_eq!(result.icon, "check-circle-2");
    }

    #[test]
    fn test_penalty_drops_to_critical() {
        let result = calculate_financial_health(1000.0, 950.0, 900.0);
        assert_eq!(result.savings_rate, 5);
        assert_eq!(result.score, 20);
        assert_eq!(result.status, HealthStatus::Critical);
        assert_eq!(result.color_class, "text-rose-500");
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(calculate_financial_health(1000.0, 750.0, 0.0).score, 80);
        assert_eq!(calculate_financial_health(1000.0, 850.0, 0.0).score, 60);
        assert_eq!(calculate_financial_health(1000.0, 1000.0, 0.0).score, 40);
        assert_eq!(calculate_financial_health(1000.0, 1500.0, 0.0).score, 10);

        assert_eq!(
            calculate_financial_health(1000.0, 750.0, 0.0).status,
            HealthStatus::Excellent
        );
        assert_eq!(
            calculate_financial_health(1000.0, 850.0, 0.0).status,
            HealthStatus::Good
        );
        assert_eq!(
            calculate_financial_health(1000.0, 1000.0, 0.0).status,
            HealthStatus::Average
        );
    }

    #[test]
    fn test_penalty_floors_at_zero() {
        let result = calculate_financial_health(1000.0, 1500.0, 1200.0);
        assert_eq!(result.score, 0);
        assert_eq!(result.status, HealthStatus::Critical);
        assert_eq!(result.savings_rate, -50);
    }

    #[test]
    fn test_no_activity_still_scores_by_formula() {
        let result = calculate_financial_health(0.0, 0.0, 0.0);
        assert_eq!(result.score, 40);
        assert_eq!(result.status, HealthStatus::Average);
        assert!(!has_financial_activity(0.0, 0.0));
        assert!(has_financial_activity(0.0, 10.0));
    }

    #[test]
    fn test_savings_rate_rounds_half_up() {
        // 12.5% rounds up, -12.5% rounds toward zero
        assert_eq!(
            calculate_financial_health(1000.0, 875.0, 0.0).savings_rate,
            13
        );
        assert_eq!(
            calculate_financial_health(1000.0, 1125.0, 0.0).savings_rate,
            -12
        );
    }
}
