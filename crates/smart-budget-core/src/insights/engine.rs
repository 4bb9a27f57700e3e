//! Insight Engine - runs the ordered rule list over a period snapshot

use crate::format::DEFAULT_CURRENCY;

use super::rules::{
    BudgetUsageRule, CategoryConcentrationRule, ClosingRecommendationRule,
    HistoricalComparisonRule, SavingsRateRule,
};
use super::types::{
    CategoryTotal, InsightResult, PeriodFigures, PreviousPeriodFigures, RiskLevel,
};

/// Read-only inputs shared by every rule
pub struct InsightContext<'a> {
    pub figures: PeriodFigures,
    /// Ordered by amount, largest first
    pub breakdown: &'a [CategoryTotal],
    pub previous: Option<PreviousPeriodFigures>,
    /// Label appended to amounts in messages
    pub currency: &'a str,
}

impl<'a> InsightContext<'a> {
    pub fn savings(&self) -> f64 {
        self.figures.savings()
    }

    pub fn savings_rate(&self) -> f64 {
        self.figures.savings_rate()
    }
}

/// Output collected while rules run
///
/// Rules later in the list see the risk level set by earlier ones.
#[derive(Debug, Default)]
pub struct InsightAccumulator {
    pub summary_parts: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
}

impl InsightAccumulator {
    pub fn summary(&mut self, fragment: impl Into<String>) {
        self.summary_parts.push(fragment.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn recommend(&mut self, message: impl Into<String>) {
        self.recommendations.push(message.into());
    }

    pub fn finish(self) -> InsightResult {
        InsightResult {
            summary: self.summary_parts.join(" "),
            warnings: self.warnings,
            recommendations: self.recommendations,
            risk_level: self.risk_level,
        }
    }
}

/// A single predicate -> effect step of the insight generator
pub trait InsightRule: Send + Sync {
    /// Stable identifier
    fn id(&self) -> &'static str;

    /// Inspect the context and record any messages or risk changes
    fn apply(&self, ctx: &InsightContext<'_>, acc: &mut InsightAccumulator);
}

/// Ordered set of insight rules
pub struct InsightEngine {
    rules: Vec<Box<dyn InsightRule>>,
    currency: String,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in rules in evaluation order
    pub fn new() -> Self {
        let mut engine = Self {
            rules: vec![],
            currency: DEFAULT_CURRENCY.to_string(),
        };

        engine.register(Box::new(SavingsRateRule));
        engine.register(Box::new(BudgetUsageRule));
        engine.register(Box::new(CategoryConcentrationRule));
        engine.register(Box::new(HistoricalComparisonRule));
        engine.register(Box::new(ClosingRecommendationRule));

        engine
    }

    /// Use a different currency label in amount messages
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Append a rule after the existing ones
    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Rule identifiers in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Run every rule in order over one period snapshot
    pub fn generate(
        &self,
        figures: PeriodFigures,
        breakdown: &[CategoryTotal],
        previous: Option<PreviousPeriodFigures>,
    ) -> InsightResult {
        let ctx = InsightContext {
            figures,
            breakdown,
            previous,
            currency: &self.currency,
        };
        let mut acc = InsightAccumulator::default();

        for rule in &self.rules {
            rule.apply(&ctx, &mut acc);
        }

        tracing::debug!(
            risk = acc.risk_level.as_str(),
            warnings = acc.warnings.len(),
            recommendations = acc.recommendations.len(),
            "Insight generation complete"
        );

        acc.finish()
    }
}

/// Generate insights for a period using the built-in rules
///
/// `budget_limit` of 0 disables the budget rule. `breakdown` must be ordered
/// by amount, largest first.
pub fn generate_financial_insights(
    income: f64,
    expenses: f64,
    budget_limit: f64,
    breakdown: &[CategoryTotal],
    previous: Option<PreviousPeriodFigures>,
) -> InsightResult {
    InsightEngine::new().generate(
        PeriodFigures::new(income, expenses, budget_limit),
        breakdown,
        previous,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(percentage: u32) -> Vec<CategoryTotal> {
        vec![CategoryTotal::new("Food", 100.0, percentage)]
    }

    #[test]
    fn test_engine_rule_order() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.rule_names(),
            vec![
                "savings_rate",
                "budget_usage",
                "category_concentration",
                "historical_comparison",
                "closing_recommendations",
            ]
        );
    }

    #[test]
    fn test_no_budget_never_raises_risk() {
        for (income, expenses) in [(0.0, 0.0), (100.0, 500.0), (1000.0, 999.0), (0.0, 50.0)] {
            let result = generate_financial_insights(income, expenses, 0.0, &[], None);
            assert_eq!(result.risk_level, RiskLevel::Low);
            assert!(result.warnings.iter().all(|w| !w.contains("budget limit")));
        }
    }

    #[test]
    fn test_over_budget_is_high_risk_with_overage() {
        let result = generate_financial_insights(5000.0, 1234.0, 1000.0, &[], None);
        assert_eq!(result.risk_level, RiskLevel::High);
        assert!(result
            .warnings
            .contains(&"Critical: You have exceeded your budget limit by 234 MMK.".to_string()));
        assert!(result.recommendations.contains(
            &"Immediate action required: Halt all non-essential spending for the remainder of the period."
                .to_string()
        ));
    }

    #[test]
    fn test_overage_uses_grouping_and_currency() {
        let engine = InsightEngine::new().with_currency("USD");
        let result = engine.generate(PeriodFigures::new(0.0, 26000.0, 5000.0), &[], None);
        assert!(result
            .warnings
            .contains(&"Critical: You have exceeded your budget limit by 21,000 USD.".to_string()));
    }

    #[test]
    fn test_approaching_budget_is_medium_risk() {
        let result = generate_financial_insights(10000.0, 950.0, 1000.0, &[], None);
        assert_eq!(result.risk_level, RiskLevel::Medium);
        assert!(result.warnings.contains(
            &"You are approaching your budget limit. Only 10% of your allocated budget remains."
                .to_string()
        ));
        // Medium risk suppresses the surplus recommendation
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_exactly_ninety_percent_stays_low() {
        let result = generate_financial_insights(10000.0, 900.0, 1000.0, &[], None);
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_concentration_boundary() {
        let at_51 = generate_financial_insights(1000.0, 800.0, 0.0, &food(51), None);
        assert!(at_51.recommendations.contains(
            &"High Concentration: Over 50% of your spending is in \"Food\". Explore ways to optimize this specific area."
                .to_string()
        ));

        let at_50 = generate_financial_insights(1000.0, 800.0, 0.0, &food(50), None);
        assert!(at_50
            .recommendations
            .iter()
            .all(|r| !r.starts_with("High Concentration")));
    }

    #[test]
    fn test_summary_order_and_joining() {
        let result = generate_financial_insights(
            1000.0,
            500.0,
            0.0,
            &[],
            Some(PreviousPeriodFigures::new(1000.0, 800.0)),
        );
        assert_eq!(
            result.summary,
            "You're doing an incredible job saving over 30% of your income! Great progress! You saved more this month compared to last month."
        );
        assert_eq!(result.risk_level, RiskLevel::Low);
        assert_eq!(
            result.recommendations,
            vec![
                "With your surplus, consider increasing your investment contributions or building your emergency fund."
            ]
        );
    }

    #[test]
    fn test_low_savings_rate_warns_without_summary_fragment() {
        let result = generate_financial_insights(1000.0, 950.0, 0.0, &[], None);
        assert_eq!(
            result.warnings[0],
            "Your savings rate is below the healthy 10% threshold. Consider reviewing non-essential subscriptions or lifestyle costs."
        );
        assert_eq!(
            result.summary,
            "Keep tracking to see month-over-month growth trends."
        );
    }

    #[test]
    fn test_steady_savings_fragment() {
        let result = generate_financial_insights(1000.0, 850.0, 0.0, &[], None);
        assert!(result.summary.starts_with("Your savings rate is steady and healthy."));
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_decreasing_savings_warning() {
        let prev = Some(PreviousPeriodFigures::new(1000.0, 500.0));
        let result = generate_financial_insights(1000.0, 850.0, 0.0, &[], prev);
        assert!(result.warnings.contains(
            &"Your total savings have decreased since last month. Watch out for creeping expenses."
                .to_string()
        ));
        assert_eq!(result.summary, "Your savings rate is steady and healthy.");
    }

    #[test]
    fn test_decreasing_savings_with_high_rate_is_silent() {
        // 25% savings rate is above the 20% cutoff
        let prev = Some(PreviousPeriodFigures::new(1000.0, 500.0));
        let result = generate_financial_insights(1000.0, 750.0, 0.0, &[], prev);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_equal_savings_triggers_neither_branch() {
        let prev = Some(PreviousPeriodFigures::new(1000.0, 950.0));
        let result = generate_financial_insights(1000.0, 950.0, 0.0, &[], prev);
        assert_eq!(result.summary, "");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("Your savings rate is below"));
    }

    #[test]
    fn test_idempotent() {
        let breakdown = food(70);
        let prev = Some(PreviousPeriodFigures::new(800.0, 700.0));
        let a = generate_financial_insights(1200.0, 1100.0, 1000.0, &breakdown, prev);
        let b = generate_financial_insights(1200.0, 1100.0, 1000.0, &breakdown, prev);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    struct AlwaysWarn;

    impl InsightRule for AlwaysWarn {
        fn id(&self) -> &'static str {
            "always_warn"
        }

        fn apply(&self, _ctx: &InsightContext<'_>, acc: &mut InsightAccumulator) {
            acc.warn(format!("risk was {}", acc.risk_level));
        }
    }

    #[test]
    fn test_registered_rule_runs_last() {
        let mut engine = InsightEngine::new();
        engine.register(Box::new(AlwaysWarn));
        let result = engine.generate(PeriodFigures::new(100.0, 200.0, 150.0), &[], None);
        assert_eq!(result.warnings.last().unwrap(), "risk was High");
    }
}
