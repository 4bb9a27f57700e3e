//! Built-in insight rules, listed in evaluation order

use crate::format::format_grouped;

use super::engine::{InsightAccumulator, InsightContext, InsightRule};
use super::types::RiskLevel;

/// Savings-rate band below which the period gets a warning
const HEALTHY_SAVINGS_RATE: f64 = 10.0;
/// Savings-rate band that earns the congratulatory summary
const STRONG_SAVINGS_RATE: f64 = 30.0;
/// Rate needed for the surplus recommendation and to silence the decrease warning
const SURPLUS_SAVINGS_RATE: f64 = 20.0;
/// Budget usage (percent) that counts as approaching the limit
const APPROACHING_LIMIT_PERCENT: f64 = 90.0;
/// Share (percent) above which one category dominates spending
const CONCENTRATION_PERCENT: u32 = 50;

/// Warns on a thin savings rate, otherwise adds a summary fragment
pub struct SavingsRateRule;

impl InsightRule for SavingsRateRule {
    fn id(&self) -> &'static str {
        "savings_rate"
    }

    fn apply(&self, ctx: &InsightContext<'_>, acc: &mut InsightAccumulator) {
        let rate = ctx.savings_rate();
        if rate < HEALTHY_SAVINGS_RATE {
            acc.warn(
                "Your savings rate is below the healthy 10% threshold. Consider reviewing non-essential subscriptions or lifestyle costs.",
            );
        } else if rate >= STRONG_SAVINGS_RATE {
            acc.summary("You're doing an incredible job saving over 30% of your income!");
        } else {
            acc.summary("Your savings rate is steady and healthy.");
        }
    }
}

/// Sets risk from budget usage; skipped when no budget is set
pub struct BudgetUsageRule;

impl InsightRule for BudgetUsageRule {
    fn id(&self) -> &'static str {
        "budget_usage"
    }

    fn apply(&self, ctx: &InsightContext<'_>, acc: &mut InsightAccumulator) {
        let limit = ctx.figures.budget_limit;
        if limit <= 0.0 {
            return;
        }

        let expenses = ctx.figures.expenses;
        if expenses > limit {
            acc.risk_level = RiskLevel::High;
            acc.warn(format!(
                "Critical: You have exceeded your budget limit by {} {}.",
                format_grouped(expenses - limit),
                ctx.currency
            ));
        } else if expenses / limit * 100.0 > APPROACHING_LIMIT_PERCENT {
            acc.risk_level = RiskLevel::Medium;
            acc.warn(
                "You are approaching your budget limit. Only 10% of your allocated budget remains.",
            );
        }
    }
}

/// Flags a single category taking more than half of spending
pub struct CategoryConcentrationRule;

impl InsightRule for CategoryConcentrationRule {
    fn id(&self) -> &'static str {
        "category_concentration"
    }

    fn apply(&self, ctx: &InsightContext<'_>, acc: &mut InsightAccumulator) {
        if let Some(top) = ctx.breakdown.first() {
            if top.percentage > CONCENTRATION_PERCENT {
                acc.recommend(format!(
                    "High Concentration: Over 50% of your spending is in \"{}\". Explore ways to optimize this specific area.",
                    top.category
                ));
            }
        }
    }
}

/// Compares savings against the previous period when one is supplied
pub struct HistoricalComparisonRule;

impl InsightRule for HistoricalComparisonRule {
    fn id(&self) -> &'static str {
        "historical_comparison"
    }

    fn apply(&self, ctx: &InsightContext<'_>, acc: &mut InsightAccumulator) {
        let Some(previous) = ctx.previous else {
            acc.summary("Keep tracking to see month-over-month growth trends.");
            return;
        };

        let savings = ctx.savings();
        let prev_savings = previous.savings();
        // Equal savings falls through both branches
        if savings > prev_savings {
            acc.summary("Great progress! You saved more this month compared to last month.");
        } else if savings < prev_savings && ctx.savings_rate() < SURPLUS_SAVINGS_RATE {
            acc.warn(
                "Your total savings have decreased since last month. Watch out for creeping expenses.",
            );
        }
    }
}

/// Final recommendations driven by the accumulated risk level
pub struct ClosingRecommendationRule;

impl InsightRule for ClosingRecommendationRule {
    fn id(&self) -> &'static str {
        "closing_recommendations"
    }

    fn apply(&self, ctx: &InsightContext<'_>, acc: &mut InsightAccumulator) {
        if acc.risk_level == RiskLevel::High {
            acc.recommend(
                "Immediate action required: Halt all non-essential spending for the remainder of the period.",
            );
        }
        if ctx.savings_rate() >= SURPLUS_SAVINGS_RATE && acc.risk_level == RiskLevel::Low {
            acc.recommend(
                "With your surplus, consider increasing your investment contributions or building your emergency fund.",
            );
        }
    }
}
