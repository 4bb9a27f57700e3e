//! Month dashboard assembly
//!
//! Everything one screen shows for a month, computed from the store and an
//! explicit [`ViewConfig`]. Totals, budget, health, breakdown, and insights
//! always cover the whole month; only the timeline honors the selected day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::Database;
use crate::error::Result;
use crate::insights::{
    calculate_budget_status, calculate_category_breakdown, calculate_financial_health,
    has_financial_activity, used_percent_rounded, BudgetStatusResult, CategoryTotal,
    HealthResult, InsightEngine, InsightResult, PeriodFigures,
};
use crate::models::{BudgetStats, MonthKey, Transaction, ViewConfig};

/// Transactions that share a calendar date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthDashboard {
    pub month: MonthKey,
    pub month_label: String,
    pub days_in_month: u32,
    pub selected_day: Option<u32>,
    pub dark_mode: bool,
    pub stats: BudgetStats,
    pub budget: BudgetStatusResult,
    /// Unclamped usage for the headline figure
    pub budget_used_percent: u32,
    /// Hidden (None) when the month has no income and no expenses
    pub health: Option<HealthResult>,
    pub breakdown: Vec<CategoryTotal>,
    /// Hidden (None) when the month has no transactions
    pub insights: Option<InsightResult>,
    /// Newest date first
    pub timeline: Vec<DayGroup>,
}

impl MonthDashboard {
    pub fn build(db: &Database, view: &ViewConfig, engine: &InsightEngine) -> Result<Self> {
        let month = view.current_month;
        let data = db.get_month_data(month)?;
        let stats = data.stats();

        let breakdown = calculate_category_breakdown(&data.transactions);

        let health = has_financial_activity(stats.total_income, stats.total_expense).then(|| {
            calculate_financial_health(stats.total_income, stats.total_expense, stats.budget_limit)
        });

        let insights = if data.transactions.is_empty() {
            None
        } else {
            let previous = db.previous_period_figures(month)?;
            Some(engine.generate(
                PeriodFigures::new(stats.total_income, stats.total_expense, stats.budget_limit),
                &breakdown,
                previous,
            ))
        };

        let visible: Vec<Transaction> = match view.selected_day {
            Some(day) => data
                .transactions
                .into_iter()
                .filter(|t| chrono::Datelike::day(&t.date) == day)
                .collect(),
            None => data.transactions,
        };

        Ok(Self {
            month,
            month_label: month.label(),
            days_in_month: month.days_in_month(),
            selected_day: view.selected_day,
            dark_mode: view.dark_mode,
            stats,
            budget: calculate_budget_status(stats.total_expense, stats.budget_limit),
            budget_used_percent: used_percent_rounded(stats.total_expense, stats.budget_limit),
            health,
            breakdown,
            insights,
            timeline: group_by_day(visible),
        })
    }

    /// Month shown when navigating from this one
    pub fn neighbor(&self, months: i32) -> MonthKey {
        self.month.offset(months)
    }
}

/// Group transactions by calendar date, newest date first
///
/// Within a day the input order is kept.
pub fn group_by_day(transactions: Vec<Transaction>) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();

    for tx in transactions {
        let date = tx.date.date_naive();
        match groups.iter_mut().find(|g| g.date == date) {
            Some(group) => group.transactions.push(tx),
            None => groups.push(DayGroup {
                date,
                transactions: vec![tx],
            }),
        }
    }

    groups.sort_by(|a, b| b.date.cmp(&a.date));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::{BudgetStatus, HealthStatus, RiskLevel};
    use crate::models::{NewTransaction, TransactionType};
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn seeded() -> (Database, MonthKey) {
        let db = Database::in_memory().unwrap();
        let month: MonthKey = "2025-06".parse().unwrap();
        let now = ts("2025-06-30T08:00:00Z");

        db.set_budget_limit(month, 1000.0).unwrap();
        db.insert_transaction(
            month,
            NewTransaction::new("Salary", 2000.0, TransactionType::Income).with_category("Salary"),
            Some(1),
            now,
        )
        .unwrap();
        db.insert_transaction(
            month,
            NewTransaction::new("Rent", 700.0, TransactionType::Expense).with_category("Rent"),
            Some(1),
            now,
        )
        .unwrap();
        db.insert_transaction(
            month,
            NewTransaction::new("Groceries", 100.0, TransactionType::Expense).with_category("Food"),
            Some(12),
            now,
        )
        .unwrap();

        (db, month)
    }

    #[test]
    fn test_empty_month_hides_widgets() {
        let db = Database::in_memory().unwrap();
        let view = ViewConfig::for_month("2025-01".parse().unwrap());
        let dash = MonthDashboard::build(&db, &view, &InsightEngine::new()).unwrap();

        assert!(dash.health.is_none());
        assert!(dash.insights.is_none());
        assert!(dash.breakdown.is_empty());
        assert!(dash.timeline.is_empty());
        assert_eq!(dash.budget.status, BudgetStatus::NotSet);
        assert_eq!(dash.days_in_month, 31);
    }

    #[test]
    fn test_full_month_dashboard() {
        let (db, month) = seeded();
        let view = ViewConfig::for_month(month);
        let dash = MonthDashboard::build(&db, &view, &InsightEngine::new()).unwrap();

        assert_eq!(dash.month_label, "June 2025");
        assert_eq!(dash.stats.total_income, 2000.0);
        assert_eq!(dash.stats.total_expense, 800.0);
        assert_eq!(dash.budget.status, BudgetStatus::Warning);
        assert_eq!(dash.budget_used_percent, 80);

        let health = dash.health.unwrap();
        assert_eq!(health.savings_rate, 60);
        assert_eq!(health.status, HealthStatus::Excellent);

        assert_eq!(dash.breakdown[0].category, "Rent");
        assert_eq!(dash.breakdown[0].percentage, 88);

        let insights = dash.insights.unwrap();
        assert_eq!(insights.risk_level, RiskLevel::Low);
        assert!(insights.summary.ends_with("Keep tracking to see month-over-month growth trends."));
        assert!(insights.recommendations[0].contains("\"Rent\""));

        let dates: Vec<String> = dash.timeline.iter().map(|g| g.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-06-12", "2025-06-01"]);
        assert_eq!(dash.timeline[1].transactions[0].title, "Rent");
    }

    #[test]
    fn test_selected_day_filters_timeline_only() {
        let (db, month) = seeded();
        let view = ViewConfig::for_month(month).with_selected_day(Some(12)).unwrap();
        let dash = MonthDashboard::build(&db, &view, &InsightEngine::new()).unwrap();

        assert_eq!(dash.timeline.len(), 1);
        assert_eq!(dash.timeline[0].transactions.len(), 1);
        assert_eq!(dash.stats.total_expense, 800.0);
        assert_eq!(dash.breakdown.len(), 2);
    }

    #[test]
    fn test_previous_month_feeds_history_rule() {
        let (db, month) = seeded();
        let previous = month.previous();
        db.insert_transaction(
            previous,
            NewTransaction::new("Salary", 2000.0, TransactionType::Income),
            None,
            ts("2025-05-02T08:00:00Z"),
        )
        .unwrap();
        db.insert_transaction(
            previous,
            NewTransaction::new("Trip", 1900.0, TransactionType::Expense),
            None,
            ts("2025-05-02T08:00:00Z"),
        )
        .unwrap();

        let dash =
            MonthDashboard::build(&db, &ViewConfig::for_month(month), &InsightEngine::new())
                .unwrap();
        let insights = dash.insights.unwrap();
        assert!(insights
            .summary
            .ends_with("Great progress! You saved more this month compared to last month."));
    }

    #[test]
    fn test_group_by_day_orders_dates_descending() {
        let tx = |id: &str, date: &str| {
            NewTransaction::new(id, 1.0, TransactionType::Expense)
                .into_transaction(id.to_string(), ts(date))
        };
        let groups = group_by_day(vec![
            tx("a", "2025-06-03T10:00:00Z"),
            tx("b", "2025-06-05T10:00:00Z"),
            tx("c", "2025-06-03T09:00:00Z"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date.to_string(), "2025-06-05");
        let ids: Vec<&str> = groups[1].transactions.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
