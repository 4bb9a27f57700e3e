//! Expense totals grouped by category

use crate::models::Transaction;

use super::types::CategoryTotal;

/// Chart and legend colors for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryStyle {
    pub color: &'static str,
    pub swatch: &'static str,
}

const OTHER_STYLE: CategoryStyle = CategoryStyle {
    color: "#64748b",
    swatch: "bg-slate-500",
};

/// Display tokens for a category; unknown labels share the "Other" style
pub fn category_style(category: &str) -> CategoryStyle {
    let (color, swatch) = match category {
        "Food" => ("#f59e0b", "bg-amber-500"),
        "Transport" => ("#3b82f6", "bg-blue-500"),
        "Rent" => ("#6366f1", "bg-indigo-500"),
        "Shopping" => ("#ec4899", "bg-pink-500"),
        "Entertainment" => ("#a855f7", "bg-purple-500"),
        "Health" => ("#10b981", "bg-emerald-500"),
        "Utilities" => ("#06b6d4", "bg-cyan-500"),
        _ => return OTHER_STYLE,
    };
    CategoryStyle { color, swatch }
}

/// Sum expenses per category, largest first
///
/// Only expenses with a positive amount count. Ties keep the order in which
/// categories first appear.
pub fn calculate_category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<(String, f64)> = Vec::new();

    for tx in transactions.iter().filter(|t| t.is_expense() && t.amount > 0.0) {
        let label = tx.category_label();
        match totals.iter_mut().find(|(c, _)| c == label) {
            Some((_, sum)) => *sum += tx.amount,
            None => totals.push((label.to_string(), tx.amount)),
        }
    }

    let total_expense: f64 = totals.iter().map(|(_, amount)| amount).sum();
    if total_expense <= 0.0 {
        return vec![];
    }

    let mut breakdown: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, amount)| {
            let percentage = super::round_half_up(amount / total_expense * 100.0) as u32;
            CategoryTotal::new(category, amount, percentage)
        })
        .collect();

    breakdown.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    breakdown
}
