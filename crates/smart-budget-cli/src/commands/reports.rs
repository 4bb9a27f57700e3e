//! Report commands: summary, insights, health, breakdown

use anyhow::{Context, Result};
use smart_budget_core::format::format_currency;
use smart_budget_core::insights::has_financial_activity;
use smart_budget_core::{
    calculate_category_breakdown, calculate_financial_health, CategoryTotal, Database,
    HealthResult, HealthStatus, InsightEngine, InsightResult, MonthDashboard, PeriodFigures,
    RiskLevel,
};

use super::budget::{print_budget, progress_bar};
use super::transactions::amount_str;
use super::{resolve_month, truncate};

fn health_color(status: HealthStatus) -> &'static str {
    match status {
        HealthStatus::Excellent | HealthStatus::Good => "\x1b[32m",
        HealthStatus::Average => "\x1b[33m",
        HealthStatus::Critical => "\x1b[31m",
    }
}

fn risk_color(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::Low => "\x1b[32m",
        RiskLevel::Medium => "\x1b[33m",
        RiskLevel::High => "\x1b[31m",
    }
}

fn print_health(health: &HealthResult) {
    let color = health_color(health.status);
    println!();
    println!("💪 Financial Health");
    println!(
        "   {}{}/100 {}\x1b[0m  (savings rate {}%)",
        color, health.score, health.status, health.savings_rate
    );
}

fn print_breakdown(breakdown: &[CategoryTotal], currency: &str) {
    println!();
    println!("📊 Spending by Category");
    if breakdown.is_empty() {
        println!("   No expenses recorded.");
        return;
    }
    for item in breakdown {
        println!(
            "   {:<14} {} {:>3}%  {}",
            truncate(&item.category, 14),
            progress_bar(item.percentage as f64, 20),
            item.percentage,
            format_currency(item.total_amount, currency)
        );
    }
}

fn print_insights(insights: &InsightResult) {
    println!();
    println!(
        "🧠 Insights  {}{} risk\x1b[0m",
        risk_color(insights.risk_level),
        insights.risk_level
    );
    if !insights.summary.is_empty() {
        println!("   {}", insights.summary);
    }
    for warning in &insights.warnings {
        println!("   ⚠️  {}", warning);
    }
    for recommendation in &insights.recommendations {
        println!("   💡 {}", recommendation);
    }
}

pub fn cmd_summary(
    db: &Database,
    engine: &InsightEngine,
    month: Option<&str>,
    day: Option<u32>,
    json: bool,
) -> Result<()> {
    let month = resolve_month(db, month)?;
    let mut view = db.load_view_config()?;
    view.current_month = month;
    let view = view.with_selected_day(day)?;

    let dash = MonthDashboard::build(db, &view, engine).context("Failed to build dashboard")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dash)?);
        return Ok(());
    }

    let currency = engine.currency();

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          💰 {:<28}│", dash.month_label);
    println!("╰─────────────────────────────────────────╯");
    println!("   ◀ {}   {} ▶", dash.neighbor(-1), dash.neighbor(1));
    println!();
    println!(
        "   Income:   \x1b[32m{}\x1b[0m",
        format_currency(dash.stats.total_income, currency)
    );
    println!(
        "   Expenses: \x1b[31m{}\x1b[0m",
        format_currency(dash.stats.total_expense, currency)
    );
    println!(
        "   Balance:  {}",
        format_currency(dash.stats.balance, currency)
    );

    print_budget(db, currency, month)?;

    if let Some(health) = &dash.health {
        print_health(health);
    }

    if !dash.breakdown.is_empty() {
        print_breakdown(&dash.breakdown, currency);
    }

    if let Some(insights) = &dash.insights {
        print_insights(insights);
    }

    println!();
    match dash.selected_day {
        Some(d) => println!("📝 Activity on day {}", d),
        None => println!("📝 Recent Activity"),
    }
    if dash.timeline.is_empty() {
        println!("   Nothing recorded.");
    }
    for group in &dash.timeline {
        println!("   {}", group.date.format("%a, %b %-d"));
        for tx in &group.transactions {
            println!(
                "     {:>22} │ {:<12} │ {}",
                amount_str(tx),
                truncate(&tx.category, 12),
                truncate(&tx.title, 30)
            );
        }
    }

    Ok(())
}

pub fn cmd_insights(
    db: &Database,
    engine: &InsightEngine,
    month: Option<&str>,
    json: bool,
) -> Result<()> {
    let month = resolve_month(db, month)?;
    let data = db.get_month_data(month)?;
    let stats = data.stats();
    let breakdown = calculate_category_breakdown(&data.transactions);
    let previous = db.previous_period_figures(month)?;

    let insights = engine.generate(
        PeriodFigures::new(stats.total_income, stats.total_expense, stats.budget_limit),
        &breakdown,
        previous,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!();
    println!("🔍 Analysis for {}", month.label());
    if previous.is_none() {
        println!(
            "   (no data for {} to compare against)",
            month.previous().label()
        );
    }
    print_insights(&insights);

    Ok(())
}

pub fn cmd_health(db: &Database, month: Option<&str>) -> Result<()> {
    let month = resolve_month(db, month)?;
    let stats = db.month_stats(month)?;

    if !has_financial_activity(stats.total_income, stats.total_expense) {
        println!("No income or expenses recorded for {}.", month.label());
        return Ok(());
    }

    let health =
        calculate_financial_health(stats.total_income, stats.total_expense, stats.budget_limit);
    print_health(&health);

    Ok(())
}

pub fn cmd_breakdown(db: &Database, currency: &str, month: Option<&str>) -> Result<()> {
    let month = resolve_month(db, month)?;
    let data = db.get_month_data(month)?;
    print_breakdown(&calculate_category_breakdown(&data.transactions), currency);
    Ok(())
}
