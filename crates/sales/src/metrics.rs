//! Seller dashboard metrics derived from committed sales.
//!
//! Periods are calendar-based in UTC: "today" is the reference instant's date,
//! "week" starts on Monday and "month" is the calendar month.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use fieldsales_core::Money;

use crate::sale::{SaleRecord, SaleStatus};

/// Percentage of `goal` reached by `actual`, capped at 100.
///
/// A zero goal is treated as 1, so any sales count as 100% and no sales as 0%.
pub fn goal_progress(actual: Money, goal: Money) -> f64 {
    let goal = goal.amount().max(1) as f64;
    (actual.amount() as f64 / goal * 100.0).min(100.0)
}

/// Sales goals configured for a seller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesGoals {
    pub daily: Money,
    pub monthly: Money,
}

/// Count and revenue of the sales in one period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub count: u64,
    pub total: Money,
}

impl PeriodSummary {
    fn add(&mut self, sale: &SaleRecord) {
        self.count += 1;
        self.total = self.total.saturating_add(sale.total);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerMetrics {
    pub today: PeriodSummary,
    pub week: PeriodSummary,
    pub month: PeriodSummary,
    pub daily_progress: f64,
    pub monthly_progress: f64,
    /// Commission on the month's revenue.
    pub commission_earned: Money,
    /// Distinct customers sold to this month.
    pub customers_served: u64,
    /// Units sold this month.
    pub units_sold: u64,
    /// Average ticket this month.
    pub average_sale: Money,
}

impl SellerMetrics {
    /// Aggregate completed sales relative to `now`.
    ///
    /// `commission_bps` is the seller's commission in basis points (500 = 5%).
    pub fn compute(
        sales: &[SaleRecord],
        now: DateTime<Utc>,
        goals: SalesGoals,
        commission_bps: u32,
    ) -> Self {
        let today = now.date_naive();
        let week_start = today.week(Weekday::Mon).first_day();

        let mut day = PeriodSummary::default();
        let mut week = PeriodSummary::default();
        let mut month = PeriodSummary::default();
        let mut customers = HashSet::new();
        let mut units_sold = 0u64;

        for sale in sales.iter().filter(|s| s.status == SaleStatus::Completed) {
            let date = sale.occurred_at.date_naive();
            if date > today {
                continue;
            }
            if date == today {
                day.add(sale);
            }
            if date >= week_start {
                week.add(sale);
            }
            if same_month(date, today) {
                month.add(sale);
                customers.insert(sale.customer_id);
                units_sold += sale.units();
            }
        }

        let commission = month.total.amount().saturating_mul(u64::from(commission_bps)) / 10_000;
        let average_sale = month
            .total
            .amount()
            .checked_div(month.count)
            .unwrap_or(0);

        Self {
            today: day,
            week,
            month,
            daily_progress: goal_progress(day.total, goals.daily),
            monthly_progress: goal_progress(month.total, goals.monthly),
            commission_earned: Money::new(commission),
            customers_served: customers.len() as u64,
            units_sold,
            average_sale: Money::new(average_sale),
        }
    }
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
