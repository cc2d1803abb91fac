//! Financial snapshot
//!
//! A point-in-time view of a [`Ledger`] partitioned into calendar months.
//! Every derived figure in the crate is computed from a snapshot, and a
//! snapshot is rebuilt from scratch on every analysis.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{total, Budget, Category, Expense, Goal, Income, Ledger, Reminder};

/// A calendar month (year + month), independent of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month before this one (January rolls back to December)
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Which collections carry any data at all
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataAvailability {
    pub has_expenses: bool,
    pub has_incomes: bool,
}

/// Immutable aggregation of the ledger used as input to every analyzer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSnapshot {
    pub today: NaiveDate,
    pub current_month: YearMonth,
    pub previous_month: YearMonth,
    pub current_expenses: Vec<Expense>,
    pub previous_expenses: Vec<Expense>,
    pub current_incomes: Vec<Income>,
    pub previous_incomes: Vec<Income>,
    pub goals: Vec<Goal>,
    pub budgets: Vec<Budget>,
    pub reminders: Vec<Reminder>,
    pub availability: DataAvailability,
}

impl FinancialSnapshot {
    /// Partition a ledger around `today`
    pub fn build(ledger: &Ledger, today: NaiveDate) -> Self {
        let current_month = YearMonth::of(today);
        let previous_month = current_month.previous();

        let current_expenses: Vec<Expense> = ledger
            .expenses
            .iter()
            .filter(|e| current_month.contains(e.date))
            .cloned()
            .collect();
        let previous_expenses: Vec<Expense> = ledger
            .expenses
            .iter()
            .filter(|e| previous_month.contains(e.date))
            .cloned()
            .collect();
        let current_incomes: Vec<Income> = ledger
            .incomes
            .iter()
            .filter(|i| current_month.contains(i.date))
            .cloned()
            .collect();
        let previous_incomes: Vec<Income> = ledger
            .incomes
            .iter()
            .filter(|i| previous_month.contains(i.date))
            .cloned()
            .collect();

        let snapshot = Self {
            today,
            current_month,
            previous_month,
            current_expenses,
            previous_expenses,
            current_incomes,
            previous_incomes,
            goals: ledger.goals.clone(),
            budgets: ledger.budgets.clone(),
            reminders: ledger.reminders.clone(),
            availability: DataAvailability {
                has_expenses: !ledger.expenses.is_empty(),
                has_incomes: !ledger.incomes.is_empty(),
            },
        };

        tracing::debug!(
            month = %current_month,
            current_expenses = snapshot.current_expenses.len(),
            previous_expenses = snapshot.previous_expenses.len(),
            current_incomes = snapshot.current_incomes.len(),
            goals = snapshot.goals.len(),
            "Built financial snapshot"
        );

        snapshot
    }

    /// No incomes, expenses or goals anywhere in the ledger
    pub fn is_empty(&self) -> bool {
        !self.availability.has_expenses && !self.availability.has_incomes && self.goals.is_empty()
    }

    pub fn current_expense_total(&self) -> Decimal {
        total(self.current_expenses.iter().map(|e| e.amount))
    }

    pub fn previous_expense_total(&self) -> Decimal {
        total(self.previous_expenses.iter().map(|e| e.amount))
    }

    pub fn current_income_total(&self) -> Decimal {
        total(self.current_incomes.iter().map(|i| i.amount))
    }

    pub fn previous_income_total(&self) -> Decimal {
        total(self.previous_incomes.iter().map(|i| i.amount))
    }

    /// Current-month spending per category
    pub fn current_by_category(&self) -> BTreeMap<Category, CategoryTotal> {
        totals_by_category(&self.current_expenses)
    }

    /// Previous-month spending per category
    pub fn previous_by_category(&self) -> BTreeMap<Category, CategoryTotal> {
        totals_by_category(&self.previous_expenses)
    }
}

/// Spending in one category over one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub amount: Decimal,
    pub count: usize,
    /// Date of the latest expense in the category
    pub last_date: NaiveDate,
}

fn totals_by_category(expenses: &[Expense]) -> BTreeMap<Category, CategoryTotal> {
    let mut totals: BTreeMap<Category, CategoryTotal> = BTreeMap::new();
    for expense in expenses {
        totals
            .entry(expense.category)
            .and_modify(|t| {
                t.amount = t.amount.saturating_add(expense.amount);
                t.count += 1;
                t.last_date = t.last_date.max(expense.date);
            })
            .or_insert(CategoryTotal {
                amount: expense.amount,
                count: 1,
                last_date: expense.date,
            });
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, expense, income};

    #[test]
    fn test_year_month_previous_wraps_year() {
        let jan = YearMonth::of(date(2024, 1, 15));
        assert_eq!(jan.previous(), YearMonth { year: 2023, month: 12 });
        assert_eq!(YearMonth::of(date(2024, 7, 1)).previous().month, 6);
        assert_eq!(jan.to_string(), "2024-01");
    }

    #[test]
    fn test_empty_ledger() {
        let snapshot = FinancialSnapshot::build(&Ledger::default(), date(2024, 3, 10));
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.availability, DataAvailability::default());
        assert_eq!(snapshot.current_expense_total(), Decimal::ZERO);
    }

    #[test]
    fn test_partitions_by_calendar_month_not_rolling_window() {
        let ledger = Ledger {
            expenses: vec![
                expense(10, date(2024, 3, 1), Category::Food),
                expense(20, date(2024, 2, 29), Category::Food),
                expense(40, date(2024, 2, 1), Category::Transport),
                expense(80, date(2024, 1, 31), Category::Food),
                expense(160, date(2023, 3, 5), Category::Food),
            ],
            incomes: vec![
                income(1000, date(2024, 3, 1)),
                income(900, date(2024, 2, 15)),
            ],
            ..Default::default()
        };

        let snapshot = FinancialSnapshot::build(&ledger, date(2024, 3, 2));

        assert_eq!(snapshot.current_expense_total(), Decimal::from(10));
        assert_eq!(snapshot.previous_expense_total(), Decimal::from(60));
        assert_eq!(snapshot.current_income_total(), Decimal::from(1000));
        assert_eq!(snapshot.previous_income_total(), Decimal::from(900));
        assert!(snapshot.availability.has_expenses);
        assert!(snapshot.availability.has_incomes);
    }

    #[test]
    fn test_availability_counts_whole_ledger() {
        let ledger = Ledger {
            expenses: vec![expense(10, date(2020, 1, 1), Category::Other)],
            ..Default::default()
        };
        let snapshot = FinancialSnapshot::build(&ledger, date(2024, 3, 2));

        assert!(snapshot.current_expenses.is_empty());
        assert!(snapshot.availability.has_expenses);
        assert!(!snapshot.availability.has_incomes);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_category_totals() {
        let ledger = Ledger {
            expenses: vec![
                expense(10, date(2024, 3, 1), Category::Food),
                expense(15, date(2024, 3, 8), Category::Food),
                expense(40, date(2024, 3, 3), Category::Travel),
            ],
            ..Default::default()
        };
        let snapshot = FinancialSnapshot::build(&ledger, date(2024, 3, 10));
        let totals = snapshot.current_by_category();

        let food = totals[&Category::Food];
        assert_eq!(food.amount, Decimal::from(25));
        assert_eq!(food.count, 2);
        assert_eq!(food.last_date, date(2024, 3, 8));
        assert_eq!(totals[&Category::Travel].count, 1);
        assert!(snapshot.previous_by_category().is_empty());
    }
}
