//! Test utilities for tally-core
//!
//! Small constructors for ledger records plus a few ready-made ledgers that
//! unit tests, integration tests and the CLI tests share.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    Budget, Category, Expense, Goal, GoalStatus, Income, IncomeSource, Ledger, Reminder,
};

/// Shorthand for a calendar date; panics on an invalid date
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

pub fn expense(amount: i64, date: NaiveDate, category: Category) -> Expense {
    Expense {
        id: 0,
        amount: Decimal::from(amount),
        date,
        category,
        description: None,
    }
}

pub fn income(amount: i64, date: NaiveDate) -> Income {
    Income {
        id: 0,
        amount: Decimal::from(amount),
        date,
        recurring: true,
        source: IncomeSource::Salary,
        description: None,
    }
}

/// An active goal with a schedule
pub fn goal(
    name: &str,
    target: i64,
    current: i64,
    created_at: NaiveDate,
    target_date: Option<NaiveDate>,
) -> Goal {
    Goal {
        id: 0,
        name: name.to_string(),
        target_amount: Decimal::from(target),
        current_amount: Decimal::from(current),
        created_at,
        target_date,
        status: GoalStatus::Active,
    }
}

pub fn budget(category: Category, limit: i64) -> Budget {
    Budget {
        category,
        monthly_limit: Decimal::from(limit),
    }
}

pub fn reminder(title: &str, amount: i64, due_date: NaiveDate) -> Reminder {
    Reminder {
        id: 0,
        title: title.to_string(),
        amount: Decimal::from(amount),
        due_date,
        paid: false,
    }
}

/// The date the fixture ledgers are built around
pub fn fixture_today() -> NaiveDate {
    date(2024, 3, 20)
}

/// A steady household: same income and roughly the same spending each month,
/// healthy savings, a goal on track. No rule should fire.
pub fn quiet_ledger() -> Ledger {
    Ledger {
        incomes: vec![
            income(5000, date(2024, 2, 1)),
            income(5000, date(2024, 3, 1)),
        ],
        expenses: vec![
            expense(1500, date(2024, 2, 3), Category::Housing),
            expense(400, date(2024, 2, 10), Category::Food),
            expense(200, date(2024, 2, 12), Category::Transport),
            expense(1500, date(2024, 3, 3), Category::Housing),
            expense(410, date(2024, 3, 10), Category::Food),
            expense(200, date(2024, 3, 12), Category::Transport),
        ],
        goals: vec![goal(
            "Emergency fund",
            10_000,
            6_000,
            date(2024, 1, 1),
            Some(date(2024, 12, 31)),
        )],
        budgets: vec![budget(Category::Food, 600)],
        reminders: vec![],
    }
}

/// A household in trouble: spending above income, a category spike, an
/// exceeded budget, a goal far behind and a bill due tomorrow.
pub fn stressed_ledger() -> Ledger {
    Ledger {
        incomes: vec![
            income(3000, date(2024, 2, 1)),
            income(3000, date(2024, 3, 1)),
        ],
        expenses: vec![
            expense(1500, date(2024, 2, 3), Category::Housing),
            expense(300, date(2024, 2, 10), Category::Shopping),
            expense(1500, date(2024, 3, 3), Category::Housing),
            expense(1400, date(2024, 3, 15), Category::Shopping),
            expense(450, date(2024, 3, 18), Category::Food),
        ],
        goals: vec![goal(
            "New car",
            20_000,
            500,
            date(2023, 9, 1),
            Some(date(2024, 9, 1)),
        )],
        budgets: vec![budget(Category::Shopping, 500)],
        reminders: vec![reminder("Electricity", 120, date(2024, 3, 21))],
    }
}
