use chrono::NaiveDate;
use uuid::Uuid;

use tracker_core::domain::{
    Account, Cadence, Category, CategoryEstimate, Recurrence, Transaction,
};
use tracker_core::ledger::Ledger;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// A populated ledger shared by the report and persistence suites,
/// with the generated ids kept around for lookups and filters.
#[allow(dead_code)]
pub struct Household {
    pub ledger: Ledger,
    pub salary: Uuid,
    pub rent: Uuid,
    pub groceries: Uuid,
    pub concert: Uuid,
    pub income_category: Uuid,
    pub housing_category: Uuid,
    pub food_category: Uuid,
    pub checking: Uuid,
    pub credit_card: Uuid,
}

/// Monthly salary and rent, weekly groceries, one concert ticket, and
/// two estimates landing inside February 2025.
#[allow(dead_code)]
pub fn household() -> Household {
    let mut ledger = Ledger::new("Household");

    let checking = ledger.add_account(Account::new("Checking"));
    let credit_card = ledger.add_account(Account::new("Credit Card"));

    let income_category = ledger.add_category(Category::new("Income"));
    let housing_category = ledger.add_category(Category::new("Housing"));
    let food_category = ledger.add_category(Category::new("Food"));

    let salary = ledger.add_transaction(
        Transaction::new("Salary", 2600.0, date(2025, 1, 25))
            .with_recurrence(Recurrence::new(Cadence::Monthly))
            .with_category(income_category)
            .with_account(checking),
    );
    let rent = ledger.add_transaction(
        Transaction::new("Rent", -1250.0, date(2025, 1, 1))
            .with_recurrence(Recurrence::new(Cadence::Monthly))
            .with_category(housing_category)
            .with_account(checking),
    );
    let groceries = ledger.add_transaction(
        Transaction::new("Groceries", -85.0, date(2025, 1, 3))
            .with_recurrence(Recurrence::new(Cadence::Weekly))
            .with_category(food_category)
            .with_account(credit_card),
    );
    let concert = ledger.add_transaction(
        Transaction::new("Concert tickets", -120.0, date(2025, 2, 14)).with_account(credit_card),
    );

    ledger.add_estimate(CategoryEstimate::new(food_category, date(2025, 2, 10), -360.0));
    ledger.add_estimate(CategoryEstimate::new(
        income_category,
        date(2025, 2, 25),
        2600.0,
    ));

    Household {
        ledger,
        salary,
        rent,
        groceries,
        concert,
        income_category,
        housing_category,
        food_category,
        checking,
        credit_card,
    }
}
