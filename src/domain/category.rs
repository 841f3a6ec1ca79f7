//! Categories and their per-month budget estimates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};

/// Groups transactions for filtering and estimate tracking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A signed budget expectation for one month of a category.
///
/// `date` stands for its month and year; the day carries no meaning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryEstimate {
    pub id: Uuid,
    pub category_id: Uuid,
    pub date: NaiveDate,
    pub amount: f64,
}

impl CategoryEstimate {
    pub fn new(category_id: Uuid, date: NaiveDate, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            category_id,
            date,
            amount,
        }
    }
}

impl Identifiable for CategoryEstimate {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Returns the first estimate of `category_id` whose date matches the
/// given month and year, scanning in insertion order.
pub fn estimate_for_month(
    estimates: &[CategoryEstimate],
    category_id: Uuid,
    month: u32,
    year: i32,
) -> Option<f64> {
    estimates
        .iter()
        .filter(|estimate| estimate.category_id == category_id)
        .find(|estimate| estimate.date.month() == month && estimate.date.year() == year)
        .map(|estimate| estimate.amount)
}
