//! Consumption calculations
//!
//! Theoretical consumption comes from recipes applied to sold units; actual
//! consumption is purchased minus sold. The loss rate here is
//! `(theoretical - actual) / theoretical * 100`, the negation of the store
//! monitor's convention in [`crate::monitor`]. The two are kept separate.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{entry_for_date, DailyEntry, Recipe};

/// Quantity of an ingredient one recipe consumes for `sold_amount` units.
///
/// Zero when the recipe has no line for the ingredient.
pub fn recipe_consumption(recipe: &Recipe, ingredient_id: &str, sold_amount: Decimal) -> Decimal {
    recipe
        .line_for(ingredient_id)
        .map(|line| line.amount * sold_amount)
        .unwrap_or(Decimal::ZERO)
}

/// Theoretical consumption of an ingredient on a date, summed over every
/// recipe that uses it. Returns 0 when no entry exists for the date.
pub fn theoretical_consumption(
    date: NaiveDate,
    ingredient_id: &str,
    recipes: &[Recipe],
    daily_entries: &[DailyEntry],
) -> Decimal {
    let Some(entry) = entry_for_date(daily_entries, date) else {
        return Decimal::ZERO;
    };

    // Sold units are recorded on the ingredient's own line
    let Some(record) = entry.record_for(ingredient_id) else {
        return Decimal::ZERO;
    };
    if record.sold_amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    recipes
        .iter()
        .map(|recipe| recipe_consumption(recipe, ingredient_id, record.sold_amount))
        .sum()
}

/// Purchased minus sold. Negative when more was sold than purchased.
pub fn actual_consumption(purchase_amount: Decimal, sold_amount: Decimal) -> Decimal {
    purchase_amount - sold_amount
}

/// Percentage by which actual consumption fell short of theoretical.
pub fn loss_rate(theoretical: Decimal, actual: Decimal) -> Decimal {
    if theoretical.is_zero() {
        Decimal::ZERO
    } else {
        (theoretical - actual) / theoretical * Decimal::from(100)
    }
}
