//! Validation utilities for the Store Inventory Analytics platform
//!
//! The analytics engine never assumes these checks have run. Callers that
//! want fail-fast behaviour on caller-contract violations run them first.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{DailyEntry, Ingredient, IngredientUsage, Recipe, StockRecord, StoreMetrics};

/// A violated data-model invariant
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must not be negative (ingredient {ingredient_id}, got {value})")]
    Negative {
        field: &'static str,
        ingredient_id: String,
        value: Decimal,
    },

    #[error("recipe {recipe} uses ingredient {ingredient_id} with non-positive amount {amount}")]
    NonPositiveAmount {
        recipe: String,
        ingredient_id: String,
        amount: Decimal,
    },

    #[error("ingredient {ingredient_id} appears more than once on {date}")]
    DuplicateRecord {
        date: NaiveDate,
        ingredient_id: String,
    },

    #[error("more than one daily entry recorded for {0}")]
    DuplicateDate(NaiveDate),

    #[error("recipe {recipe} lists ingredient {ingredient_id} more than once")]
    DuplicateRecipeLine {
        recipe: String,
        ingredient_id: String,
    },

    #[error("unknown ingredient {0}")]
    UnknownIngredient(String),
}

pub type ValidationResult = Result<(), ValidationError>;

fn non_empty(value: &str, field: &'static str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

fn non_negative(value: Decimal, field: &'static str, ingredient_id: &str) -> ValidationResult {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field,
            ingredient_id: ingredient_id.to_string(),
            value,
        });
    }
    Ok(())
}

// ============================================================================
// Catalog Validations
// ============================================================================

/// Validate an ingredient has a name and a unit
pub fn validate_ingredient(ingredient: &Ingredient) -> ValidationResult {
    non_empty(&ingredient.name, "ingredient name")?;
    non_empty(&ingredient.unit, "ingredient unit")
}

/// Validate a recipe: named, every line consumes a positive amount, no
/// ingredient listed twice
pub fn validate_recipe(recipe: &Recipe) -> ValidationResult {
    non_empty(&recipe.name, "recipe name")?;

    let mut seen = HashSet::new();
    for line in &recipe.ingredients {
        if line.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount {
                recipe: recipe.name.clone(),
                ingredient_id: line.ingredient_id.clone(),
                amount: line.amount,
            });
        }
        if !seen.insert(line.ingredient_id.as_str()) {
            return Err(ValidationError::DuplicateRecipeLine {
                recipe: recipe.name.clone(),
                ingredient_id: line.ingredient_id.clone(),
            });
        }
    }
    Ok(())
}

/// Validate every recipe line references a catalog ingredient
pub fn validate_recipe_references(recipe: &Recipe, ingredients: &[Ingredient]) -> ValidationResult {
    for line in &recipe.ingredients {
        if !ingredients.iter().any(|i| i.id == line.ingredient_id) {
            return Err(ValidationError::UnknownIngredient(line.ingredient_id.clone()));
        }
    }
    Ok(())
}

// ============================================================================
// Daily Entry Validations
// ============================================================================

/// Validate purchase, sales and sold amounts are non-negative
pub fn validate_stock_record(record: &StockRecord) -> ValidationResult {
    non_negative(record.purchase_amount, "purchase_amount", &record.ingredient_id)?;
    non_negative(record.sales_amount, "sales_amount", &record.ingredient_id)?;
    non_negative(record.sold_amount, "sold_amount", &record.ingredient_id)
}

/// Validate records of one day, including ingredient uniqueness
pub fn validate_daily_entry(entry: &DailyEntry) -> ValidationResult {
    let mut seen = HashSet::new();
    for record in &entry.records {
        validate_stock_record(record)?;
        if !seen.insert(record.ingredient_id.as_str()) {
            return Err(ValidationError::DuplicateRecord {
                date: entry.date,
                ingredient_id: record.ingredient_id.clone(),
            });
        }
    }
    Ok(())
}

/// Validate a full entry collection, including date uniqueness
pub fn validate_daily_entries(entries: &[DailyEntry]) -> ValidationResult {
    let mut dates = HashSet::new();
    for entry in entries {
        if !dates.insert(entry.date) {
            return Err(ValidationError::DuplicateDate(entry.date));
        }
        validate_daily_entry(entry)?;
    }
    Ok(())
}

// ============================================================================
// Store Metrics Validations
// ============================================================================

/// Validate usage, stock and cost figures are non-negative
pub fn validate_ingredient_usage(usage: &IngredientUsage) -> ValidationResult {
    non_negative(usage.theoretical_usage, "theoretical_usage", &usage.ingredient_id)?;
    non_negative(usage.actual_usage, "actual_usage", &usage.ingredient_id)?;
    non_negative(usage.stock, "stock", &usage.ingredient_id)?;
    non_negative(usage.cost_per_unit, "cost_per_unit", &usage.ingredient_id)
}

pub fn validate_store_metrics(metrics: &StoreMetrics) -> ValidationResult {
    non_empty(&metrics.store_id, "store_id")?;
    metrics
        .ingredients
        .iter()
        .try_for_each(validate_ingredient_usage)
}
