//! Ingredient and recipe (bill of materials) models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A consumable ingredient tracked per store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: String,
}

impl Ingredient {
    pub fn new(id: impl Into<String>, name: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
        }
    }
}

/// A sellable product and the ingredients one sold unit consumes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub ingredients: Vec<RecipeIngredient>,
}

impl Recipe {
    /// Find the line for an ingredient, if the recipe uses it
    pub fn line_for(&self, ingredient_id: &str) -> Option<&RecipeIngredient> {
        self.ingredients
            .iter()
            .find(|line| line.ingredient_id == ingredient_id)
    }

    pub fn uses(&self, ingredient_id: &str) -> bool {
        self.line_for(ingredient_id).is_some()
    }
}

/// One bill-of-materials line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeIngredient {
    pub ingredient_id: String,
    /// Denormalized copy of `Ingredient::name`, kept in sync on rename
    pub ingredient_name: String,
    /// Quantity consumed per one sold unit of the product
    pub amount: Decimal,
    pub unit: String,
}

impl RecipeIngredient {
    pub fn from_ingredient(ingredient: &Ingredient, amount: Decimal) -> Self {
        Self {
            ingredient_id: ingredient.id.clone(),
            ingredient_name: ingredient.name.clone(),
            amount,
            unit: ingredient.unit.clone(),
        }
    }
}
