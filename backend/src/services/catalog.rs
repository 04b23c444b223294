//! Catalog service for ingredients, recipes and daily entries

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    validate_daily_entry, validate_ingredient, validate_recipe, validate_recipe_references,
    DailyEntry, Ingredient, Recipe, RecipeIngredient, StockRecord, ValidationError,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::store::InventoryStore;

/// Input for creating or updating an ingredient
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IngredientInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 20))]
    pub unit: String,
}

/// One recipe line as submitted; name and unit come from the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeLineInput {
    pub ingredient_id: String,
    pub amount: Decimal,
}

/// Input for creating or updating a recipe
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecipeInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1))]
    pub ingredients: Vec<RecipeLineInput>,
}

/// One stock line of a daily entry as submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockLineInput {
    pub ingredient_id: String,
    pub purchase_amount: Decimal,
    #[serde(default)]
    pub sales_amount: Decimal,
    pub sold_amount: Decimal,
}

/// Input for recording the stock lines of one date
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DailyEntryInput {
    #[validate(length(min = 1))]
    pub records: Vec<StockLineInput>,
}

/// Catalog mutations
///
/// Read-modify-write sequences are serialized through one write lock, so a
/// rename cascade never interleaves with a concurrent recipe edit.
pub struct CatalogService {
    store: Arc<dyn InventoryStore>,
    write_lock: Mutex<()>,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::Internal("Catalog lock poisoned".to_string()))
    }

    // ========================================================================
    // Ingredients
    // ========================================================================

    pub fn list_ingredients(&self) -> AppResult<Vec<Ingredient>> {
        Ok(self.store.load_ingredients()?)
    }

    pub fn add_ingredient(&self, input: IngredientInput) -> AppResult<Ingredient> {
        input.validate()?;
        let ingredient = Ingredient::new(Uuid::new_v4().to_string(), input.name, input.unit);
        validate_ingredient(&ingredient)?;

        let _guard = self.lock()?;
        let mut ingredients = self.store.load_ingredients()?;
        if ingredients.iter().any(|i| i.name == ingredient.name) {
            return Err(AppError::Conflict {
                resource: "ingredient".to_string(),
                message: format!("An ingredient named {} already exists", ingredient.name),
            });
        }
        ingredients.push(ingredient.clone());
        self.store.save_ingredients(&ingredients)?;

        tracing::info!("Added ingredient {} ({})", ingredient.name, ingredient.id);
        Ok(ingredient)
    }

    /// Update an ingredient and cascade a changed name or unit into every
    /// recipe line that references it
    pub fn update_ingredient(&self, id: &str, input: IngredientInput) -> AppResult<Ingredient> {
        input.validate()?;

        let _guard = self.lock()?;
        let mut ingredients = self.store.load_ingredients()?;
        let ingredient = ingredients
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        let changed = ingredient.name != input.name || ingredient.unit != input.unit;
        ingredient.name = input.name;
        ingredient.unit = input.unit;
        validate_ingredient(ingredient)?;
        let updated = ingredient.clone();

        self.store.save_ingredients(&ingredients)?;

        if changed {
            let mut recipes = self.store.load_recipes()?;
            let synced = sync_recipe_lines(&mut recipes, &updated);
            if synced > 0 {
                self.store.save_recipes(&recipes)?;
            }
            tracing::info!(
                "Updated ingredient {}, synced {} recipe lines",
                updated.id,
                synced
            );
        }

        Ok(updated)
    }

    /// Delete an ingredient no recipe uses
    pub fn delete_ingredient(&self, id: &str) -> AppResult<()> {
        let _guard = self.lock()?;
        let mut ingredients = self.store.load_ingredients()?;
        let position = ingredients
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        let users: Vec<String> = self
            .store
            .load_recipes()?
            .into_iter()
            .filter(|recipe| recipe.uses(id))
            .map(|recipe| recipe.name)
            .collect();
        if !users.is_empty() {
            return Err(AppError::Conflict {
                resource: "ingredient".to_string(),
                message: format!(
                    "Ingredient {} is used by recipes: {}",
                    ingredients[position].name,
                    users.join(", ")
                ),
            });
        }

        let removed = ingredients.remove(position);
        self.store.save_ingredients(&ingredients)?;
        tracing::info!("Deleted ingredient {} ({})", removed.name, removed.id);
        Ok(())
    }

    // ========================================================================
    // Recipes
    // ========================================================================

    pub fn list_recipes(&self) -> AppResult<Vec<Recipe>> {
        Ok(self.store.load_recipes()?)
    }

    pub fn add_recipe(&self, input: RecipeInput) -> AppResult<Recipe> {
        input.validate()?;

        let _guard = self.lock()?;
        let recipe = self.build_recipe(Uuid::new_v4().to_string(), input)?;
        let mut recipes = self.store.load_recipes()?;
        recipes.push(recipe.clone());
        self.store.save_recipes(&recipes)?;

        tracing::info!("Added recipe {} ({})", recipe.name, recipe.id);
        Ok(recipe)
    }

    pub fn update_recipe(&self, id: &str, input: RecipeInput) -> AppResult<Recipe> {
        input.validate()?;

        let _guard = self.lock()?;
        let mut recipes = self.store.load_recipes()?;
        let slot = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound("Recipe".to_string()))?;

        let recipe = self.build_recipe(id.to_string(), input)?;
        *slot = recipe.clone();
        self.store.save_recipes(&recipes)?;

        tracing::info!("Updated recipe {}", recipe.id);
        Ok(recipe)
    }

    pub fn delete_recipe(&self, id: &str) -> AppResult<()> {
        let _guard = self.lock()?;
        let mut recipes = self.store.load_recipes()?;
        let before = recipes.len();
        recipes.retain(|r| r.id != id);
        if recipes.len() == before {
            return Err(AppError::NotFound("Recipe".to_string()));
        }
        self.store.save_recipes(&recipes)?;
        tracing::info!("Deleted recipe {}", id);
        Ok(())
    }

    /// Resolve submitted lines against the ingredient catalog
    fn build_recipe(&self, id: String, input: RecipeInput) -> AppResult<Recipe> {
        let ingredients = self.store.load_ingredients()?;
        let lines = input
            .ingredients
            .iter()
            .map(|line| {
                ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .map(|ingredient| RecipeIngredient::from_ingredient(ingredient, line.amount))
                    .ok_or_else(|| ValidationError::UnknownIngredient(line.ingredient_id.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let recipe = Recipe {
            id,
            name: input.name,
            ingredients: lines,
        };
        validate_recipe(&recipe)?;
        validate_recipe_references(&recipe, &ingredients)?;
        Ok(recipe)
    }

    // ========================================================================
    // Daily Entries
    // ========================================================================

    pub fn list_daily_entries(&self) -> AppResult<Vec<DailyEntry>> {
        Ok(self.store.load_daily_entries()?)
    }

    /// Record the stock lines for `date`, replacing the records of an
    /// existing entry for that date or appending a new entry
    pub fn record_daily_entry(&self, date: NaiveDate, input: DailyEntryInput) -> AppResult<DailyEntry> {
        input.validate()?;

        let _guard = self.lock()?;
        let ingredients = self.store.load_ingredients()?;
        let records = input
            .records
            .into_iter()
            .map(|line| {
                let ingredient = ingredients
                    .iter()
                    .find(|i| i.id == line.ingredient_id)
                    .ok_or_else(|| ValidationError::UnknownIngredient(line.ingredient_id.clone()))?;
                Ok(StockRecord {
                    id: Uuid::new_v4().to_string(),
                    ingredient_id: ingredient.id.clone(),
                    ingredient_name: ingredient.name.clone(),
                    purchase_amount: line.purchase_amount,
                    sales_amount: line.sales_amount,
                    sold_amount: line.sold_amount,
                    unit: ingredient.unit.clone(),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let mut entries = self.store.load_daily_entries()?;
        let entry = match entries.iter_mut().find(|e| e.date == date) {
            Some(existing) => {
                existing.records = records;
                validate_daily_entry(existing)?;
                tracing::info!("Replaced daily entry for {}", date);
                existing.clone()
            }
            None => {
                let entry = DailyEntry {
                    id: Uuid::new_v4().to_string(),
                    date,
                    records,
                };
                validate_daily_entry(&entry)?;
                entries.push(entry.clone());
                tracing::info!("Recorded daily entry for {}", date);
                entry
            }
        };

        self.store.save_daily_entries(&entries)?;
        Ok(entry)
    }
}

/// Copy the ingredient's name and unit into matching recipe lines,
/// returning how many lines changed
pub fn sync_recipe_lines(recipes: &mut [Recipe], ingredient: &Ingredient) -> usize {
    let mut synced = 0;
    for line in recipes
        .iter_mut()
        .flat_map(|recipe| recipe.ingredients.iter_mut())
        .filter(|line| line.ingredient_id == ingredient.id)
    {
        if line.ingredient_name != ingredient.name || line.unit != ingredient.unit {
            line.ingredient_name = ingredient.name.clone();
            line.unit = ingredient.unit.clone();
            synced += 1;
        }
    }
    synced
}
