//! HTTP handlers for ingredient, recipe and daily entry endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use shared::{DailyEntry, Ingredient, Recipe};

use super::blocking;
use crate::error::AppResult;
use crate::services::catalog::{DailyEntryInput, IngredientInput, RecipeInput};
use crate::AppState;

/// List all ingredients
pub async fn list_ingredients(State(state): State<AppState>) -> AppResult<Json<Vec<Ingredient>>> {
    let catalog = state.catalog;
    Ok(Json(blocking(move || catalog.list_ingredients()).await?))
}

/// Create an ingredient
pub async fn create_ingredient(
    State(state): State<AppState>,
    Json(input): Json<IngredientInput>,
) -> AppResult<(StatusCode, Json<Ingredient>)> {
    let catalog = state.catalog;
    let ingredient = blocking(move || catalog.add_ingredient(input)).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

/// Update an ingredient; recipes referencing it are kept in sync
pub async fn update_ingredient(
    State(state): State<AppState>,
    Path(ingredient_id): Path<String>,
    Json(input): Json<IngredientInput>,
) -> AppResult<Json<Ingredient>> {
    let catalog = state.catalog;
    Ok(Json(
        blocking(move || catalog.update_ingredient(&ingredient_id, input)).await?,
    ))
}

/// Delete an ingredient
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Path(ingredient_id): Path<String>,
) -> AppResult<StatusCode> {
    let catalog = state.catalog;
    blocking(move || catalog.delete_ingredient(&ingredient_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all recipes
pub async fn list_recipes(State(state): State<AppState>) -> AppResult<Json<Vec<Recipe>>> {
    let catalog = state.catalog;
    Ok(Json(blocking(move || catalog.list_recipes()).await?))
}

/// Create a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    Json(input): Json<RecipeInput>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    let catalog = state.catalog;
    let recipe = blocking(move || catalog.add_recipe(input)).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Replace a recipe
pub async fn update_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> AppResult<Json<Recipe>> {
    let catalog = state.catalog;
    Ok(Json(blocking(move || catalog.update_recipe(&recipe_id, input)).await?))
}

/// Delete a recipe
pub async fn delete_recipe(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> AppResult<StatusCode> {
    let catalog = state.catalog;
    blocking(move || catalog.delete_recipe(&recipe_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List all daily entries
pub async fn list_daily_entries(State(state): State<AppState>) -> AppResult<Json<Vec<DailyEntry>>> {
    let catalog = state.catalog;
    Ok(Json(blocking(move || catalog.list_daily_entries()).await?))
}

/// Record the entry for a date
pub async fn record_daily_entry(
    State(state): State<AppState>,
    Path(date): Path<NaiveDate>,
    Json(input): Json<DailyEntryInput>,
) -> AppResult<Json<DailyEntry>> {
    let catalog = state.catalog;
    Ok(Json(blocking(move || catalog.record_daily_entry(date, input)).await?))
}
