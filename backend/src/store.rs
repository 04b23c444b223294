//! Persistence collaborator for the catalog, daily entries and store snapshots
//!
//! Every operation loads or saves a whole collection. The analytics engine
//! never touches storage; services load from here and pass slices in.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, RwLock};

use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    DailyEntry, Ingredient, Recipe, RecipeIngredient, Store, StoreMetrics, StoreStatus, StoreType,
    UserSettings,
};
use thiserror::Error;

const INGREDIENTS_KEY: &str = "inventory_ingredients";
const RECIPES_KEY: &str = "inventory_recipes";
const DAILY_ENTRIES_KEY: &str = "inventory_daily_entries";
const SETTINGS_KEY: &str = "inventory_settings";
const STORES_KEY: &str = "inventory_stores";
const STORE_HISTORY_PREFIX: &str = "inventory_store_history";

/// Storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed data in {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Edit applied to one store's history while the store holds it exclusively
pub type HistoryEdit<'a> = &'a mut dyn FnMut(&mut Vec<StoreMetrics>);

/// Whole-collection persistence
///
/// Store history is kept per store, most recent snapshot first.
pub trait InventoryStore: Send + Sync {
    fn load_ingredients(&self) -> StoreResult<Vec<Ingredient>>;
    fn save_ingredients(&self, ingredients: &[Ingredient]) -> StoreResult<()>;

    fn load_recipes(&self) -> StoreResult<Vec<Recipe>>;
    fn save_recipes(&self, recipes: &[Recipe]) -> StoreResult<()>;

    fn load_daily_entries(&self) -> StoreResult<Vec<DailyEntry>>;
    fn save_daily_entries(&self, entries: &[DailyEntry]) -> StoreResult<()>;

    /// Saved settings, or the defaults when none were saved
    fn load_settings(&self) -> StoreResult<UserSettings>;
    fn save_settings(&self, settings: &UserSettings) -> StoreResult<()>;

    fn load_stores(&self) -> StoreResult<Vec<Store>>;
    fn save_stores(&self, stores: &[Store]) -> StoreResult<()>;

    fn load_store_history(&self, store_id: &str) -> StoreResult<Vec<StoreMetrics>>;
    fn save_store_history(&self, store_id: &str, history: &[StoreMetrics]) -> StoreResult<()>;

    /// Load, edit and save one store's history as a single step; returns
    /// the saved history
    fn update_store_history(&self, store_id: &str, edit: HistoryEdit<'_>) -> StoreResult<Vec<StoreMetrics>>;
}

// ============================================================================
// JSON File Store
// ============================================================================

/// One pretty-printed JSON file per collection inside a data directory.
/// Each store's snapshot history has its own file.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    io_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Store ids become file names, so only `[A-Za-z0-9_-]` is accepted
    fn history_key(store_id: &str) -> StoreResult<String> {
        let valid = !store_id.is_empty()
            && store_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(store_id.to_string()));
        }
        Ok(format!("{}_{}", STORE_HISTORY_PREFIX, store_id))
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.io_lock.lock().map_err(|_| StoreError::Poisoned)
    }

    fn read<T: DeserializeOwned + Default>(&self, key: &str) -> StoreResult<T> {
        let _guard = self.lock()?;
        self.read_file(key)
    }

    fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let _guard = self.lock()?;
        self.write_file(key, value)
    }

    /// Read-modify-write under one hold of the I/O lock
    fn update<T>(&self, key: &str, edit: impl FnOnce(&mut T)) -> StoreResult<T>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        let _guard = self.lock()?;
        let mut value: T = self.read_file(key)?;
        edit(&mut value);
        self.write_file(key, &value)?;
        Ok(value)
    }

    fn read_file<T: DeserializeOwned + Default>(&self, key: &str) -> StoreResult<T> {
        let path = self.path_for(key);

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(T::default()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialization {
            key: key.to_string(),
            source,
        })
    }

    /// Writes to a sibling temp file then renames over the target
    fn write_file<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        fs::create_dir_all(&self.data_dir).map_err(|source| StoreError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialization {
            key: key.to_string(),
            source,
        })?;

        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;

        tracing::debug!("Saved {}", key);
        Ok(())
    }
}

impl InventoryStore for JsonFileStore {
    fn load_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        self.read(INGREDIENTS_KEY)
    }

    fn save_ingredients(&self, ingredients: &[Ingredient]) -> StoreResult<()> {
        self.write(INGREDIENTS_KEY, ingredients)
    }

    fn load_recipes(&self) -> StoreResult<Vec<Recipe>> {
        self.read(RECIPES_KEY)
    }

    fn save_recipes(&self, recipes: &[Recipe]) -> StoreResult<()> {
        self.write(RECIPES_KEY, recipes)
    }

    fn load_daily_entries(&self) -> StoreResult<Vec<DailyEntry>> {
        self.read(DAILY_ENTRIES_KEY)
    }

    fn save_daily_entries(&self, entries: &[DailyEntry]) -> StoreResult<()> {
        self.write(DAILY_ENTRIES_KEY, entries)
    }

    fn load_settings(&self) -> StoreResult<UserSettings> {
        self.read(SETTINGS_KEY)
    }

    fn save_settings(&self, settings: &UserSettings) -> StoreResult<()> {
        self.write(SETTINGS_KEY, settings)
    }

    fn load_stores(&self) -> StoreResult<Vec<Store>> {
        self.read(STORES_KEY)
    }

    fn save_stores(&self, stores: &[Store]) -> StoreResult<()> {
        self.write(STORES_KEY, stores)
    }

    fn load_store_history(&self, store_id: &str) -> StoreResult<Vec<StoreMetrics>> {
        self.read(&Self::history_key(store_id)?)
    }

    fn save_store_history(&self, store_id: &str, history: &[StoreMetrics]) -> StoreResult<()> {
        self.write(&Self::history_key(store_id)?, history)
    }

    fn update_store_history(&self, store_id: &str, edit: HistoryEdit<'_>) -> StoreResult<Vec<StoreMetrics>> {
        self.update(&Self::history_key(store_id)?, |history: &mut Vec<StoreMetrics>| edit(history))
    }
}

// ============================================================================
// In-Memory Store
// ============================================================================

#[derive(Debug, Default)]
struct MemoryData {
    ingredients: Vec<Ingredient>,
    recipes: Vec<Recipe>,
    daily_entries: Vec<DailyEntry>,
    settings: Option<UserSettings>,
    stores: Vec<Store>,
    store_history: BTreeMap<String, Vec<StoreMetrics>>,
}

/// Process-local store, used by tests and ephemeral deployments
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_read<T>(&self, f: impl FnOnce(&MemoryData) -> T) -> StoreResult<T> {
        let data = self.data.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&data))
    }

    fn with_write(&self, f: impl FnOnce(&mut MemoryData)) -> StoreResult<()> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        f(&mut data);
        Ok(())
    }
}

impl InventoryStore for MemoryStore {
    fn load_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        self.with_read(|data| data.ingredients.clone())
    }

    fn save_ingredients(&self, ingredients: &[Ingredient]) -> StoreResult<()> {
        self.with_write(|data| data.ingredients = ingredients.to_vec())
    }

    fn load_recipes(&self) -> StoreResult<Vec<Recipe>> {
        self.with_read(|data| data.recipes.clone())
    }

    fn save_recipes(&self, recipes: &[Recipe]) -> StoreResult<()> {
        self.with_write(|data| data.recipes = recipes.to_vec())
    }

    fn load_daily_entries(&self) -> StoreResult<Vec<DailyEntry>> {
        self.with_read(|data| data.daily_entries.clone())
    }

    fn save_daily_entries(&self, entries: &[DailyEntry]) -> StoreResult<()> {
        self.with_write(|data| data.daily_entries = entries.to_vec())
    }

    fn load_settings(&self) -> StoreResult<UserSettings> {
        self.with_read(|data| data.settings.clone().unwrap_or_default())
    }

    fn save_settings(&self, settings: &UserSettings) -> StoreResult<()> {
        self.with_write(|data| data.settings = Some(settings.clone()))
    }

    fn load_stores(&self) -> StoreResult<Vec<Store>> {
        self.with_read(|data| data.stores.clone())
    }

    fn save_stores(&self, stores: &[Store]) -> StoreResult<()> {
        self.with_write(|data| data.stores = stores.to_vec())
    }

    fn load_store_history(&self, store_id: &str) -> StoreResult<Vec<StoreMetrics>> {
        self.with_read(|data| data.store_history.get(store_id).cloned().unwrap_or_default())
    }

    fn save_store_history(&self, store_id: &str, history: &[StoreMetrics]) -> StoreResult<()> {
        self.with_write(|data| {
            data.store_history
                .insert(store_id.to_string(), history.to_vec());
        })
    }

    fn update_store_history(&self, store_id: &str, edit: HistoryEdit<'_>) -> StoreResult<Vec<StoreMetrics>> {
        let mut data = self.data.write().map_err(|_| StoreError::Poisoned)?;
        let history = data.store_history.entry(store_id.to_string()).or_default();
        edit(history);
        Ok(history.clone())
    }
}

// ============================================================================
// Default Data
// ============================================================================

pub fn default_ingredients() -> Vec<Ingredient> {
    vec![
        Ingredient::new("1", "Flour", "kg"),
        Ingredient::new("2", "Sugar", "kg"),
        Ingredient::new("3", "Cream", "kg"),
        Ingredient::new("4", "Egg", "pcs"),
        Ingredient::new("5", "Milk", "L"),
    ]
}

pub fn default_recipes() -> Vec<Recipe> {
    let ingredients = default_ingredients();
    let line = |index: usize, amount: Decimal| RecipeIngredient::from_ingredient(&ingredients[index], amount);

    vec![
        Recipe {
            id: "1".to_string(),
            name: "Bread".to_string(),
            ingredients: vec![
                line(0, Decimal::new(5, 1)),
                line(1, Decimal::new(1, 1)),
                line(4, Decimal::new(2, 1)),
            ],
        },
        Recipe {
            id: "2".to_string(),
            name: "Cake".to_string(),
            ingredients: vec![
                line(0, Decimal::new(3, 1)),
                line(1, Decimal::new(2, 1)),
                line(2, Decimal::new(1, 1)),
                line(3, Decimal::from(4)),
            ],
        },
    ]
}

pub fn default_stores() -> Vec<Store> {
    [
        ("store1", "Branch 1", "Shanghai", StoreType::Standard),
        ("store2", "Branch 2", "Beijing", StoreType::Flagship),
        ("store3", "Branch 3", "Guangzhou", StoreType::Standard),
        ("store4", "Branch 4", "Shenzhen", StoreType::Standard),
        ("store5", "Branch 5", "Hangzhou", StoreType::Standard),
    ]
    .into_iter()
    .map(|(id, name, region, store_type)| Store {
        id: id.to_string(),
        name: name.to_string(),
        region: region.to_string(),
        store_type,
        status: StoreStatus::Active,
    })
    .collect()
}

/// Install default ingredients, recipes and stores into empty collections,
/// and persist settings so the defaults become explicit
pub fn seed_defaults(store: &dyn InventoryStore) -> StoreResult<()> {
    if store.load_ingredients()?.is_empty() {
        tracing::info!("Seeding default ingredients");
        store.save_ingredients(&default_ingredients())?;
    }

    if store.load_recipes()?.is_empty() {
        tracing::info!("Seeding default recipes");
        store.save_recipes(&default_recipes())?;
    }

    if store.load_stores()?.is_empty() {
        tracing::info!("Seeding default stores");
        store.save_stores(&default_stores())?;
    }

    let settings = store.load_settings()?;
    store.save_settings(&settings)
}
