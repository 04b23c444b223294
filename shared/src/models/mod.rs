//! Domain models for the Store Inventory Analytics platform

mod alert;
mod analysis;
mod catalog;
mod forecast;
mod settings;
mod stock;
mod store;

pub use alert::*;
pub use analysis::*;
pub use catalog::*;
pub use forecast::*;
pub use settings::*;
pub use stock::*;
pub use store::*;
