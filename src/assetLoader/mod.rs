// Asset module: builds every texture the core can blit before the loop starts

pub mod asset_loader;

pub use asset_loader::{Atlas, Sprite};
