//! Asset pipeline: reference resolution, fetching, format parsers, the
//! brand-material override and load diagnostics.

pub mod diagnose;
pub mod fetch;
pub mod glb;
pub mod loader;
pub mod model;
pub mod mtl;
pub mod obj;
pub mod reference;

pub use loader::{ModelFormat, load};
pub use model::LoadedModel;
pub use reference::{AssetReference, Environment};
