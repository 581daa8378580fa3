//! Layout model for the dashboard grid.
//!
//! A layout is a flat ordered list of [`WidgetPlacement`]s. Position is
//! emergent: [`pack`] flows placements into the 48-column grid in order.
//! Stored layouts pass through [`LayoutMigrator`] before use, and named
//! [`Preset`]s can replace the whole layout at once.

mod error;
pub mod migrate;
mod model;
pub mod pack;
mod placement;
mod presets;

pub use error::LayoutError;
pub use migrate::{ColumnScaleMigration, DecodeError, LayoutMigrator, Migration, RawPlacement};
pub use model::Layout;
pub use pack::{pack, GridGeometry, GridRect, PackedWidget, Packing};
pub use placement::WidgetPlacement;
pub use presets::{Preset, PresetCatalog};
