//! Layout mutation error types.

use thiserror::Error;

/// Errors returned by layout mutations.
///
/// Resize bound violations are deliberately not represented here: they are
/// a normal rejected-input case handled by the resize controller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No placement has the given id.
    #[error("No widget with id '{id}' in the layout")]
    UnknownId {
        /// The id that was looked up.
        id: String,
    },

    /// A placement with the given id already exists.
    #[error("Widget id '{id}' is already used in the layout")]
    DuplicateId {
        /// The conflicting id.
        id: String,
    },

    /// The widget type is not in the registry.
    #[error("Unknown widget type '{widget_type}'")]
    UnknownWidgetType {
        /// The type that was requested.
        widget_type: String,
    },

    /// The option key is not configurable for this widget type.
    #[error("Widget type '{widget_type}' has no option '{option}'")]
    UnsupportedOption {
        /// Type of the widget being configured.
        widget_type: String,
        /// Rejected option key.
        option: String,
    },

    /// No preset with the given name.
    #[error("Unknown layout preset '{name}'")]
    UnknownPreset {
        /// The preset name that was requested.
        name: String,
    },
}
