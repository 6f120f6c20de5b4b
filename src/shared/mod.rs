//! Geteilte Typen zwischen Ansicht und Binary.

pub mod options;

pub use options::{ViewOptions, OPTIONS_FILE_NAME};
pub use options::{
    DEFAULT_BACKGROUND_COLOR, DEFAULT_GRID_COLOR, DEFAULT_GRID_OPACITY, SELECTION_HIGHLIGHT_ALPHA,
};
