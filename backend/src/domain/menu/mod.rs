//! Menu catalog model: categories, items, prices and image references.
//!
//! Drafts carry raw admin input; `TryFrom` conversions into the `*Fields`
//! types validate and trim it. Stored entities pair validated fields with a
//! store-assigned identifier.

mod category;
mod item;
mod price;

use std::fmt;

pub use category::{
    Category, CategoryDraft, CategoryFields, CategoryId, CategoryName, CategoryValidationError,
};
pub use item::{
    Dietary, MenuItem, MenuItemDraft, MenuItemFields, MenuItemId, MenuItemValidationError,
    SpiceLevel,
};
pub use price::{Price, PriceError};

/// Widths of the catalog text columns, in characters.
pub const NAME_MAX_CHARS: usize = 200;
pub const IMAGE_MAX_CHARS: usize = 255;
pub const ALLERGENS_MAX_CHARS: usize = 255;
pub const PORTION_SIZE_MAX_CHARS: usize = 100;

/// Rejected image reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("image reference '{0}' must be a plain file name")]
pub struct ImageRefError(pub String);

/// File name of an uploaded image inside the configured image directory.
///
/// Only plain names are accepted: no path separators, no parent or hidden
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef(String);

impl ImageRef {
    /// Validate a file name.
    pub fn new(raw: &str) -> Result<Self, ImageRefError> {
        let plain = !raw.is_empty()
            && !raw.starts_with('.')
            && !raw.contains(['/', '\\', '\0'])
            && raw.trim() == raw
            && raw.chars().count() <= IMAGE_MAX_CHARS;
        if plain {
            Ok(Self(raw.to_owned()))
        } else {
            Err(ImageRefError(raw.to_owned()))
        }
    }

    /// The file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn too_long(text: &str, max: usize) -> bool {
    text.chars().count() > max
}

/// Trim optional text, mapping blank input to `None`.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
