//! Menu categories.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ImageRef, NAME_MAX_CHARS, too_long};
use crate::domain::slug::is_valid_slug;

/// Stable category identifier assigned by the store.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(transparent)]
pub struct CategoryId(i32);

impl CategoryId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for category drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    InvalidName { value: String },
    EmptyDisplayName,
    DisplayNameTooLong,
    InvalidImage { value: String },
}

impl CategoryValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidName { .. } => "name",
            Self::EmptyDisplayName | Self::DisplayNameTooLong => "displayName",
            Self::InvalidImage { .. } => "image",
        }
    }
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidName { value } => write!(
                f,
                "category name '{value}' must be a lowercase slug \
                 (letters, digits, hyphens) of at most {SLUG_MAX_CHARS} characters"
            ),
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong => write!(
                f,
                "display name must be at most {NAME_MAX_CHARS} characters"
            ),
            Self::InvalidImage { value } => {
                write!(f, "image '{value}' must be a plain file name")
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Width of the `categories.name` column, in characters.
pub const SLUG_MAX_CHARS: usize = 100;

/// Internal category name: a unique slug such as `soft-drinks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Validate a slug.
    pub fn new(raw: impl Into<String>) -> Result<Self, CategoryValidationError> {
        let value = raw.into();
        if is_valid_slug(&value) && !too_long(&value, SLUG_MAX_CHARS) {
            Ok(Self(value))
        } else {
            Err(CategoryValidationError::InvalidName { value })
        }
    }

    /// The slug text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw category input from an admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDraft {
    #[schema(example = "starters")]
    pub name: String,
    #[schema(example = "Vorspeisen")]
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub is_drink_category: bool,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub image: Option<String>,
}

const fn default_active() -> bool {
    true
}

/// Validated category attributes, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: CategoryName,
    pub display_name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_drink_category: bool,
    pub active: bool,
    pub image: Option<ImageRef>,
}

impl TryFrom<CategoryDraft> for CategoryFields {
    type Error = CategoryValidationError;

    fn try_from(draft: CategoryDraft) -> Result<Self, Self::Error> {
        let name = CategoryName::new(draft.name.trim())?;
        let display_name = draft.display_name.trim();
        if display_name.is_empty() {
            return Err(CategoryValidationError::EmptyDisplayName);
        }
        if too_long(display_name, NAME_MAX_CHARS) {
            return Err(CategoryValidationError::DisplayNameTooLong);
        }
        let image = super::optional_text(draft.image)
            .map(|raw| {
                ImageRef::new(raw.as_str())
                    .map_err(|_| CategoryValidationError::InvalidImage { value: raw })
            })
            .transpose()?;
        Ok(Self {
            name,
            display_name: display_name.to_owned(),
            description: super::optional_text(draft.description),
            display_order: draft.display_order,
            is_drink_category: draft.is_drink_category,
            active: draft.active,
            image,
        })
    }
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub display_name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_drink_category: bool,
    pub active: bool,
    pub image: Option<ImageRef>,
}

impl Category {
    /// Attach an identifier to validated fields.
    pub fn from_fields(id: CategoryId, fields: CategoryFields) -> Self {
        let CategoryFields {
            name,
            display_name,
            description,
            display_order,
            is_drink_category,
            active,
            image,
        } = fields;
        Self {
            id,
            name,
            display_name,
            description,
            display_order,
            is_drink_category,
            active,
            image,
        }
    }
}
