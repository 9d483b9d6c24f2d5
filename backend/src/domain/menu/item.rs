//! Menu items and their dietary attributes.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{
    ALLERGENS_MAX_CHARS, CategoryId, ImageRef, NAME_MAX_CHARS, PORTION_SIZE_MAX_CHARS, Price,
    PriceError, too_long,
};

/// Stable menu item identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct MenuItemId(i32);

impl MenuItemId {
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

impl fmt::Display for MenuItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Heat indicator shown next to an item, 0 (mild) to 3 (very hot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpiceLevel(u8);

impl SpiceLevel {
    /// Hottest supported level.
    pub const MAX: u8 = 3;

    /// Validate a level.
    pub fn new(level: u8) -> Result<Self, MenuItemValidationError> {
        if level > Self::MAX {
            return Err(MenuItemValidationError::SpiceLevelOutOfRange { level });
        }
        Ok(Self(level))
    }

    /// The numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Dietary flags for an item. A vegan item is always vegetarian.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dietary {
    pub vegetarian: bool,
    pub vegan: bool,
    pub spice: SpiceLevel,
}

impl Dietary {
    /// Build dietary flags, deriving `vegetarian` from `vegan`.
    #[must_use]
    pub const fn new(vegetarian: bool, vegan: bool, spice: SpiceLevel) -> Self {
        Self {
            vegetarian: vegetarian || vegan,
            vegan,
            spice,
        }
    }
}

/// Validation failures for menu item drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItemValidationError {
    EmptyName,
    /// `field` is the camelCase input name; `max` its width in characters.
    TooLong { field: &'static str, max: usize },
    InvalidPrice(PriceError),
    SpiceLevelOutOfRange { level: u8 },
    InvalidImage { value: String },
}

impl MenuItemValidationError {
    /// Name of the offending input field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::TooLong { field, .. } => *field,
            Self::InvalidPrice(_) => "price",
            Self::SpiceLevelOutOfRange { .. } => "spiceLevel",
            Self::InvalidImage { .. } => "image",
        }
    }
}

impl fmt::Display for MenuItemValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "item name must not be empty"),
            Self::TooLong { field, max } => write!(f, "{field} must be at most {max} characters"),
            Self::InvalidPrice(err) => write!(f, "{err}"),
            Self::SpiceLevelOutOfRange { level } => write!(
                f,
                "spice level must be between 0 and {}, got {level}",
                SpiceLevel::MAX
            ),
            Self::InvalidImage { value } => {
                write!(f, "image '{value}' must be a plain file name")
            }
        }
    }
}

impl std::error::Error for MenuItemValidationError {}

/// Raw menu item input from an admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemDraft {
    #[schema(example = "Tomatensuppe")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Decimal string, e.g. `"6.50"`.
    #[schema(example = "6.50")]
    pub price: String,
    #[schema(value_type = i32)]
    pub category_id: CategoryId,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_lunch_special: bool,
    #[serde(default)]
    pub allergens: Option<String>,
    #[serde(default)]
    pub portion_size: Option<String>,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub vegan: bool,
    #[serde(default)]
    pub spice_level: u8,
}

const fn default_active() -> bool {
    true
}

/// Validated item attributes, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemFields {
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: CategoryId,
    pub display_order: i32,
    pub active: bool,
    pub image: Option<ImageRef>,
    pub is_lunch_special: bool,
    pub allergens: Option<String>,
    pub portion_size: Option<String>,
    pub dietary: Dietary,
}

impl TryFrom<MenuItemDraft> for MenuItemFields {
    type Error = MenuItemValidationError;

    fn try_from(draft: MenuItemDraft) -> Result<Self, Self::Error> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(MenuItemValidationError::EmptyName);
        }
        let allergens = super::optional_text(draft.allergens);
        let portion_size = super::optional_text(draft.portion_size);
        for (field, text, max) in [
            ("name", Some(name), NAME_MAX_CHARS),
            ("allergens", allergens.as_deref(), ALLERGENS_MAX_CHARS),
            ("portionSize", portion_size.as_deref(), PORTION_SIZE_MAX_CHARS),
        ] {
            if text.is_some_and(|text| too_long(text, max)) {
                return Err(MenuItemValidationError::TooLong { field, max });
            }
        }
        let price = draft
            .price
            .parse::<Price>()
            .map_err(MenuItemValidationError::InvalidPrice)?;
        let spice = SpiceLevel::new(draft.spice_level)?;
        let image = super::optional_text(draft.image)
            .map(|raw| {
                ImageRef::new(raw.as_str())
                    .map_err(|_| MenuItemValidationError::InvalidImage { value: raw })
            })
            .transpose()?;
        Ok(Self {
            name: name.to_owned(),
            description: super::optional_text(draft.description),
            price,
            category_id: draft.category_id,
            display_order: draft.display_order,
            active: draft.active,
            image,
            is_lunch_special: draft.is_lunch_special,
            allergens,
            portion_size,
            dietary: Dietary::new(draft.vegetarian, draft.vegan, spice),
        })
    }
}

/// A stored menu item.
///
/// `is_drink` is a cached copy of the owning category's drink flag; read
/// paths use [`effective_is_drink`](crate::domain::effective_is_drink) instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub category_id: CategoryId,
    pub is_drink: bool,
    pub display_order: i32,
    pub active: bool,
    pub image: Option<ImageRef>,
    pub is_lunch_special: bool,
    pub allergens: Option<String>,
    pub portion_size: Option<String>,
    pub dietary: Dietary,
}

impl MenuItem {
    /// Attach an identifier and cached drink flag to validated fields.
    pub fn from_fields(id: MenuItemId, fields: MenuItemFields, is_drink: bool) -> Self {
        let MenuItemFields {
            name,
            description,
            price,
            category_id,
            display_order,
            active,
            image,
            is_lunch_special,
            allergens,
            portion_size,
            dietary,
        } = fields;
        Self {
            id,
            name,
            description,
            price,
            category_id,
            is_drink,
            display_order,
            active,
            image,
            is_lunch_special,
            allergens,
            portion_size,
            dietary,
        }
    }
}
