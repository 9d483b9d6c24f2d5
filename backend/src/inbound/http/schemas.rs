//! Request and response bodies for the HTTP adapter.
//!
//! Domain entities hold validated newtypes (`Price`, `ImageRef`, `DaySchedule`)
//! that have no stable wire form of their own. These DTOs flatten them into
//! JSON-friendly shapes and carry the OpenAPI schemas.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::AdminCatalog;
use crate::domain::{
    AdminAccount, Category, FormattedHours, HoursStatus, MenuItem, MenuSection, OpeningHours,
    PublicMenu, effective_is_drink,
};

/// Body of the `PUT .../{id}/active` toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SetActiveRequest {
    pub active: bool,
}

/// A category as shown to admins and on the public menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    #[schema(example = 3)]
    pub id: i32,
    #[schema(example = "starters")]
    pub name: String,
    #[schema(example = "Vorspeisen")]
    pub display_name: String,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_drink_category: bool,
    pub active: bool,
    #[schema(example = "starters.jpg")]
    pub image: Option<String>,
}

impl From<&Category> for CategoryBody {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.get(),
            name: category.name.as_str().to_owned(),
            display_name: category.display_name.clone(),
            description: category.description.clone(),
            display_order: category.display_order,
            is_drink_category: category.is_drink_category,
            active: category.active,
            image: category.image.as_ref().map(ToString::to_string),
        }
    }
}

/// A menu item. Prices are decimal strings with two places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemBody {
    #[schema(example = 12)]
    pub id: i32,
    #[schema(example = "Tomatensuppe")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "6.50")]
    pub price: String,
    pub category_id: i32,
    pub is_drink: bool,
    pub display_order: i32,
    pub active: bool,
    pub image: Option<String>,
    pub is_lunch_special: bool,
    #[schema(example = "A, G")]
    pub allergens: Option<String>,
    #[schema(example = "0,3 l")]
    pub portion_size: Option<String>,
    pub vegetarian: bool,
    pub vegan: bool,
    #[schema(minimum = 0, maximum = 3)]
    pub spice_level: u8,
}

impl From<&MenuItem> for MenuItemBody {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.get(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
            category_id: item.category_id.get(),
            is_drink: item.is_drink,
            display_order: item.display_order,
            active: item.active,
            image: item.image.as_ref().map(ToString::to_string),
            is_lunch_special: item.is_lunch_special,
            allergens: item.allergens.clone(),
            portion_size: item.portion_size.clone(),
            vegetarian: item.dietary.vegetarian,
            vegan: item.dietary.vegan,
            spice_level: item.dietary.spice.get(),
        }
    }
}

/// One category of the public menu with its visible items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuSectionBody {
    pub category: CategoryBody,
    pub items: Vec<MenuItemBody>,
}

impl From<&MenuSection> for MenuSectionBody {
    fn from(section: &MenuSection) -> Self {
        let items = section
            .items
            .iter()
            .map(|item| MenuItemBody {
                is_drink: effective_is_drink(item, &section.category),
                ..MenuItemBody::from(item)
            })
            .collect();
        Self {
            category: CategoryBody::from(&section.category),
            items,
        }
    }
}

/// The public menu, split into food and drinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenuBody {
    pub food: Vec<MenuSectionBody>,
    pub drinks: Vec<MenuSectionBody>,
}

impl From<&PublicMenu> for PublicMenuBody {
    fn from(menu: &PublicMenu) -> Self {
        Self {
            food: menu.food.iter().map(MenuSectionBody::from).collect(),
            drinks: menu.drinks.iter().map(MenuSectionBody::from).collect(),
        }
    }
}

/// Every category and item, active or not, for the admin editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminCatalogBody {
    pub categories: Vec<CategoryBody>,
    pub items: Vec<MenuItemBody>,
}

impl From<&AdminCatalog> for AdminCatalogBody {
    fn from(catalog: &AdminCatalog) -> Self {
        Self {
            categories: catalog.categories.iter().map(CategoryBody::from).collect(),
            items: catalog.items.iter().map(MenuItemBody::from).collect(),
        }
    }
}

/// Status word of a formatted opening-hours line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum HoursStatusBody {
    Closed,
    Open,
    NotSet,
}

/// One line of the public opening-hours table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormattedHoursBody {
    /// Stored day identifier, canonical for recognised weekdays.
    #[schema(example = "tuesday")]
    pub day: String,
    #[schema(example = "Dienstag")]
    pub label: String,
    pub status: HoursStatusBody,
    /// Opening windows as `HH:MM-HH:MM`, empty unless open.
    #[schema(example = json!(["11:30-14:00", "17:00-22:00"]))]
    pub windows: Vec<String>,
    #[schema(example = "11:30-14:00 & 17:00-22:00")]
    pub text: String,
}

impl From<&FormattedHours> for FormattedHoursBody {
    fn from(line: &FormattedHours) -> Self {
        let (status, windows) = match line.status() {
            HoursStatus::Closed => (HoursStatusBody::Closed, Vec::new()),
            HoursStatus::NotSet => (HoursStatusBody::NotSet, Vec::new()),
            HoursStatus::Open(ranges) => (
                HoursStatusBody::Open,
                ranges.iter().map(ToString::to_string).collect(),
            ),
        };
        Self {
            day: line.day().to_string(),
            label: line.label().to_owned(),
            status,
            windows,
            text: line.status_text(),
        }
    }
}

/// A stored opening-hours record in the shape the admin form edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursBody {
    #[schema(example = "tuesday")]
    pub day: String,
    pub label: Option<String>,
    pub closed: bool,
    #[schema(example = "11:30")]
    pub open_time: Option<String>,
    #[schema(example = "14:00")]
    pub close_time: Option<String>,
    pub open_time_2: Option<String>,
    pub close_time_2: Option<String>,
}

impl From<&OpeningHours> for OpeningHoursBody {
    fn from(record: &OpeningHours) -> Self {
        let times = record.schedule().stored_times();
        Self {
            day: record.day().to_string(),
            label: record.label().map(str::to_owned),
            closed: record.schedule().is_closed(),
            open_time: times.open_time,
            close_time: times.close_time,
            open_time_2: times.open_time_2,
            close_time_2: times.close_time_2,
        }
    }
}

/// The signed-in administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminBody {
    pub id: i32,
    #[schema(example = "admin")]
    pub username: String,
}

impl From<&AdminAccount> for AdminBody {
    fn from(admin: &AdminAccount) -> Self {
        Self {
            id: admin.id.get(),
            username: admin.username.clone(),
        }
    }
}
