//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api/v1` handler and the health probes, the
//! request and response bodies they exchange, and the session cookie
//! security scheme. Swagger UI serves it at `/docs` in debug builds.

use crate::domain::{
    CategoryDraft, DaySubmission, DisplayLocale, Error, ErrorCode, MenuItemDraft, SubmissionMode,
    Weekday,
};
use crate::inbound::http::SESSION_COOKIE;
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::opening_hours::OpeningHoursRequest;
use crate::inbound::http::schemas::{
    AdminBody, AdminCatalogBody, CategoryBody, FormattedHoursBody, HoursStatusBody,
    MenuItemBody, MenuSectionBody, OpeningHoursBody, PublicMenuBody, SetActiveRequest,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE,
                "Admin session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Menuboard API",
        description = "Public menu and opening hours, plus the admin interface that edits them."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::menu::get_menu,
        crate::inbound::http::opening_hours::get_opening_hours,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_admin,
        crate::inbound::http::menu::get_admin_catalog,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::set_category_active,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::menu_items::create_menu_item,
        crate::inbound::http::menu_items::update_menu_item,
        crate::inbound::http::menu_items::set_menu_item_active,
        crate::inbound::http::menu_items::delete_menu_item,
        crate::inbound::http::opening_hours::get_admin_opening_hours,
        crate::inbound::http::opening_hours::update_opening_hours,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        AdminBody,
        CategoryDraft,
        CategoryBody,
        MenuItemDraft,
        MenuItemBody,
        MenuSectionBody,
        PublicMenuBody,
        AdminCatalogBody,
        SetActiveRequest,
        OpeningHoursRequest,
        DaySubmission,
        SubmissionMode,
        Weekday,
        OpeningHoursBody,
        FormattedHoursBody,
        HoursStatusBody,
        DisplayLocale,
    )),
    tags(
        (name = "menu", description = "Public menu and admin catalog"),
        (name = "categories", description = "Admin category editing"),
        (name = "menu-items", description = "Admin menu item editing"),
        (name = "opening-hours", description = "Opening hours display and editing"),
        (name = "auth", description = "Admin sessions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
