//! Domain primitives, services and ports.
//!
//! Purpose: hold the restaurant's availability model (opening hours, menu
//! visibility) and the services that drive it, free of HTTP and storage
//! concerns. Adapters reach the domain only through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Opening hours: Weekday, DayKey, DaySchedule, OpeningHours, submissions
//!   and display formatting.
//! - Menu: Category, MenuItem, Price, ImageRef and PublicMenu assembly.
//! - Services: MenuService, OpeningHoursService, AdminLoginService and the
//!   startup `bootstrap` routine.

pub mod bootstrap;
pub mod error;
pub mod ports;

mod admin;
mod admin_login_service;
mod auth;
mod clock_time;
mod menu;
mod menu_service;
mod opening_hours;
mod opening_hours_display;
mod opening_hours_service;
mod opening_hours_submission;
mod slug;
mod trace_id;
mod visibility;
mod weekday;

pub use self::admin::{AdminAccount, AdminId, AdminPasswordHasher, PasswordHashError};
pub use self::admin_login_service::AdminLoginService;
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::clock_time::{ClockTime, ClockTimeError};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::menu::{
    Category, CategoryDraft, CategoryFields, CategoryId, CategoryName, CategoryValidationError,
    Dietary, ImageRef, ImageRefError, MenuItem, MenuItemDraft, MenuItemFields, MenuItemId,
    MenuItemValidationError, Price, PriceError, SpiceLevel,
};
pub use self::menu_service::MenuService;
pub use self::opening_hours::{
    DaySchedule, OpeningHours, StoredTimes, TimeRange, TimeRangeError, default_schedule,
};
pub use self::opening_hours_display::{
    DisplayLocale, DisplayLocaleError, FormattedHours, HoursStatus, format_day, format_week,
    order_for_display,
};
pub use self::opening_hours_service::OpeningHoursService;
pub use self::opening_hours_submission::{
    DaySubmission, HoursRule, HoursViolation, HoursViolations, LabelChange, NormalisedDay,
    OpeningHoursSubmission, SubmissionMode, TimeField, Window,
};
pub use self::trace_id::TraceId;
pub use self::visibility::{MenuSection, PublicMenu, effective_is_drink, is_publicly_visible};
pub use self::weekday::{DayKey, Weekday, WeekdayParseError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use menuboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such dish"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
