//! One-shot startup initialisation of the catalog store.
//!
//! Runs before the HTTP server accepts requests. Every step only fills gaps,
//! so running it against an initialised store changes nothing.

use std::collections::BTreeMap;

use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AdminAccountRepository, AdminAccountRepositoryError, CategoryRepository,
    CategoryRepositoryError, OpeningHoursRepository, OpeningHoursRepositoryError,
};
use crate::domain::{
    AdminPasswordHasher, CategoryFields, CategoryName, CategoryValidationError, DayKey,
    OpeningHours, PasswordHashError, Weekday, default_schedule,
};

/// Password used for the first admin in debug builds when none is configured.
pub const DEV_ADMIN_PASSWORD: &str = "password";

/// Category set of a freshly installed site: `(slug, display name, drinks)`.
const DEFAULT_CATEGORIES: [(&str, &str, bool); 12] = [
    ("starters", "Vorspeisen", false),
    ("soups", "Suppen", false),
    ("salads", "Salate", false),
    ("lunch", "Mittagsangebot", false),
    ("fish", "Fischgerichte", false),
    ("vegetarian", "Vegetarische Gerichte", false),
    ("steaks", "Steak vom Grill", false),
    ("desserts", "Desserts", false),
    ("softdrinks", "Alkoholfreie Getränke", true),
    ("beer", "Biere", true),
    ("wine", "Weine", true),
    ("spirits", "Spirituosen", true),
];

/// Inputs for [`initialise`].
#[derive(Clone)]
pub struct BootstrapOptions {
    pub admin_username: String,
    pub admin_password: Option<Zeroizing<String>>,
    /// Fall back to [`DEV_ADMIN_PASSWORD`] when no password is configured.
    pub allow_dev_password: bool,
    pub seed_categories: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_owned(),
            admin_password: None,
            allow_dev_password: cfg!(debug_assertions),
            seed_categories: true,
        }
    }
}

/// What [`initialise`] changed or found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Weekdays that had no row and received the default schedule.
    pub hours_inserted: usize,
    /// Username of the admin created, if any.
    pub admin_created: Option<String>,
    /// Number of default categories inserted.
    pub categories_seeded: usize,
    /// Weekdays stored more than once.
    pub duplicate_days: Vec<Weekday>,
    /// Stored day identifiers that are not weekdays.
    pub unrecognised_days: Vec<String>,
}

/// Failures that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    #[error(transparent)]
    OpeningHours(#[from] OpeningHoursRepositoryError),
    #[error(transparent)]
    AdminAccount(#[from] AdminAccountRepositoryError),
    #[error(transparent)]
    Category(#[from] CategoryRepositoryError),
    #[error("no admin account exists and no admin password is configured")]
    MissingAdminPassword,
    #[error("admin username must not be empty")]
    EmptyAdminUsername,
    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),
    #[error("default category is invalid: {0}")]
    InvalidDefaultCategory(CategoryValidationError),
}

/// Bring the store to a usable state.
///
/// 1. One opening hours row per weekday; missing days get
///    [`default_schedule`]. Duplicate and unrecognised rows are reported.
/// 2. At least one admin account.
/// 3. The default categories, when the store has none and seeding is on.
pub async fn initialise<H, A, C>(
    hours: &H,
    admins: &A,
    categories: &C,
    hasher: &AdminPasswordHasher,
    options: &BootstrapOptions,
) -> Result<BootstrapReport, BootstrapError>
where
    H: OpeningHoursRepository + ?Sized,
    A: AdminAccountRepository + ?Sized,
    C: CategoryRepository + ?Sized,
{
    let mut report = BootstrapReport::default();
    ensure_opening_hours(hours, &mut report).await?;
    report.admin_created = ensure_admin(admins, hasher, options).await?;
    if options.seed_categories {
        report.categories_seeded = seed_categories(categories).await?;
    }
    info!(
        hours_inserted = report.hours_inserted,
        admin_created = report.admin_created.is_some(),
        categories_seeded = report.categories_seeded,
        "store initialised"
    );
    Ok(report)
}

async fn ensure_opening_hours<H>(
    hours: &H,
    report: &mut BootstrapReport,
) -> Result<(), BootstrapError>
where
    H: OpeningHoursRepository + ?Sized,
{
    let defaults: Vec<OpeningHours> = Weekday::ALL
        .into_iter()
        .map(|day| OpeningHours::new(day, None, default_schedule(day)))
        .collect();
    report.hours_inserted = hours.insert_missing(&defaults).await?;
    if report.hours_inserted > 0 {
        warn!(
            inserted = report.hours_inserted,
            "opening hours rows were missing; defaults inserted"
        );
    }

    let mut seen: BTreeMap<Weekday, usize> = BTreeMap::new();
    for record in hours.list_all().await? {
        match record.day() {
            DayKey::Known(day) => *seen.entry(*day).or_default() += 1,
            DayKey::Unrecognised(raw) => {
                warn!(day = %raw, "opening hours row has an unrecognised day");
                report.unrecognised_days.push(raw.clone());
            }
        }
    }
    report.duplicate_days = seen
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(day, _)| day)
        .collect();
    for day in &report.duplicate_days {
        warn!(day = %day, "opening hours stored more than once");
    }
    Ok(())
}

async fn ensure_admin<A>(
    admins: &A,
    hasher: &AdminPasswordHasher,
    options: &BootstrapOptions,
) -> Result<Option<String>, BootstrapError>
where
    A: AdminAccountRepository + ?Sized,
{
    if admins.count().await? > 0 {
        return Ok(None);
    }
    let username = options.admin_username.trim();
    if username.is_empty() {
        return Err(BootstrapError::EmptyAdminUsername);
    }
    let password = match (&options.admin_password, options.allow_dev_password) {
        (Some(password), _) if !password.is_empty() => password.as_str(),
        (_, true) => {
            warn!(username, "no admin password configured; using the development default");
            DEV_ADMIN_PASSWORD
        }
        (_, false) => return Err(BootstrapError::MissingAdminPassword),
    };
    let hash = hasher.hash(password)?;
    let account = admins.create(username, &hash).await?;
    info!(admin_id = %account.id, username = %account.username, "initial admin created");
    Ok(Some(account.username))
}

async fn seed_categories<C>(categories: &C) -> Result<usize, BootstrapError>
where
    C: CategoryRepository + ?Sized,
{
    if categories.count().await? > 0 {
        return Ok(0);
    }
    let mut seeded = 0;
    for (position, (slug, display_name, is_drink)) in (1_i32..).zip(DEFAULT_CATEGORIES) {
        let fields = CategoryFields {
            name: CategoryName::new(slug).map_err(BootstrapError::InvalidDefaultCategory)?,
            display_name: display_name.to_owned(),
            description: None,
            display_order: position * 10,
            is_drink_category: is_drink,
            active: true,
            image: None,
        };
        categories.create(&fields).await?;
        seeded += 1;
    }
    info!(count = seeded, "default categories seeded");
    Ok(seeded)
}
