//! Restaurant menu board back end.
//!
//! Serves the public menu and opening hours, and an admin interface behind a
//! cookie session for editing categories, menu items and hours. The crate is
//! laid out as ports and adapters: `domain` holds the rules and port traits,
//! `inbound` the HTTP adapter, and `outbound` the PostgreSQL, in-memory and
//! filesystem adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
