//! # Domain Module
//!
//! Contains all business logic for the ministry tracker.
//!
//! This module encapsulates the entity kinds, the services that manage
//! them, and the derived views computed over them. It operates
//! independently of any UI and talks to persistence only through the
//! storage repositories.
//!
//! ## Module Organization
//!
//! - **models**: The six entity kinds, their closed category enums, the
//!   lesson draft buffer and the per-kind seed data
//! - **commands**: Command and query structs the services consume
//! - **children_service / teachers_service**: Rosters with attendance
//!   toggles and bulk attendance reset
//! - **lessons_service**: Lesson planner, attached materials and the
//!   unsaved-draft buffer
//! - **events_service**: The event calendar
//! - **messages_service / gallery_service**: Newest-first feeds
//! - **dashboard_service**: Derived views (next upcoming, category
//!   distribution, recent-N) and the dashboard aggregate
//! - **reports_service**: Fixed-filename CSV exports
//! - **assistant_service**: The external generative text/image boundary
//! - **session_service**: Signed-in flag and profile picture
//!
//! ## Business Rules
//!
//! - Records are created with a fresh unique id and entity defaults;
//!   updates merge only the fields the command provides
//! - Deletion always requires explicit confirmation and is idempotent
//!   once confirmed
//! - List filters AND a case-insensitive name search with an exact
//!   category match
//! - Every mutation persists exactly once, as its final step

pub mod assistant_service;
pub mod children_service;
pub mod commands;
pub mod dashboard_service;
pub mod error;
pub mod events_service;
pub mod gallery_service;
pub mod lessons_service;
pub mod messages_service;
pub mod models;
pub mod reports_service;
pub mod session_service;
pub mod teachers_service;

pub use assistant_service::{
    AssistantOutcome, AssistantService, CreativeAssistant, ThemeQuery,
};
pub use children_service::ChildrenService;
pub use dashboard_service::{CategoryCount, DashboardService, DashboardSummary};
pub use error::DomainError;
pub use events_service::EventsService;
pub use gallery_service::GalleryService;
pub use lessons_service::LessonsService;
pub use messages_service::MessagesService;
pub use reports_service::{Report, ReportsService};
pub use session_service::SessionService;
pub use teachers_service::TeachersService;
