//! # Ministry Tracker
//!
//! Administrative backend for a children's ministry program: rosters
//! with attendance marks, a lesson planner, an event calendar, a
//! messaging feed, a photo gallery and CSV-exportable reports, all
//! persisted as JSON slot snapshots in one per-installation data
//! directory. A creative-assistant boundary drafts lesson plans and
//! coloring-sheet images through an injected external provider.
//!
//! The core pattern is the entity store: one generic persistent
//! collection ([`storage::CollectionRepository`]) instantiated for six
//! entity kinds, with per-kind services layering validation, merge
//! updates, confirmed deletion and derived views on top. [`MinistryApp`]
//! is the composition point that wires everything over one shared
//! connection.

pub mod app;
pub mod domain;
pub mod storage;

pub use app::MinistryApp;
