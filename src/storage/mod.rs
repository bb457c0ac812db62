//! # Storage Module
//!
//! Handles all data persistence for the ministry tracker.
//!
//! Persistence is a set of named slots inside one per-installation data
//! directory: each slot is a single JSON file holding a full serialized
//! snapshot of one in-memory value. Entity collections get one slot each;
//! a handful of scalar values (auth flag, profile picture, lesson draft,
//! theme search history) get their own slots beside them.
//!
//! ## Key Responsibilities
//!
//! - **Slot management**: resolving, reading and atomically overwriting
//!   slot files under the base directory
//! - **Fail-soft reads**: an absent or malformed slot yields the caller's
//!   default (the entity seed for collections), never an error
//! - **Entity collections**: one generic ordered-record store,
//!   instantiated per entity kind
//!
//! ## Design Principles
//!
//! - **Repository pattern**: the domain layer talks to repositories, not
//!   files
//! - **Whole-value writes**: every save is a full overwrite of its slot;
//!   there is no incremental write
//! - **Explicit commit**: each mutation ends in exactly one slot write

pub mod collection;
pub mod connection;

pub use collection::{CollectionRepository, EntityRecord};
pub use connection::SlotConnection;

use crate::domain::models::{AppEvent, Child, Lesson, Message, Photo, Teacher};

pub type ChildRepository = CollectionRepository<Child>;
pub type TeacherRepository = CollectionRepository<Teacher>;
pub type LessonRepository = CollectionRepository<Lesson>;
pub type PhotoRepository = CollectionRepository<Photo>;
pub type MessageRepository = CollectionRepository<Message>;
pub type EventRepository = CollectionRepository<AppEvent>;
