//! Domain models: the six entity kinds plus the lesson draft buffer.

pub mod child;
pub mod draft;
pub mod event;
pub mod lesson;
pub mod message;
pub mod photo;
pub mod teacher;

pub use child::Child;
pub use draft::LessonDraft;
pub use event::{AppEvent, EventType};
pub use lesson::{Lesson, Material, MaterialType};
pub use message::{Message, MessageType};
pub use photo::Photo;
pub use teacher::{Teacher, TeacherRole};
