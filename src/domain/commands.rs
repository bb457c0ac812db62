//! Domain-level command and query types
//!
//! These structs are the inputs and outputs of the domain services. List
//! queries combine a case-insensitive substring search on the kind's name
//! field with an exact match on its category field; both are optional and
//! ANDed when present. Delete commands carry an explicit `confirmed` flag:
//! a destructive action without it is refused by the service.

pub mod children {
    /// Query parameters for listing children.
    #[derive(Debug, Clone, Default)]
    pub struct ChildListQuery {
        pub search: Option<String>,
        pub class: Option<String>,
    }

    /// Input for enrolling a new child.
    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub name: String,
        pub age: u8,
        pub class: String,
        pub guardian_name: String,
        pub guardian_contact: String,
        pub notes: String,
    }

    /// Input for updating a child. `None` fields are left unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateChildCommand {
        pub child_id: String,
        pub name: Option<String>,
        pub age: Option<u8>,
        pub class: Option<String>,
        pub guardian_name: Option<String>,
        pub guardian_contact: Option<String>,
        pub notes: Option<String>,
    }

    /// Command for removing a child from the roster.
    #[derive(Debug, Clone)]
    pub struct DeleteChildCommand {
        pub child_id: String,
        pub confirmed: bool,
    }

    /// Result of deleting a child.
    #[derive(Debug, Clone)]
    pub struct DeleteChildResult {
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod teachers {
    use crate::domain::models::TeacherRole;

    /// Query parameters for listing teachers.
    #[derive(Debug, Clone, Default)]
    pub struct TeacherListQuery {
        pub search: Option<String>,
        pub role: Option<TeacherRole>,
    }

    /// Input for adding a teacher to the team.
    #[derive(Debug, Clone)]
    pub struct CreateTeacherCommand {
        pub name: String,
        pub role: TeacherRole,
        pub assigned_class: String,
        pub contact: String,
    }

    /// Input for updating a teacher. `None` fields are left unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateTeacherCommand {
        pub teacher_id: String,
        pub name: Option<String>,
        pub role: Option<TeacherRole>,
        pub assigned_class: Option<String>,
        pub contact: Option<String>,
    }

    /// Command for removing a teacher.
    #[derive(Debug, Clone)]
    pub struct DeleteTeacherCommand {
        pub teacher_id: String,
        pub confirmed: bool,
    }

    /// Result of deleting a teacher.
    #[derive(Debug, Clone)]
    pub struct DeleteTeacherResult {
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod lessons {
    use crate::domain::models::Material;

    /// Query parameters for listing lessons.
    #[derive(Debug, Clone, Default)]
    pub struct LessonListQuery {
        pub search: Option<String>,
        pub age_group: Option<String>,
    }

    /// Input for planning a new lesson. Materials start empty and are
    /// managed separately from the editor form.
    #[derive(Debug, Clone)]
    pub struct CreateLessonCommand {
        pub title: String,
        pub date: String,
        pub age_group: String,
        pub description: String,
        pub cover_image: Option<String>,
    }

    /// Input for updating a lesson's form fields. `None` fields are left
    /// unchanged; materials and the cover image are never touched here.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateLessonCommand {
        pub lesson_id: String,
        pub title: Option<String>,
        pub date: Option<String>,
        pub age_group: Option<String>,
        pub description: Option<String>,
    }

    /// Command for replacing a lesson's attached materials.
    #[derive(Debug, Clone)]
    pub struct SetMaterialsCommand {
        pub lesson_id: String,
        pub materials: Vec<Material>,
    }

    /// Command for setting or clearing a lesson's cover image.
    #[derive(Debug, Clone)]
    pub struct SetCoverImageCommand {
        pub lesson_id: String,
        pub cover_image: Option<String>,
    }

    /// Command for removing a lesson.
    #[derive(Debug, Clone)]
    pub struct DeleteLessonCommand {
        pub lesson_id: String,
        pub confirmed: bool,
    }

    /// Result of deleting a lesson.
    #[derive(Debug, Clone)]
    pub struct DeleteLessonResult {
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod events {
    use crate::domain::models::EventType;

    /// Query parameters for listing calendar events.
    #[derive(Debug, Clone, Default)]
    pub struct EventListQuery {
        pub search: Option<String>,
        pub event_type: Option<EventType>,
    }

    /// Input for scheduling a new event.
    #[derive(Debug, Clone)]
    pub struct CreateEventCommand {
        pub title: String,
        pub date: String,
        pub event_type: EventType,
        pub description: String,
    }

    /// Input for updating an event. `None` fields are left unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateEventCommand {
        pub event_id: String,
        pub title: Option<String>,
        pub date: Option<String>,
        pub event_type: Option<EventType>,
        pub description: Option<String>,
    }

    /// Command for removing an event.
    #[derive(Debug, Clone)]
    pub struct DeleteEventCommand {
        pub event_id: String,
        pub confirmed: bool,
    }

    /// Result of deleting an event.
    #[derive(Debug, Clone)]
    pub struct DeleteEventResult {
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod messages {
    use crate::domain::models::MessageType;

    /// Query parameters for listing feed messages.
    #[derive(Debug, Clone, Default)]
    pub struct MessageListQuery {
        pub search: Option<String>,
        pub message_type: Option<MessageType>,
    }

    /// Input for posting a message. The timestamp is stamped by the
    /// service at creation time.
    #[derive(Debug, Clone)]
    pub struct CreateMessageCommand {
        pub message_type: MessageType,
        pub content: String,
        pub author: String,
    }

    /// Command for removing a message from the feed.
    #[derive(Debug, Clone)]
    pub struct DeleteMessageCommand {
        pub message_id: String,
        pub confirmed: bool,
    }

    /// Result of deleting a message.
    #[derive(Debug, Clone)]
    pub struct DeleteMessageResult {
        pub deleted: bool,
        pub success_message: String,
    }
}

pub mod gallery {
    /// Input for adding a photo. The url may be a regular link or a data
    /// URI for an uploaded image.
    #[derive(Debug, Clone)]
    pub struct CreatePhotoCommand {
        pub url: String,
        pub caption: String,
        pub date: String,
    }

    /// Command for removing a photo.
    #[derive(Debug, Clone)]
    pub struct DeletePhotoCommand {
        pub photo_id: String,
        pub confirmed: bool,
    }

    /// Result of deleting a photo.
    #[derive(Debug, Clone)]
    pub struct DeletePhotoResult {
        pub deleted: bool,
        pub success_message: String,
    }
}
