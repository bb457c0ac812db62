use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::lessons::{
    CreateLessonCommand, DeleteLessonCommand, DeleteLessonResult, LessonListQuery,
    SetCoverImageCommand, SetMaterialsCommand, UpdateLessonCommand,
};
use crate::domain::error::DomainError;
use crate::domain::models::{Lesson, LessonDraft};
use crate::storage::{LessonRepository, SlotConnection};

const DRAFT_SLOT: &str = "lesson_draft";

/// Service for the lesson planner: the lessons collection, its attached
/// materials, and the single unsaved-draft buffer the editor keeps.
#[derive(Clone)]
pub struct LessonsService {
    connection: Arc<SlotConnection>,
    repository: LessonRepository,
}

impl LessonsService {
    /// Create a new LessonsService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        let repository = LessonRepository::new(Arc::clone(&connection));
        Self {
            connection,
            repository,
        }
    }

    /// List lessons sorted by date ascending, optionally narrowed by a
    /// case-insensitive title search and an exact age-group match
    pub fn list(&self, query: LessonListQuery) -> Vec<Lesson> {
        let search = query.search.as_deref().map(str::to_lowercase);

        let mut lessons: Vec<_> = self
            .repository
            .list()
            .into_iter()
            .filter(|lesson| {
                search
                    .as_deref()
                    .map(|term| lesson.title.to_lowercase().contains(term))
                    .unwrap_or(true)
                    && query
                        .age_group
                        .as_deref()
                        .map(|age_group| lesson.age_group == age_group)
                        .unwrap_or(true)
            })
            .collect();

        lessons.sort_by_key(|lesson| lesson.date);

        debug!("Listed {} lessons", lessons.len());
        lessons
    }

    /// Get a lesson by id
    pub fn get(&self, lesson_id: &str) -> Option<Lesson> {
        self.repository.get(lesson_id)
    }

    /// Plan a new lesson. Materials start empty; a successful creation
    /// discards any pending draft.
    pub fn create(&self, command: CreateLessonCommand) -> Result<Lesson> {
        info!("Creating lesson: title={}, date={}", command.title, command.date);

        self.validate_title(&command.title)?;
        let date = parse_lesson_date(&command.date)
            .context("Invalid date format in create_lesson command")?;

        let lesson = Lesson {
            id: Lesson::generate_id(),
            title: command.title.trim().to_string(),
            date,
            age_group: command.age_group.trim().to_string(),
            description: command.description.trim().to_string(),
            materials: Vec::new(),
            cover_image: command.cover_image,
        };

        self.repository.append(&lesson);
        self.discard_draft();

        info!("Created lesson: {} with ID: {}", lesson.title, lesson.id);
        Ok(lesson)
    }

    /// Update a lesson's form fields. Fields the command leaves `None`
    /// keep their current value; materials and the cover image are
    /// preserved untouched.
    pub fn update(&self, command: UpdateLessonCommand) -> Result<Lesson> {
        info!("Updating lesson: {}", command.lesson_id);

        if let Some(ref title) = command.title {
            self.validate_title(title)?;
        }
        let date = match command.date.as_deref() {
            Some(raw) => Some(
                parse_lesson_date(raw).context("Invalid date format in update_lesson command")?,
            ),
            None => None,
        };

        let lesson = self.repository.modify(&command.lesson_id, |lesson| {
            if let Some(title) = &command.title {
                lesson.title = title.trim().to_string();
            }
            if let Some(date) = date {
                lesson.date = date;
            }
            if let Some(age_group) = &command.age_group {
                lesson.age_group = age_group.trim().to_string();
            }
            if let Some(description) = &command.description {
                lesson.description = description.trim().to_string();
            }
        })?;

        info!("Updated lesson: {} with ID: {}", lesson.title, lesson.id);
        Ok(lesson)
    }

    /// Replace the materials attached to a lesson
    pub fn set_materials(&self, command: SetMaterialsCommand) -> Result<Lesson> {
        debug!(
            "Setting {} materials on lesson {}",
            command.materials.len(),
            command.lesson_id
        );

        let lesson = self.repository.modify(&command.lesson_id, |lesson| {
            lesson.materials = command.materials.clone();
        })?;
        Ok(lesson)
    }

    /// Set or clear a lesson's cover image
    pub fn set_cover_image(&self, command: SetCoverImageCommand) -> Result<Lesson> {
        let lesson = self.repository.modify(&command.lesson_id, |lesson| {
            lesson.cover_image = command.cover_image.clone();
        })?;
        Ok(lesson)
    }

    /// Remove a lesson. Refused without confirmation; removing an
    /// already-absent id is a no-op once confirmed.
    pub fn delete(&self, command: DeleteLessonCommand) -> Result<DeleteLessonResult> {
        info!("Deleting lesson: {}", command.lesson_id);

        if !command.confirmed {
            warn!("Refused unconfirmed deletion of lesson {}", command.lesson_id);
            return Err(DomainError::ConfirmationRequired.into());
        }

        let deleted = self.repository.remove(&command.lesson_id);

        Ok(DeleteLessonResult {
            deleted,
            success_message: if deleted {
                "Lesson removed from the planner".to_string()
            } else {
                "Lesson was already removed".to_string()
            },
        })
    }

    /// Save the editor's unsaved form state. An empty draft is treated as
    /// a discard.
    pub fn save_draft(&self, draft: LessonDraft) {
        if draft.is_empty() {
            self.discard_draft();
            return;
        }
        debug!("Saving lesson draft: title={}", draft.title);
        self.connection.save_slot(DRAFT_SLOT, &draft);
    }

    /// Load the pending draft, if one exists
    pub fn load_draft(&self) -> Option<LessonDraft> {
        self.connection.load_slot(DRAFT_SLOT, None)
    }

    /// Discard the pending draft. No-op when there is none.
    pub fn discard_draft(&self) {
        self.connection.clear_slot(DRAFT_SLOT);
    }

    /// Distinct age groups in planner order, for filter dropdowns
    pub fn distinct_age_groups(&self) -> Vec<String> {
        let mut age_groups: Vec<String> = Vec::new();
        for lesson in self.repository.list() {
            if !lesson.age_group.is_empty() && !age_groups.contains(&lesson.age_group) {
                age_groups.push(lesson.age_group);
            }
        }
        age_groups
    }

    fn validate_title(&self, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(anyhow::anyhow!("Lesson title cannot be empty"));
        }
        if title.len() > 200 {
            return Err(anyhow::anyhow!("Lesson title cannot exceed 200 characters"));
        }
        Ok(())
    }
}

fn parse_lesson_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}. Use YYYY-MM-DD.", raw, e))
}
