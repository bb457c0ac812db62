//! Derived views over the entity collections.
//!
//! Everything here is recomputed from current snapshots on each call;
//! nothing is cached or persisted. The free functions are the generic
//! transforms (next-upcoming selection, category distribution, recent-N);
//! [`DashboardService`] binds them to the collections the dashboard
//! screen shows.

use chrono::NaiveDate;
use log::debug;
use std::sync::Arc;

use crate::domain::models::{AppEvent, Lesson, Message};
use crate::storage::{
    ChildRepository, EventRepository, LessonRepository, MessageRepository, SlotConnection,
    TeacherRepository,
};

/// One (label, count) pair of a category distribution
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// Everything the dashboard screen shows, computed in one pass
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_children: usize,
    pub total_teachers: usize,
    pub total_classes: usize,
    pub next_event: Option<AppEvent>,
    pub next_lesson: Option<Lesson>,
    pub class_distribution: Vec<CategoryCount>,
    pub recent_messages: Vec<Message>,
}

/// Select the first record dated today or later, date-ascending.
/// Returns None when nothing upcoming remains.
pub fn next_upcoming<T, F>(records: &[T], date_of: F, today: NaiveDate) -> Option<&T>
where
    F: Fn(&T) -> NaiveDate,
{
    records
        .iter()
        .filter(|record| date_of(record) >= today)
        .min_by_key(|record| date_of(record))
}

/// Group records by a label field, counting per label in first-seen
/// order. An empty label is reported as "Unassigned" rather than dropped.
pub fn category_distribution<T, F>(records: &[T], label_of: F) -> Vec<CategoryCount>
where
    F: Fn(&T) -> &str,
{
    let mut distribution: Vec<CategoryCount> = Vec::new();
    for record in records {
        let raw = label_of(record);
        let label = if raw.is_empty() { "Unassigned" } else { raw };
        match distribution.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => entry.count += 1,
            None => distribution.push(CategoryCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }
    distribution
}

/// Take the first `n` records in stored order
pub fn recent_n<T: Clone>(records: &[T], n: usize) -> Vec<T> {
    records.iter().take(n).cloned().collect()
}

/// Service computing the dashboard's derived views
#[derive(Clone)]
pub struct DashboardService {
    children: ChildRepository,
    teachers: TeacherRepository,
    lessons: LessonRepository,
    events: EventRepository,
    messages: MessageRepository,
}

impl DashboardService {
    /// Create a new DashboardService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        Self {
            children: ChildRepository::new(Arc::clone(&connection)),
            teachers: TeacherRepository::new(Arc::clone(&connection)),
            lessons: LessonRepository::new(Arc::clone(&connection)),
            events: EventRepository::new(Arc::clone(&connection)),
            messages: MessageRepository::new(connection),
        }
    }

    /// The next event on or after `today`
    pub fn next_upcoming_event(&self, today: NaiveDate) -> Option<AppEvent> {
        let events = self.events.list();
        next_upcoming(&events, |event| event.date, today).cloned()
    }

    /// The next lesson on or after `today`
    pub fn next_upcoming_lesson(&self, today: NaiveDate) -> Option<Lesson> {
        let lessons = self.lessons.list();
        next_upcoming(&lessons, |lesson| lesson.date, today).cloned()
    }

    /// Children per class, in first-seen class order
    pub fn class_distribution(&self) -> Vec<CategoryCount> {
        let children = self.children.list();
        category_distribution(&children, |child| child.class.as_str())
    }

    /// The `n` most recent feed messages
    pub fn recent_messages(&self, n: usize) -> Vec<Message> {
        let messages = self.messages.list();
        recent_n(&messages, n)
    }

    /// Compute the full dashboard aggregate for `today`
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        debug!("Computing dashboard summary for {}", today);

        let class_distribution = self.class_distribution();
        DashboardSummary {
            total_children: self.children.list().len(),
            total_teachers: self.teachers.list().len(),
            total_classes: class_distribution.len(),
            next_event: self.next_upcoming_event(today),
            next_lesson: self.next_upcoming_lesson(today),
            class_distribution,
            recent_messages: self.recent_messages(3),
        }
    }
}
