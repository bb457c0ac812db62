//! Domain model for a calendar event.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::storage::EntityRecord;

/// Kind of calendar event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    KidsService,
    Rehearsal,
    Party,
    Teaching,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EventType::KidsService => "Kids Service",
            EventType::Rehearsal => "Rehearsal",
            EventType::Party => "Party",
            EventType::Teaching => "Teaching",
        };
        write!(f, "{}", label)
    }
}

/// An event on the ministry calendar. Stored in insertion order; calendar
/// views sort by date at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppEvent {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub event_type: EventType,
    pub description: String,
}

impl AppEvent {
    /// Generate a unique id for an event
    pub fn generate_id() -> String {
        format!("event::{}", Uuid::new_v4())
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

impl EntityRecord for AppEvent {
    const KIND: &'static str = "event";
    const SLOT: &'static str = "events";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            AppEvent {
                id: "e1".to_string(),
                title: "Culto de Páscoa".to_string(),
                date: seed_date(2024, 8, 18),
                event_type: EventType::KidsService,
                description: "Celebração especial de Páscoa com teatrinho e louvores.".to_string(),
            },
            AppEvent {
                id: "e2".to_string(),
                title: "Ensaio para o Dia das Mães".to_string(),
                date: seed_date(2024, 8, 25),
                event_type: EventType::Rehearsal,
                description: "Ensaio da apresentação para o culto do Dia das Mães.".to_string(),
            },
        ]
    }
}
