//! Domain model for a message on the communication feed.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::storage::EntityRecord;

/// Audience/category of a feed message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    ParentNotice,
    Teachers,
    PrayerRequest,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MessageType::ParentNotice => "Parent Notice",
            MessageType::Teachers => "Teachers",
            MessageType::PrayerRequest => "Prayer Request",
        };
        write!(f, "{}", label)
    }
}

/// A message on the feed. The timestamp is stamped at creation and never
/// edited afterwards; the feed stores newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub message_type: MessageType,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Generate a unique id for a message
    pub fn generate_id() -> String {
        format!("message::{}", Uuid::new_v4())
    }
}

fn seed_timestamp(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid seed timestamp")
}

impl EntityRecord for Message {
    const KIND: &'static str = "message";
    const SLOT: &'static str = "messages";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            Message {
                id: "m1".to_string(),
                message_type: MessageType::ParentNotice,
                content: "Lembrete: Próximo domingo teremos nossa gincana bíblica! Tragam as \
                          crianças com roupas confortáveis."
                    .to_string(),
                author: "Coordenação".to_string(),
                timestamp: seed_timestamp(2024, 7, 29, 10, 0),
            },
            Message {
                id: "m2".to_string(),
                message_type: MessageType::Teachers,
                content: "Reunião de planejamento na próxima quarta-feira às 19h para definirmos \
                          as aulas de setembro."
                    .to_string(),
                author: "Tia Carol".to_string(),
                timestamp: seed_timestamp(2024, 7, 28, 15, 30),
            },
            Message {
                id: "m3".to_string(),
                message_type: MessageType::PrayerRequest,
                content: "Oração pela família do pequeno João, que está passando por um momento \
                          difícil."
                    .to_string(),
                author: "Tio Pedro".to_string(),
                timestamp: seed_timestamp(2024, 7, 29, 9, 0),
            },
        ]
    }
}
