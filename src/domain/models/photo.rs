//! Domain model for a gallery photo.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::EntityRecord;

/// A photo in the gallery. `url` may be a regular link or a data URI for
/// locally uploaded images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    pub caption: String,
    pub date: NaiveDate,
}

impl Photo {
    /// Generate a unique id for a photo
    pub fn generate_id() -> String {
        format!("photo::{}", Uuid::new_v4())
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

impl EntityRecord for Photo {
    const KIND: &'static str = "photo";
    const SLOT: &'static str = "photos";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            Photo {
                id: "p1".to_string(),
                url: "https://picsum.photos/400/300?random=1".to_string(),
                caption: "Nossa turminha na aula sobre a Arca de Noé!".to_string(),
                date: seed_date(2024, 7, 21),
            },
            Photo {
                id: "p2".to_string(),
                url: "https://picsum.photos/400/300?random=2".to_string(),
                caption: "Atividade de pintura sobre a criação.".to_string(),
                date: seed_date(2024, 7, 21),
            },
            Photo {
                id: "p3".to_string(),
                url: "https://picsum.photos/400/300?random=3".to_string(),
                caption: "Momento de louvor e adoração.".to_string(),
                date: seed_date(2024, 7, 28),
            },
        ]
    }
}
