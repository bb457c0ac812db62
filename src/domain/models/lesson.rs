//! Domain model for a planned lesson and its supporting materials.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::storage::EntityRecord;

/// Kind of supporting material attached to a lesson
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    #[serde(rename = "PDF")]
    Pdf,
    Video,
    Image,
    Link,
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaterialType::Pdf => "PDF",
            MaterialType::Video => "Video",
            MaterialType::Image => "Image",
            MaterialType::Link => "Link",
        };
        write!(f, "{}", label)
    }
}

/// One supporting material reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub material_type: MaterialType,
    pub url: String,
}

/// A lesson in the planner. Materials and the cover image are not part of
/// the editor form; they default empty on creation and survive edits of
/// the form fields untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    pub age_group: String,
    pub description: String,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl Lesson {
    /// Generate a unique id for a lesson
    pub fn generate_id() -> String {
        format!("lesson::{}", Uuid::new_v4())
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

impl EntityRecord for Lesson {
    const KIND: &'static str = "lesson";
    const SLOT: &'static str = "lessons";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            Lesson {
                id: "l1".to_string(),
                title: "A Criação do Mundo".to_string(),
                date: seed_date(2024, 8, 4),
                age_group: "4-6 anos".to_string(),
                description: "Gênesis 1. Ensinar sobre os 7 dias da criação.".to_string(),
                materials: vec![Material {
                    material_type: MaterialType::Video,
                    url: "https://youtube.com/watch?v=example1".to_string(),
                }],
                cover_image: None,
            },
            Lesson {
                id: "l2".to_string(),
                title: "Davi e Golias".to_string(),
                date: seed_date(2024, 8, 11),
                age_group: "7-9 anos".to_string(),
                description: "1 Samuel 17. A história de coragem e fé de Davi.".to_string(),
                materials: vec![
                    Material {
                        material_type: MaterialType::Pdf,
                        url: "#".to_string(),
                    },
                    Material {
                        material_type: MaterialType::Image,
                        url: "#".to_string(),
                    },
                ],
                cover_image: None,
            },
        ]
    }
}
