//! Domain model for a teacher on the ministry team.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::storage::EntityRecord;

/// Role a teacher fills within the team
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeacherRole {
    Leader,
    Assistant,
    Volunteer,
}

impl fmt::Display for TeacherRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TeacherRole::Leader => "Leader",
            TeacherRole::Assistant => "Assistant",
            TeacherRole::Volunteer => "Volunteer",
        };
        write!(f, "{}", label)
    }
}

/// A teacher on the roster, with the same transient `present` attendance
/// mark children carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub role: TeacherRole,
    pub assigned_class: String,
    pub contact: String,
    #[serde(default)]
    pub present: bool,
}

impl Teacher {
    /// Generate a unique id for a teacher
    pub fn generate_id() -> String {
        format!("teacher::{}", Uuid::new_v4())
    }
}

impl EntityRecord for Teacher {
    const KIND: &'static str = "teacher";
    const SLOT: &'static str = "teachers";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            Teacher {
                id: "t1".to_string(),
                name: "Tia Carol".to_string(),
                role: TeacherRole::Leader,
                assigned_class: "Sementinhas".to_string(),
                contact: "(11) 99999-8888".to_string(),
                present: false,
            },
            Teacher {
                id: "t2".to_string(),
                name: "Tio Pedro".to_string(),
                role: TeacherRole::Assistant,
                assigned_class: "Discípulos Mirins".to_string(),
                contact: "(11) 97777-6666".to_string(),
                present: false,
            },
            Teacher {
                id: "t3".to_string(),
                name: "Irmã Maria".to_string(),
                role: TeacherRole::Volunteer,
                assigned_class: "Todas".to_string(),
                contact: "(11) 96666-5555".to_string(),
                present: false,
            },
        ]
    }
}
