//! Domain model for a child enrolled in the ministry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::EntityRecord;

/// A child on the roster. `present` is the transient attendance mark for
/// the current roll call; it is reset in bulk, never edited through the
/// record editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub class: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub notes: String,
    #[serde(default)]
    pub present: bool,
}

impl Child {
    /// Generate a unique id for a child
    pub fn generate_id() -> String {
        format!("child::{}", Uuid::new_v4())
    }
}

impl EntityRecord for Child {
    const KIND: &'static str = "child";
    const SLOT: &'static str = "children";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed() -> Vec<Self> {
        vec![
            Child {
                id: "c1".to_string(),
                name: "Lucas Silva".to_string(),
                age: 5,
                class: "Sementinhas".to_string(),
                guardian_name: "Ana Silva".to_string(),
                guardian_contact: "(11) 98765-4321".to_string(),
                notes: "Muito participativo nas aulas.".to_string(),
                present: false,
            },
            Child {
                id: "c2".to_string(),
                name: "Sofia Oliveira".to_string(),
                age: 7,
                class: "Discípulos Mirins".to_string(),
                guardian_name: "Marcos Oliveira".to_string(),
                guardian_contact: "(11) 91234-5678".to_string(),
                notes: "Adora cantar nos louvores.".to_string(),
                present: false,
            },
            Child {
                id: "c3".to_string(),
                name: "Davi Costa".to_string(),
                age: 6,
                class: "Sementinhas".to_string(),
                guardian_name: "Carla Costa".to_string(),
                guardian_contact: "(11) 95555-1234".to_string(),
                notes: "Precisa de incentivo para interagir.".to_string(),
                present: false,
            },
        ]
    }
}
