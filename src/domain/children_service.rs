use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::children::{
    ChildListQuery, CreateChildCommand, DeleteChildCommand, DeleteChildResult, UpdateChildCommand,
};
use crate::domain::error::DomainError;
use crate::domain::models::Child;
use crate::storage::{ChildRepository, SlotConnection};

/// Service for managing the children roster and its attendance marks
#[derive(Clone)]
pub struct ChildrenService {
    repository: ChildRepository,
}

impl ChildrenService {
    /// Create a new ChildrenService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        let repository = ChildRepository::new(connection);
        Self { repository }
    }

    /// List children, optionally narrowed by a case-insensitive name search
    /// and an exact class match (ANDed when both are present)
    pub fn list(&self, query: ChildListQuery) -> Vec<Child> {
        let search = query.search.as_deref().map(str::to_lowercase);

        let children: Vec<_> = self
            .repository
            .list()
            .into_iter()
            .filter(|child| {
                search
                    .as_deref()
                    .map(|term| child.name.to_lowercase().contains(term))
                    .unwrap_or(true)
                    && query
                        .class
                        .as_deref()
                        .map(|class| child.class == class)
                        .unwrap_or(true)
            })
            .collect();

        debug!("Listed {} children", children.len());
        children
    }

    /// Get a child by id
    pub fn get(&self, child_id: &str) -> Option<Child> {
        self.repository.get(child_id)
    }

    /// Enroll a new child
    pub fn create(&self, command: CreateChildCommand) -> Result<Child> {
        info!("Creating child: name={}", command.name);

        self.validate_name(&command.name)?;

        let child = Child {
            id: Child::generate_id(),
            name: command.name.trim().to_string(),
            age: command.age,
            class: command.class.trim().to_string(),
            guardian_name: command.guardian_name.trim().to_string(),
            guardian_contact: command.guardian_contact.trim().to_string(),
            notes: command.notes.trim().to_string(),
            present: false,
        };

        self.repository.append(&child);

        info!("Created child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Update an existing child. Fields the command leaves `None` keep
    /// their current value; the `present` flag is never touched here.
    pub fn update(&self, command: UpdateChildCommand) -> Result<Child> {
        info!("Updating child: {}", command.child_id);

        if let Some(ref name) = command.name {
            self.validate_name(name)?;
        }

        let child = self.repository.modify(&command.child_id, |child| {
            if let Some(name) = &command.name {
                child.name = name.trim().to_string();
            }
            if let Some(age) = command.age {
                child.age = age;
            }
            if let Some(class) = &command.class {
                child.class = class.trim().to_string();
            }
            if let Some(guardian_name) = &command.guardian_name {
                child.guardian_name = guardian_name.trim().to_string();
            }
            if let Some(guardian_contact) = &command.guardian_contact {
                child.guardian_contact = guardian_contact.trim().to_string();
            }
            if let Some(notes) = &command.notes {
                child.notes = notes.trim().to_string();
            }
        })?;

        info!("Updated child: {} with ID: {}", child.name, child.id);
        Ok(child)
    }

    /// Remove a child from the roster. Refused without confirmation;
    /// removing an already-absent id is a no-op once confirmed.
    pub fn delete(&self, command: DeleteChildCommand) -> Result<DeleteChildResult> {
        info!("Deleting child: {}", command.child_id);

        if !command.confirmed {
            warn!("Refused unconfirmed deletion of child {}", command.child_id);
            return Err(DomainError::ConfirmationRequired.into());
        }

        let deleted = self.repository.remove(&command.child_id);

        Ok(DeleteChildResult {
            deleted,
            success_message: if deleted {
                "Child removed from the roster".to_string()
            } else {
                "Child was already removed".to_string()
            },
        })
    }

    /// Flip the attendance mark of one child
    pub fn toggle_present(&self, child_id: &str) -> Result<Child> {
        let child = self
            .repository
            .modify(child_id, |child| child.present = !child.present)?;

        debug!(
            "Child {} marked {}",
            child.name,
            if child.present { "present" } else { "absent" }
        );
        Ok(child)
    }

    /// Clear the attendance mark of every child in one persisted write.
    /// Returns the number of records touched.
    pub fn reset_attendance(&self) -> usize {
        let count = self.repository.modify_all(|child| child.present = false);
        info!("Cleared attendance for {} children", count);
        count
    }

    /// Distinct class names in roster order, for filter dropdowns.
    /// Unassigned (empty) classes are skipped.
    pub fn distinct_classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        for child in self.repository.list() {
            if !child.class.is_empty() && !classes.contains(&child.class) {
                classes.push(child.class);
            }
        }
        classes
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Child name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Child name cannot exceed 100 characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test() -> (ChildrenService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = SlotConnection::new(temp_dir.path()).unwrap();
        (ChildrenService::new(Arc::new(connection)), temp_dir)
    }

    fn create_command(name: &str, class: &str) -> CreateChildCommand {
        CreateChildCommand {
            name: name.to_string(),
            age: 6,
            class: class.to_string(),
            guardian_name: "Guardian".to_string(),
            guardian_contact: "(11) 90000-0000".to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_create_child_appends_to_roster() {
        let (service, _temp_dir) = setup_test();
        let before = service.list(ChildListQuery::default()).len();

        let child = service.create(create_command("  Test Child ", "Sementinhas")).unwrap();
        assert_eq!(child.name, "Test Child");
        assert!(!child.present);

        let children = service.list(ChildListQuery::default());
        assert_eq!(children.len(), before + 1);
        assert_eq!(children.last().unwrap().id, child.id);
    }

    #[test]
    fn test_create_child_ids_are_unique() {
        let (service, _temp_dir) = setup_test();
        let first = service.create(create_command("Ana", "A")).unwrap();
        let second = service.create(create_command("Ana", "A")).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_create_child_validation() {
        let (service, _temp_dir) = setup_test();

        assert!(service.create(create_command(" ", "A")).is_err());
        assert!(service.create(create_command(&"a".repeat(101), "A")).is_err());
    }

    #[test]
    fn test_update_merges_only_provided_fields() {
        let (service, _temp_dir) = setup_test();
        let child = service.create(create_command("Original", "Sementinhas")).unwrap();

        let updated = service
            .update(UpdateChildCommand {
                child_id: child.id.clone(),
                name: Some("Renamed".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.age, child.age);
        assert_eq!(updated.class, child.class);
        assert_eq!(updated.guardian_name, child.guardian_name);
    }

    #[test]
    fn test_update_missing_child_is_not_found() {
        let (service, _temp_dir) = setup_test();
        let result = service.update(UpdateChildCommand {
            child_id: "ghost".to_string(),
            name: Some("Nobody".to_string()),
            ..Default::default()
        });

        let error = result.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (service, _temp_dir) = setup_test();
        let child = service.create(create_command("Keep Me", "A")).unwrap();

        let refused = service.delete(DeleteChildCommand {
            child_id: child.id.clone(),
            confirmed: false,
        });
        assert!(matches!(
            refused.unwrap_err().downcast_ref::<DomainError>(),
            Some(DomainError::ConfirmationRequired)
        ));
        assert!(service.get(&child.id).is_some());
    }

    #[test]
    fn test_confirmed_delete_is_idempotent() {
        let (service, _temp_dir) = setup_test();
        let child = service.create(create_command("Leaving", "A")).unwrap();

        let first = service
            .delete(DeleteChildCommand {
                child_id: child.id.clone(),
                confirmed: true,
            })
            .unwrap();
        assert!(first.deleted);
        assert!(service.get(&child.id).is_none());

        let second = service
            .delete(DeleteChildCommand {
                child_id: child.id,
                confirmed: true,
            })
            .unwrap();
        assert!(!second.deleted);
    }

    #[test]
    fn test_toggle_present_is_an_involution() {
        let (service, _temp_dir) = setup_test();
        let child = service.create(create_command("Flipper", "A")).unwrap();

        let marked = service.toggle_present(&child.id).unwrap();
        assert!(marked.present);

        let unmarked = service.toggle_present(&child.id).unwrap();
        assert_eq!(unmarked.present, child.present);
    }

    #[test]
    fn test_reset_attendance_clears_every_mark() {
        let (service, _temp_dir) = setup_test();
        let a = service.create(create_command("A", "X")).unwrap();
        service.create(create_command("B", "Y")).unwrap();
        service.toggle_present(&a.id).unwrap();

        let count = service.reset_attendance();
        let children = service.list(ChildListQuery::default());
        assert_eq!(count, children.len());
        assert!(children.iter().all(|c| !c.present));
    }

    #[test]
    fn test_list_filters_are_anded() {
        let (service, _temp_dir) = setup_test();
        service.create(create_command("Ana Beatriz", "Sementinhas")).unwrap();
        service.create(create_command("Ana Clara", "Discípulos Mirins")).unwrap();
        service.create(create_command("Bruno", "Sementinhas")).unwrap();

        let results = service.list(ChildListQuery {
            search: Some("ana".to_string()),
            class: Some("Sementinhas".to_string()),
        });

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Ana Beatriz");
    }

    #[test]
    fn test_distinct_classes_in_first_seen_order() {
        let (service, _temp_dir) = setup_test();
        service.create(create_command("A", "Turma B")).unwrap();
        service.create(create_command("B", "Turma A")).unwrap();
        service.create(create_command("C", "Turma B")).unwrap();
        service.create(create_command("D", "")).unwrap();

        let classes = service.distinct_classes();
        let fresh: Vec<_> = classes
            .iter()
            .filter(|c| c.starts_with("Turma"))
            .cloned()
            .collect();
        assert_eq!(fresh, vec!["Turma B".to_string(), "Turma A".to_string()]);
    }
}
