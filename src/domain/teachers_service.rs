use anyhow::Result;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::teachers::{
    CreateTeacherCommand, DeleteTeacherCommand, DeleteTeacherResult, TeacherListQuery,
    UpdateTeacherCommand,
};
use crate::domain::error::DomainError;
use crate::domain::models::Teacher;
use crate::storage::{SlotConnection, TeacherRepository};

/// Service for managing the teaching team and its attendance marks
#[derive(Clone)]
pub struct TeachersService {
    repository: TeacherRepository,
}

impl TeachersService {
    /// Create a new TeachersService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        let repository = TeacherRepository::new(connection);
        Self { repository }
    }

    /// List teachers, optionally narrowed by a case-insensitive name search
    /// and an exact role match (ANDed when both are present)
    pub fn list(&self, query: TeacherListQuery) -> Vec<Teacher> {
        let search = query.search.as_deref().map(str::to_lowercase);

        let teachers: Vec<_> = self
            .repository
            .list()
            .into_iter()
            .filter(|teacher| {
                search
                    .as_deref()
                    .map(|term| teacher.name.to_lowercase().contains(term))
                    .unwrap_or(true)
                    && query.role.map(|role| teacher.role == role).unwrap_or(true)
            })
            .collect();

        debug!("Listed {} teachers", teachers.len());
        teachers
    }

    /// Get a teacher by id
    pub fn get(&self, teacher_id: &str) -> Option<Teacher> {
        self.repository.get(teacher_id)
    }

    /// Add a teacher to the team
    pub fn create(&self, command: CreateTeacherCommand) -> Result<Teacher> {
        info!("Creating teacher: name={}, role={}", command.name, command.role);

        self.validate_name(&command.name)?;

        let teacher = Teacher {
            id: Teacher::generate_id(),
            name: command.name.trim().to_string(),
            role: command.role,
            assigned_class: command.assigned_class.trim().to_string(),
            contact: command.contact.trim().to_string(),
            present: false,
        };

        self.repository.append(&teacher);

        info!("Created teacher: {} with ID: {}", teacher.name, teacher.id);
        Ok(teacher)
    }

    /// Update an existing teacher. Fields the command leaves `None` keep
    /// their current value; the `present` flag is never touched here.
    pub fn update(&self, command: UpdateTeacherCommand) -> Result<Teacher> {
        info!("Updating teacher: {}", command.teacher_id);

        if let Some(ref name) = command.name {
            self.validate_name(name)?;
        }

        let teacher = self.repository.modify(&command.teacher_id, |teacher| {
            if let Some(name) = &command.name {
                teacher.name = name.trim().to_string();
            }
            if let Some(role) = command.role {
                teacher.role = role;
            }
            if let Some(assigned_class) = &command.assigned_class {
                teacher.assigned_class = assigned_class.trim().to_string();
            }
            if let Some(contact) = &command.contact {
                teacher.contact = contact.trim().to_string();
            }
        })?;

        info!("Updated teacher: {} with ID: {}", teacher.name, teacher.id);
        Ok(teacher)
    }

    /// Remove a teacher. Refused without confirmation; removing an
    /// already-absent id is a no-op once confirmed.
    pub fn delete(&self, command: DeleteTeacherCommand) -> Result<DeleteTeacherResult> {
        info!("Deleting teacher: {}", command.teacher_id);

        if !command.confirmed {
            warn!("Refused unconfirmed deletion of teacher {}", command.teacher_id);
            return Err(DomainError::ConfirmationRequired.into());
        }

        let deleted = self.repository.remove(&command.teacher_id);

        Ok(DeleteTeacherResult {
            deleted,
            success_message: if deleted {
                "Teacher removed from the team".to_string()
            } else {
                "Teacher was already removed".to_string()
            },
        })
    }

    /// Flip the attendance mark of one teacher
    pub fn toggle_present(&self, teacher_id: &str) -> Result<Teacher> {
        let teacher = self
            .repository
            .modify(teacher_id, |teacher| teacher.present = !teacher.present)?;

        debug!(
            "Teacher {} marked {}",
            teacher.name,
            if teacher.present { "present" } else { "absent" }
        );
        Ok(teacher)
    }

    /// Clear the attendance mark of every teacher in one persisted write.
    /// Returns the number of records touched.
    pub fn reset_attendance(&self) -> usize {
        let count = self.repository.modify_all(|teacher| teacher.present = false);
        info!("Cleared attendance for {} teachers", count);
        count
    }

    /// Distinct assigned-class names in team order, for filter dropdowns
    pub fn distinct_assigned_classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = Vec::new();
        for teacher in self.repository.list() {
            if !teacher.assigned_class.is_empty() && !classes.contains(&teacher.assigned_class) {
                classes.push(teacher.assigned_class);
            }
        }
        classes
    }

    fn validate_name(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow::anyhow!("Teacher name cannot be empty"));
        }
        if name.len() > 100 {
            return Err(anyhow::anyhow!("Teacher name cannot exceed 100 characters"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TeacherRole;
    use tempfile::TempDir;

    fn setup_test() -> (TeachersService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = SlotConnection::new(temp_dir.path()).unwrap();
        (TeachersService::new(Arc::new(connection)), temp_dir)
    }

    fn create_command(name: &str, role: TeacherRole) -> CreateTeacherCommand {
        CreateTeacherCommand {
            name: name.to_string(),
            role,
            assigned_class: "Sementinhas".to_string(),
            contact: "(11) 90000-0000".to_string(),
        }
    }

    #[test]
    fn test_create_teacher() {
        let (service, _temp_dir) = setup_test();
        let before = service.list(TeacherListQuery::default()).len();

        let teacher = service
            .create(create_command("  Tia Ana ", TeacherRole::Leader))
            .unwrap();
        assert_eq!(teacher.name, "Tia Ana");
        assert!(!teacher.present);
        assert_eq!(service.list(TeacherListQuery::default()).len(), before + 1);
    }

    #[test]
    fn test_create_teacher_validation() {
        let (service, _temp_dir) = setup_test();
        assert!(service.create(create_command("  ", TeacherRole::Volunteer)).is_err());
    }

    #[test]
    fn test_update_preserves_unspecified_fields() {
        let (service, _temp_dir) = setup_test();
        let teacher = service
            .create(create_command("Tio José", TeacherRole::Assistant))
            .unwrap();

        let updated = service
            .update(UpdateTeacherCommand {
                teacher_id: teacher.id.clone(),
                role: Some(TeacherRole::Leader),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.role, TeacherRole::Leader);
        assert_eq!(updated.name, teacher.name);
        assert_eq!(updated.contact, teacher.contact);
    }

    #[test]
    fn test_update_missing_teacher_is_not_found() {
        let (service, _temp_dir) = setup_test();
        let result = service.update(UpdateTeacherCommand {
            teacher_id: "ghost".to_string(),
            name: Some("Nobody".to_string()),
            ..Default::default()
        });

        assert!(matches!(
            result.unwrap_err().downcast_ref::<DomainError>(),
            Some(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (service, _temp_dir) = setup_test();
        let teacher = service
            .create(create_command("Fica", TeacherRole::Volunteer))
            .unwrap();

        let refused = service.delete(DeleteTeacherCommand {
            teacher_id: teacher.id.clone(),
            confirmed: false,
        });
        assert!(refused.is_err());
        assert!(service.get(&teacher.id).is_some());

        let allowed = service
            .delete(DeleteTeacherCommand {
                teacher_id: teacher.id.clone(),
                confirmed: true,
            })
            .unwrap();
        assert!(allowed.deleted);
        assert!(service.get(&teacher.id).is_none());
    }

    #[test]
    fn test_toggle_and_reset_attendance() {
        let (service, _temp_dir) = setup_test();
        let teacher = service
            .create(create_command("Presente", TeacherRole::Leader))
            .unwrap();

        assert!(service.toggle_present(&teacher.id).unwrap().present);

        let count = service.reset_attendance();
        assert!(count > 0);
        assert!(service
            .list(TeacherListQuery::default())
            .iter()
            .all(|t| !t.present));
    }

    #[test]
    fn test_role_filter_is_exact() {
        let (service, _temp_dir) = setup_test();
        service.create(create_command("Lead One", TeacherRole::Leader)).unwrap();
        service.create(create_command("Helper", TeacherRole::Assistant)).unwrap();

        let leaders = service.list(TeacherListQuery {
            search: None,
            role: Some(TeacherRole::Leader),
        });
        assert!(leaders.iter().all(|t| t.role == TeacherRole::Leader));
        assert!(leaders.iter().any(|t| t.name == "Lead One"));
    }
}
