//! # Application Composition
//!
//! [`MinistryApp`] is the explicit application-state aggregate: it owns
//! the slot connection and every domain service, wired over one shared
//! data directory. Screens receive the services they need from here
//! instead of reaching into any ambient store.

use anyhow::Result;
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{
    AssistantService, ChildrenService, CreativeAssistant, DashboardService, EventsService,
    GalleryService, LessonsService, MessagesService, ReportsService, SessionService,
    TeachersService,
};
use crate::storage::SlotConnection;

/// The assembled application: one connection, all services
pub struct MinistryApp {
    connection: Arc<SlotConnection>,
    pub children_service: ChildrenService,
    pub teachers_service: TeachersService,
    pub lessons_service: LessonsService,
    pub events_service: EventsService,
    pub messages_service: MessagesService,
    pub gallery_service: GalleryService,
    pub dashboard_service: DashboardService,
    pub reports_service: ReportsService,
    pub assistant_service: AssistantService,
    pub session_service: SessionService,
}

impl MinistryApp {
    /// Assemble the application over a data directory, with the creative
    /// assistant provider injected by the caller
    pub fn new<P: AsRef<Path>>(
        data_directory: P,
        assistant: Arc<dyn CreativeAssistant>,
    ) -> Result<Self> {
        let connection = Arc::new(SlotConnection::new(data_directory)?);
        info!(
            "Initializing ministry tracker in {:?}",
            connection.base_directory()
        );

        Ok(Self {
            children_service: ChildrenService::new(Arc::clone(&connection)),
            teachers_service: TeachersService::new(Arc::clone(&connection)),
            lessons_service: LessonsService::new(Arc::clone(&connection)),
            events_service: EventsService::new(Arc::clone(&connection)),
            messages_service: MessagesService::new(Arc::clone(&connection)),
            gallery_service: GalleryService::new(Arc::clone(&connection)),
            dashboard_service: DashboardService::new(Arc::clone(&connection)),
            reports_service: ReportsService::new(Arc::clone(&connection)),
            assistant_service: AssistantService::new(assistant, Arc::clone(&connection)),
            session_service: SessionService::new(Arc::clone(&connection)),
            connection,
        })
    }

    /// Assemble the application in the default data directory
    /// (`~/Documents/Ministry Tracker`)
    pub fn new_default(assistant: Arc<dyn CreativeAssistant>) -> Result<Self> {
        let connection = SlotConnection::new_default()?;
        Self::new(connection.base_directory().to_path_buf(), assistant)
    }

    /// The data directory every slot lives under
    pub fn data_directory(&self) -> &Path {
        self.connection.base_directory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::children::{ChildListQuery, CreateChildCommand};
    use crate::domain::commands::messages::MessageListQuery;
    use anyhow::Result as AnyResult;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct OfflineAssistant;

    #[async_trait]
    impl CreativeAssistant for OfflineAssistant {
        async fn lesson_ideas(&self, _age_group: &str) -> AnyResult<Vec<String>> {
            Err(anyhow::anyhow!("offline"))
        }
        async fn suggest_theme(&self, _age_group: &str) -> AnyResult<String> {
            Err(anyhow::anyhow!("offline"))
        }
        async fn theme_variations(&self, _t: &str, _a: &str) -> AnyResult<Vec<String>> {
            Err(anyhow::anyhow!("offline"))
        }
        async fn lesson_plan(&self, _t: &str, _a: &str) -> AnyResult<String> {
            Err(anyhow::anyhow!("offline"))
        }
        async fn coloring_image(&self, _t: &str) -> AnyResult<Option<String>> {
            Err(anyhow::anyhow!("offline"))
        }
    }

    fn setup_app() -> (MinistryApp, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let app = MinistryApp::new(temp_dir.path(), Arc::new(OfflineAssistant)).unwrap();
        (app, temp_dir)
    }

    #[test]
    fn test_services_share_one_data_directory() {
        let (app, temp_dir) = setup_app();
        assert_eq!(app.data_directory(), temp_dir.path());

        // A mutation through one service is visible through another
        // reading the same collection
        let child = app
            .children_service
            .create(CreateChildCommand {
                name: "Compartilhada".to_string(),
                age: 6,
                class: "Nova Turma".to_string(),
                guardian_name: String::new(),
                guardian_contact: String::new(),
                notes: String::new(),
            })
            .unwrap();

        let distribution = app.dashboard_service.class_distribution();
        assert!(distribution.iter().any(|entry| entry.label == "Nova Turma"));
        assert!(app
            .children_service
            .list(ChildListQuery::default())
            .iter()
            .any(|c| c.id == child.id));
    }

    #[test]
    fn test_collections_start_seeded() {
        let (app, _temp_dir) = setup_app();

        assert!(!app.children_service.list(ChildListQuery::default()).is_empty());
        assert!(!app.messages_service.list(MessageListQuery::default()).is_empty());
        assert!(!app.gallery_service.list().is_empty());
        assert!(!app.session_service.is_signed_in());
    }

    #[test]
    fn test_state_survives_reassembly() {
        let (app, temp_dir) = setup_app();
        app.session_service.sign_in();
        let child = app
            .children_service
            .create(CreateChildCommand {
                name: "Persistente".to_string(),
                age: 7,
                class: "Turma".to_string(),
                guardian_name: String::new(),
                guardian_contact: String::new(),
                notes: String::new(),
            })
            .unwrap();
        drop(app);

        let reopened = MinistryApp::new(temp_dir.path(), Arc::new(OfflineAssistant)).unwrap();
        assert!(reopened.session_service.is_signed_in());
        assert!(reopened.children_service.get(&child.id).is_some());
    }
}
