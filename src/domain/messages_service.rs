use anyhow::Result;
use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::messages::{
    CreateMessageCommand, DeleteMessageCommand, DeleteMessageResult, MessageListQuery,
};
use crate::domain::error::DomainError;
use crate::domain::models::Message;
use crate::storage::{MessageRepository, SlotConnection};

/// Service for the communication feed. Messages are stored newest first
/// and their timestamps are stamped at creation, never edited.
#[derive(Clone)]
pub struct MessagesService {
    repository: MessageRepository,
}

impl MessagesService {
    /// Create a new MessagesService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        let repository = MessageRepository::new(connection);
        Self { repository }
    }

    /// List messages newest first, optionally narrowed by a
    /// case-insensitive content search and an exact type match
    pub fn list(&self, query: MessageListQuery) -> Vec<Message> {
        let search = query.search.as_deref().map(str::to_lowercase);

        let messages: Vec<_> = self
            .repository
            .list()
            .into_iter()
            .filter(|message| {
                search
                    .as_deref()
                    .map(|term| message.content.to_lowercase().contains(term))
                    .unwrap_or(true)
                    && query
                        .message_type
                        .map(|message_type| message.message_type == message_type)
                        .unwrap_or(true)
            })
            .collect();

        debug!("Listed {} messages", messages.len());
        messages
    }

    /// Get a message by id
    pub fn get(&self, message_id: &str) -> Option<Message> {
        self.repository.get(message_id)
    }

    /// Post a message to the top of the feed, stamped with the current time
    pub fn create(&self, command: CreateMessageCommand) -> Result<Message> {
        info!(
            "Creating message: type={}, author={}",
            command.message_type, command.author
        );

        if command.content.trim().is_empty() {
            return Err(anyhow::anyhow!("Message content cannot be empty"));
        }
        if command.author.trim().is_empty() {
            return Err(anyhow::anyhow!("Message author cannot be empty"));
        }

        let message = Message {
            id: Message::generate_id(),
            message_type: command.message_type,
            content: command.content.trim().to_string(),
            author: command.author.trim().to_string(),
            timestamp: Utc::now(),
        };

        self.repository.prepend(&message);

        info!("Created message {} by {}", message.id, message.author);
        Ok(message)
    }

    /// Remove a message from the feed. Refused without confirmation;
    /// removing an already-absent id is a no-op once confirmed.
    pub fn delete(&self, command: DeleteMessageCommand) -> Result<DeleteMessageResult> {
        info!("Deleting message: {}", command.message_id);

        if !command.confirmed {
            warn!("Refused unconfirmed deletion of message {}", command.message_id);
            return Err(DomainError::ConfirmationRequired.into());
        }

        let deleted = self.repository.remove(&command.message_id);

        Ok(DeleteMessageResult {
            deleted,
            success_message: if deleted {
                "Message removed from the feed".to_string()
            } else {
                "Message was already removed".to_string()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::MessageType;
    use tempfile::TempDir;

    fn setup_test() -> (MessagesService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = SlotConnection::new(temp_dir.path()).unwrap();
        (MessagesService::new(Arc::new(connection)), temp_dir)
    }

    fn create_command(content: &str, message_type: MessageType) -> CreateMessageCommand {
        CreateMessageCommand {
            message_type,
            content: content.to_string(),
            author: "Coordenação".to_string(),
        }
    }

    #[test]
    fn test_new_message_goes_to_the_top() {
        let (service, _temp_dir) = setup_test();
        let first = service
            .create(create_command("Primeira", MessageType::ParentNotice))
            .unwrap();
        let second = service
            .create(create_command("Segunda", MessageType::ParentNotice))
            .unwrap();

        let feed = service.list(MessageListQuery::default());
        assert_eq!(feed[0].id, second.id);
        assert_eq!(feed[1].id, first.id);
    }

    #[test]
    fn test_create_stamps_timestamp() {
        let (service, _temp_dir) = setup_test();
        let before = Utc::now();
        let message = service
            .create(create_command("Aviso", MessageType::Teachers))
            .unwrap();
        assert!(message.timestamp >= before);
    }

    #[test]
    fn test_create_validation() {
        let (service, _temp_dir) = setup_test();
        assert!(service
            .create(create_command("  ", MessageType::PrayerRequest))
            .is_err());
        assert!(service
            .create(CreateMessageCommand {
                message_type: MessageType::Teachers,
                content: "Conteúdo".to_string(),
                author: " ".to_string(),
            })
            .is_err());
    }

    #[test]
    fn test_type_filter_and_content_search_are_anded() {
        let (service, _temp_dir) = setup_test();
        service
            .create(create_command("Mutirão de pais", MessageType::ParentNotice))
            .unwrap();
        service
            .create(create_command("Mutirão de professores", MessageType::Teachers))
            .unwrap();

        let results = service.list(MessageListQuery {
            search: Some("mutirão".to_string()),
            message_type: Some(MessageType::Teachers),
        });

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "Mutirão de professores");
    }

    #[test]
    fn test_delete_flow() {
        let (service, _temp_dir) = setup_test();
        let message = service
            .create(create_command("Remover", MessageType::ParentNotice))
            .unwrap();

        assert!(service
            .delete(DeleteMessageCommand {
                message_id: message.id.clone(),
                confirmed: false,
            })
            .is_err());

        let result = service
            .delete(DeleteMessageCommand {
                message_id: message.id.clone(),
                confirmed: true,
            })
            .unwrap();
        assert!(result.deleted);
        assert!(service.get(&message.id).is_none());
    }
}
