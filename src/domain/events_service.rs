use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::events::{
    CreateEventCommand, DeleteEventCommand, DeleteEventResult, EventListQuery, UpdateEventCommand,
};
use crate::domain::error::DomainError;
use crate::domain::models::AppEvent;
use crate::storage::{EventRepository, SlotConnection};

/// Service for the ministry event calendar
#[derive(Clone)]
pub struct EventsService {
    repository: EventRepository,
}

impl EventsService {
    /// Create a new EventsService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        let repository = EventRepository::new(connection);
        Self { repository }
    }

    /// List events sorted by date ascending, optionally narrowed by a
    /// case-insensitive title search and an exact type match
    pub fn list(&self, query: EventListQuery) -> Vec<AppEvent> {
        let search = query.search.as_deref().map(str::to_lowercase);

        let mut events: Vec<_> = self
            .repository
            .list()
            .into_iter()
            .filter(|event| {
                search
                    .as_deref()
                    .map(|term| event.title.to_lowercase().contains(term))
                    .unwrap_or(true)
                    && query
                        .event_type
                        .map(|event_type| event.event_type == event_type)
                        .unwrap_or(true)
            })
            .collect();

        events.sort_by_key(|event| event.date);

        debug!("Listed {} events", events.len());
        events
    }

    /// Get an event by id
    pub fn get(&self, event_id: &str) -> Option<AppEvent> {
        self.repository.get(event_id)
    }

    /// Schedule a new event
    pub fn create(&self, command: CreateEventCommand) -> Result<AppEvent> {
        info!("Creating event: title={}, date={}", command.title, command.date);

        self.validate_title(&command.title)?;
        let date = parse_event_date(&command.date)
            .context("Invalid date format in create_event command")?;

        let event = AppEvent {
            id: AppEvent::generate_id(),
            title: command.title.trim().to_string(),
            date,
            event_type: command.event_type,
            description: command.description.trim().to_string(),
        };

        self.repository.append(&event);

        info!("Created event: {} with ID: {}", event.title, event.id);
        Ok(event)
    }

    /// Update an existing event. Fields the command leaves `None` keep
    /// their current value.
    pub fn update(&self, command: UpdateEventCommand) -> Result<AppEvent> {
        info!("Updating event: {}", command.event_id);

        if let Some(ref title) = command.title {
            self.validate_title(title)?;
        }
        let date = match command.date.as_deref() {
            Some(raw) => {
                Some(parse_event_date(raw).context("Invalid date format in update_event command")?)
            }
            None => None,
        };

        let event = self.repository.modify(&command.event_id, |event| {
            if let Some(title) = &command.title {
                event.title = title.trim().to_string();
            }
            if let Some(date) = date {
                event.date = date;
            }
            if let Some(event_type) = command.event_type {
                event.event_type = event_type;
            }
            if let Some(description) = &command.description {
                event.description = description.trim().to_string();
            }
        })?;

        info!("Updated event: {} with ID: {}", event.title, event.id);
        Ok(event)
    }

    /// Remove an event. Refused without confirmation; removing an
    /// already-absent id is a no-op once confirmed.
    pub fn delete(&self, command: DeleteEventCommand) -> Result<DeleteEventResult> {
        info!("Deleting event: {}", command.event_id);

        if !command.confirmed {
            warn!("Refused unconfirmed deletion of event {}", command.event_id);
            return Err(DomainError::ConfirmationRequired.into());
        }

        let deleted = self.repository.remove(&command.event_id);

        Ok(DeleteEventResult {
            deleted,
            success_message: if deleted {
                "Event removed from the calendar".to_string()
            } else {
                "Event was already removed".to_string()
            },
        })
    }

    fn validate_title(&self, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(anyhow::anyhow!("Event title cannot be empty"));
        }
        if title.len() > 200 {
            return Err(anyhow::anyhow!("Event title cannot exceed 200 characters"));
        }
        Ok(())
    }
}

fn parse_event_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}. Use YYYY-MM-DD.", raw, e))
}
