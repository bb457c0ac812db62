use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::gallery::{
    CreatePhotoCommand, DeletePhotoCommand, DeletePhotoResult,
};
use crate::domain::error::DomainError;
use crate::domain::models::Photo;
use crate::storage::{PhotoRepository, SlotConnection};

/// Service for the photo gallery. Photos are stored newest first; the url
/// may be a regular link or a data URI for uploaded images.
#[derive(Clone)]
pub struct GalleryService {
    repository: PhotoRepository,
}

impl GalleryService {
    /// Create a new GalleryService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        let repository = PhotoRepository::new(connection);
        Self { repository }
    }

    /// List photos newest first
    pub fn list(&self) -> Vec<Photo> {
        let photos = self.repository.list();
        debug!("Listed {} photos", photos.len());
        photos
    }

    /// Get a photo by id
    pub fn get(&self, photo_id: &str) -> Option<Photo> {
        self.repository.get(photo_id)
    }

    /// Add a photo to the top of the gallery
    pub fn create(&self, command: CreatePhotoCommand) -> Result<Photo> {
        info!("Adding photo: caption={}", command.caption);

        if command.url.trim().is_empty() {
            return Err(anyhow::anyhow!("Photo url cannot be empty"));
        }
        let date = NaiveDate::parse_from_str(command.date.trim(), "%Y-%m-%d")
            .context("Invalid date format in create_photo command")?;

        let photo = Photo {
            id: Photo::generate_id(),
            url: command.url.trim().to_string(),
            caption: command.caption.trim().to_string(),
            date,
        };

        self.repository.prepend(&photo);

        info!("Added photo {}", photo.id);
        Ok(photo)
    }

    /// Remove a photo. Refused without confirmation; removing an
    /// already-absent id is a no-op once confirmed.
    pub fn delete(&self, command: DeletePhotoCommand) -> Result<DeletePhotoResult> {
        info!("Deleting photo: {}", command.photo_id);

        if !command.confirmed {
            warn!("Refused unconfirmed deletion of photo {}", command.photo_id);
            return Err(DomainError::ConfirmationRequired.into());
        }

        let deleted = self.repository.remove(&command.photo_id);

        Ok(DeletePhotoResult {
            deleted,
            success_message: if deleted {
                "Photo removed from the gallery".to_string()
            } else {
                "Photo was already removed".to_string()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test() -> (GalleryService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = SlotConnection::new(temp_dir.path()).unwrap();
        (GalleryService::new(Arc::new(connection)), temp_dir)
    }

    fn create_command(url: &str) -> CreatePhotoCommand {
        CreatePhotoCommand {
            url: url.to_string(),
            caption: "Festa das crianças".to_string(),
            date: "2024-08-04".to_string(),
        }
    }

    #[test]
    fn test_new_photo_goes_to_the_top() {
        let (service, _temp_dir) = setup_test();
        let photo = service
            .create(create_command("data:image/png;base64,AAAA"))
            .unwrap();

        let gallery = service.list();
        assert_eq!(gallery[0].id, photo.id);
        assert_eq!(gallery[0].url, "data:image/png;base64,AAAA");
    }

    #[test]
    fn test_create_validation() {
        let (service, _temp_dir) = setup_test();
        assert!(service.create(create_command("  ")).is_err());

        let bad_date = CreatePhotoCommand {
            url: "https://example.com/p.jpg".to_string(),
            caption: String::new(),
            date: "04/08/2024".to_string(),
        };
        assert!(service.create(bad_date).is_err());
    }

    #[test]
    fn test_delete_requires_confirmation_and_is_idempotent() {
        let (service, _temp_dir) = setup_test();
        let photo = service
            .create(create_command("https://example.com/p.jpg"))
            .unwrap();

        assert!(service
            .delete(DeletePhotoCommand {
                photo_id: photo.id.clone(),
                confirmed: false,
            })
            .is_err());

        let first = service
            .delete(DeletePhotoCommand {
                photo_id: photo.id.clone(),
                confirmed: true,
            })
            .unwrap();
        assert!(first.deleted);

        let second = service
            .delete(DeletePhotoCommand {
                photo_id: photo.id,
                confirmed: true,
            })
            .unwrap();
        assert!(!second.deleted);
    }
}
