use log::{debug, info};
use std::sync::Arc;

use crate::storage::SlotConnection;

const AUTH_SLOT: &str = "auth";
const PROFILE_PICTURE_SLOT: &str = "profile_picture";

/// Service for the signed-in flag and the coordinator's profile picture.
/// Both are scalar slots beside the entity collections; neither carries
/// any real credential.
#[derive(Clone)]
pub struct SessionService {
    connection: Arc<SlotConnection>,
}

impl SessionService {
    /// Create a new SessionService
    pub fn new(connection: Arc<SlotConnection>) -> Self {
        Self { connection }
    }

    /// Mark the installation as signed in
    pub fn sign_in(&self) {
        info!("Signing in");
        self.connection.save_slot(AUTH_SLOT, &true);
    }

    /// Sign out, keeping all other data in place
    pub fn sign_out(&self) {
        info!("Signing out");
        self.connection.save_slot(AUTH_SLOT, &false);
    }

    /// Whether the installation is currently signed in
    pub fn is_signed_in(&self) -> bool {
        self.connection.load_slot(AUTH_SLOT, false)
    }

    /// Set the profile picture (a url or data URI)
    pub fn set_profile_picture(&self, picture: String) {
        debug!("Updating profile picture");
        self.connection.save_slot(PROFILE_PICTURE_SLOT, &picture);
    }

    /// The stored profile picture, if any
    pub fn profile_picture(&self) -> Option<String> {
        self.connection.load_slot(PROFILE_PICTURE_SLOT, None)
    }

    /// Remove the stored profile picture
    pub fn clear_profile_picture(&self) {
        self.connection.clear_slot(PROFILE_PICTURE_SLOT);
    }
}
