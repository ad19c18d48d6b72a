/// User domain type
use crate::types::Image;
use serde::{Deserialize, Serialize};

/// Profile of the signed-in account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identifier
    pub id: String,

    /// Display name (the API may omit it)
    #[serde(default)]
    pub display_name: Option<String>,

    /// Avatar images
    #[serde(default)]
    pub images: Vec<Image>,
}

impl UserProfile {
    /// Name to greet the user with, falling back to the account id
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    /// Whether the profile carries an avatar (otherwise a default icon is shown)
    pub fn has_avatar(&self) -> bool {
        !self.images.is_empty()
    }
}
