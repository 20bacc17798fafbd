use serde::{Deserialize, Serialize};

/// The signed-in user as supplied by the external identity provider.
///
/// This crate only consumes the identity value; sign-in/sign-out and session
/// state live with the provider. Operations that need an identity take it as
/// an explicit parameter rather than reading ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserIdentity {
    pub uid: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

impl UserIdentity {
    /// Human-readable label for attribution (comments, etc.): display name,
    /// falling back to email, then a generic placeholder.
    pub fn display_label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| "Anonymous".to_string())
    }
}

/// Per-user preferences stored under the user document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub serving_size: u32,
    pub theme: String,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            serving_size: 1,
            theme: "light".to_string(),
            notifications: true,
        }
    }
}
