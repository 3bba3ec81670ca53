use app_core::oauth::UserProfile;
use serde::{Deserialize, Serialize};

// ╔════════════════════════════╗
// ║        Callback            ║
// ╚════════════════════════════╝

#[derive(Deserialize)]
pub struct CallbackRequest {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub login: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub raw: serde_json::Value,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            login: profile.login,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            raw: profile.raw,
        }
    }
}
