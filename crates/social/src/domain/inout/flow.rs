use app_core::oauth::UserProfile;
use validator::Validate;

// ╔════════════════════════════╗
// ║         Index              ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct IndexOutput {
    pub docs_url: String,
}

// ╔════════════════════════════╗
// ║        Authorize           ║
// ╚════════════════════════════╝

#[derive(Debug)]
pub struct AuthorizeOutput {
    pub authorize_url: String,
}

// ╔════════════════════════════╗
// ║        Callback            ║
// ╚════════════════════════════╝

#[derive(Debug, Validate)]
pub struct CallbackInput {
    #[validate(length(min = 1, message = "authorization code cannot be empty"))]
    pub code: String,
}

#[derive(Debug)]
pub enum CallbackOutput {
    /// The user agent is sent on to the configured post-auth destination.
    Redirect { redirect_uri: String },
    /// No destination is configured, so the normalized profile is returned.
    Profile(UserProfile),
}
