//! Session Config

use clap::Args;

/// Cart session cookie settings.
#[derive(Debug, Clone, Args)]
pub struct SessionConfig {
    /// Only send the cart session cookie over HTTPS.
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false, action = clap::ArgAction::Set)]
    pub session_cookie_secure: bool,
}
