use std::path::PathBuf;

/// Env var consulted before the on-disk token, mainly for development.
pub const TOKEN_ENV_VAR: &str = "AGENCECO_TOKEN";

/// Read-only view over the session token written by the login tooling.
///
/// This client never creates a token; it only reads one to attach
/// `Authorization: Bearer <token>` to protected requests, and deletes it on
/// explicit logout. A rejected token (401) is surfaced to the user as-is —
/// re-authentication is the login collaborator's concern.
#[derive(Debug, Clone)]
pub struct SessionStore {
    token_path: Option<PathBuf>,
}

impl SessionStore {
    pub fn from_env() -> Self {
        Self {
            token_path: session_token_path(),
        }
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            token_path: Some(path),
        }
    }

    pub fn get_token(&self) -> Option<String> {
        if let Some(token) = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
        {
            return Some(token);
        }

        let path = self.token_path.as_ref()?;
        let raw = std::fs::read_to_string(path).ok()?;
        let token = raw.trim().to_string();
        (!token.is_empty()).then_some(token)
    }

    pub fn clear_token(&self) {
        if let Some(path) = &self.token_path {
            let _ = std::fs::remove_file(path);
        }
    }
}

fn session_token_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("AGENCECO_SESSION_FILE") {
        return Some(PathBuf::from(path));
    }

    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("agenceco").join("session"));
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return Some(PathBuf::from(home).join("Library/Application Support/AgenceEco/session"));
        }
    }

    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        return Some(PathBuf::from(home).join(".config/agenceco/session"));
    }

    None
}
