use nl_core::{Level, Result, User};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Bearer token attached to authenticated calls.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

impl From<&User> for Credential {
    fn from(user: &User) -> Self {
        Self::new(user.token.clone())
    }
}

/// The signed-in user, persisted as JSON on disk.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Option<User>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn credential(&self) -> Result<Option<Credential>> {
        Ok(self.load().await?.as_ref().map(Credential::from))
    }

    pub async fn save(&self, user: &User) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(user)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!("Stored session for {} in {}", user.email, self.path.display());
        Ok(())
    }

    /// Forgets the stored session. Clearing an absent session is not an error.
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!("Signed out");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Changes the stored user's level. Returns `None` when nobody is signed in.
    pub async fn update_level(&self, level: Level) -> Result<Option<User>> {
        let Some(mut user) = self.load().await? else {
            return Ok(None);
        };
        user.level = level;
        self.save(&user).await?;
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            avatar: None,
            level: Level::Beginner,
            token: "secret-token".to_string(),
        }
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("secret-token");
        assert!(!format!("{:?}", credential).contains("secret"));
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().await.unwrap().is_none());
        store.save(&user()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(user()));
        assert_eq!(
            store.credential().await.unwrap().unwrap().token(),
            "secret-token"
        );

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_level() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::new(dir.path().join("session.json"));

        assert!(store.update_level(Level::Advanced).await.unwrap().is_none());

        store.save(&user()).await.unwrap();
        let updated = store.update_level(Level::Advanced).await.unwrap().unwrap();
        assert_eq!(updated.level, Level::Advanced);
        assert_eq!(store.load().await.unwrap().unwrap().level, Level::Advanced);
    }
}
