use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// The signed-in manufacturer. This is the explicit replacement for the
/// original client's scattered local-storage reads: pages receive it from
/// here, and it only changes at the login/logout boundaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManufacturerIdentity {
    pub manufacturer: String,
    #[serde(default)]
    pub manufacturer_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct SessionData {
    manufacturer: Option<ManufacturerIdentity>,
}

pub struct SessionStore {
    path: PathBuf,
    data: RwLock<SessionData>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            SessionData::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn current_manufacturer(&self) -> Option<ManufacturerIdentity> {
        self.data.read().unwrap().manufacturer.clone()
    }

    pub fn login(&self, identity: ManufacturerIdentity) -> Result<ManufacturerIdentity> {
        if identity.manufacturer.trim().is_empty() {
            bail!("manufacturer name is required");
        }
        let mut guard = self.data.write().unwrap();
        guard.manufacturer = Some(identity.clone());
        self.persist(&guard)?;
        Ok(identity)
    }

    pub fn logout(&self) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.manufacturer = None;
        self.persist(&guard)
    }

    fn persist(&self, data: &SessionData) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> ManufacturerIdentity {
        ManufacturerIdentity {
            manufacturer: "Acme Pharma".to_string(),
            manufacturer_id: Some("42".to_string()),
        }
    }

    #[test]
    fn login_persists_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::new(path.clone()).unwrap();
        assert!(store.current_manufacturer().is_none());
        store.login(identity()).unwrap();

        let reopened = SessionStore::new(path).unwrap();
        assert_eq!(reopened.current_manufacturer(), Some(identity()));
    }

    #[test]
    fn logout_clears_the_stored_identity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SessionStore::new(path.clone()).unwrap();
        store.login(identity()).unwrap();
        store.logout().unwrap();
        assert!(store.current_manufacturer().is_none());

        let reopened = SessionStore::new(path).unwrap();
        assert!(reopened.current_manufacturer().is_none());
    }

    #[test]
    fn blank_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json")).unwrap();
        let result = store.login(ManufacturerIdentity {
            manufacturer: "   ".to_string(),
            manufacturer_id: None,
        });
        assert!(result.is_err());
        assert!(store.current_manufacturer().is_none());
    }

    #[test]
    fn corrupt_session_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SessionStore::new(path).unwrap();
        assert!(store.current_manufacturer().is_none());
    }
}
