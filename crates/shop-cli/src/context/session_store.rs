use shop_auth::SessionStore;
use shop_auth::store::{FallbackBackend, FileBackend, KeyringBackend};
use shop_config::{SessionBackendKind, SessionConfig};

/// Open the session store selected by `[session]` configuration.
pub fn open_session_store(config: &SessionConfig) -> anyhow::Result<SessionStore> {
    let store = match config.backend {
        SessionBackendKind::Auto => SessionStore::new(FallbackBackend::new(
            KeyringBackend::new(&config.keyring_service),
            file_backend(config)?,
        )),
        SessionBackendKind::Keyring => {
            SessionStore::new(KeyringBackend::new(&config.keyring_service))
        }
        SessionBackendKind::File => SessionStore::new(file_backend(config)?),
        SessionBackendKind::Memory => SessionStore::in_memory(),
    };
    tracing::debug!(backend = store.backend_name(), "opened session store");
    Ok(store)
}

fn file_backend(config: &SessionConfig) -> anyhow::Result<FileBackend> {
    if config.dir.is_empty() {
        Ok(FileBackend::in_home()?)
    } else {
        Ok(FileBackend::new(&config.dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_core::entities::{Session, UserSummary};
    use shop_core::enums::Role;

    #[test]
    fn memory_backend_starts_signed_out() {
        let config = SessionConfig {
            backend: SessionBackendKind::Memory,
            ..SessionConfig::default()
        };
        let store = open_session_store(&config).expect("memory store opens");
        assert_eq!(store.backend_name(), "memory");
        assert!(!store.load().is_authenticated());
    }

    #[test]
    fn file_backend_uses_configured_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = SessionConfig {
            backend: SessionBackendKind::File,
            dir: dir.path().join("session").display().to_string(),
            ..SessionConfig::default()
        };

        let session = Session::authenticated(
            "jwt",
            UserSummary {
                id: "u-3".into(),
                username: "frank".into(),
                email: "frank@example.com".into(),
                role: Role::User,
            },
        );
        open_session_store(&config)
            .expect("file store opens")
            .save(&session)
            .expect("save succeeds");

        let reopened = open_session_store(&config).expect("file store reopens");
        assert_eq!(reopened.backend_name(), "file");
        assert_eq!(reopened.load(), session);
    }
}
