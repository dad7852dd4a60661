use anyhow::{Context, Result};
use keyring::Entry;
use tracing::warn;

use super::store::{StoredTokens, TokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};

const SERVICE_NAME: &str = "happippang";

/// Session tokens kept in the OS keychain, one entry per token.
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).context("Failed to create keyring entry")
    }

    fn read(&self, key: &str) -> Option<String> {
        let entry = match self.entry(key) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, key, "Keychain unavailable");
                return None;
            }
        };
        match entry.get_password() {
            Ok(value) => Some(value),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(error = %e, key, "Failed to read token from keychain");
                None
            }
        }
    }
}

/// Write and delete access to named secrets
trait Slots {
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn delete(&self, key: &str) -> Result<()>;
}

impl Slots for KeyringTokenStore {
    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .context("Failed to store token in keychain")
    }

    fn delete(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

/// Store a token pair with two separate writes.
///
/// The refresh token goes first. If the access write then fails, the old
/// access token is dropped so it is never paired with the new refresh token;
/// the next request refreshes with the new one.
fn write_pair(slots: &impl Slots, access_token: &str, refresh_token: &str) -> Result<()> {
    slots.write(REFRESH_TOKEN_KEY, refresh_token)?;
    if let Err(e) = slots.write(ACCESS_TOKEN_KEY, access_token) {
        if let Err(cleanup) = slots.delete(ACCESS_TOKEN_KEY) {
            warn!(error = %cleanup, "Failed to drop stale access token");
        }
        return Err(e);
    }
    Ok(())
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self) -> StoredTokens {
        StoredTokens {
            access_token: self.read(ACCESS_TOKEN_KEY),
            refresh_token: self.read(REFRESH_TOKEN_KEY),
        }
    }

    fn set(&self, access_token: &str, refresh_token: &str) -> Result<()> {
        write_pair(self, access_token, refresh_token)
    }

    fn set_access(&self, access_token: &str) -> Result<()> {
        self.write(ACCESS_TOKEN_KEY, access_token)
    }

    fn clear(&self) -> Result<()> {
        // Attempt both even if the first fails
        let access = self.delete(ACCESS_TOKEN_KEY);
        let refresh = self.delete(REFRESH_TOKEN_KEY);
        access.and(refresh)
    }
}
