//! Identity records in the `identities` partition
//!
//! Layout:
//! - `user:{username}` -> JSON [`Identity`]
//! - `email:{email}` -> username

use platebook_core::store::IdentityStore;
use platebook_core::*;
use tracing::debug;

use crate::{storage_err, StorageEngine, Table};

const PARTITION: &str = "identities";

fn user_key(username: &str) -> String {
    format!("user:{}", username)
}

fn email_key(email: &str) -> String {
    format!("email:{}", email)
}

/// fjall-backed [`IdentityStore`]
pub struct FjallIdentityStore {
    table: Table,
}

impl FjallIdentityStore {
    pub fn open(engine: &StorageEngine) -> Result<Self> {
        Ok(FjallIdentityStore {
            table: engine.table(PARTITION)?,
        })
    }
}

impl IdentityStore for FjallIdentityStore {
    fn get(&self, username: &str) -> Result<Option<Identity>> {
        self.table.get_json(&user_key(username))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Identity>> {
        match self.table.get_raw(&email_key(email))? {
            Some(username) => {
                let username = String::from_utf8(username).map_err(storage_err)?;
                self.get(&username)
            }
            None => Ok(None),
        }
    }

    fn insert_new(&self, identity: Identity) -> Result<()> {
        let engine = self.table.engine();
        let _guard = engine.lock_writes()?;

        let user = user_key(&identity.username);
        let email = email_key(&identity.email);

        if self.table.contains(&email)? {
            return Err(PlatebookError::EmailTaken);
        }
        if self.table.contains(&user)? {
            return Err(PlatebookError::UsernameTaken);
        }

        let record = serde_json::to_vec(&identity)?;

        let mut batch = engine.batch();
        batch.insert(self.table.partition(), user.into_bytes(), record);
        batch.insert(
            self.table.partition(),
            email.into_bytes(),
            identity.username.clone().into_bytes(),
        );
        engine.commit(batch)?;

        debug!("Stored identity: username={}", identity.username);
        Ok(())
    }

    fn delete(&self, username: &str) -> Result<bool> {
        let engine = self.table.engine();
        let _guard = engine.lock_writes()?;

        let identity = match self.get(username)? {
            Some(identity) => identity,
            None => return Ok(false),
        };

        let mut batch = engine.batch();
        batch.remove(self.table.partition(), user_key(username).into_bytes());
        batch.remove(self.table.partition(), email_key(&identity.email).into_bytes());
        engine.commit(batch)?;

        debug!("Deleted identity: username={}", username);
        Ok(true)
    }
}
