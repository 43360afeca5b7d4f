//! Process-wide database registry.
//!
//! One coarse mutex serializes every mutation; reads hand out deep-copy
//! snapshots so validator execution never holds the lock and never observes
//! concurrent mutation through a previously obtained view. This store is a
//! test double, not a performance-critical one.

use std::sync::Mutex;

use crate::database::Database;
use crate::error::{KeyField, StoreError};

/// Mutable set of registered databases, empty at startup.
#[derive(Debug, Default)]
pub struct DatabaseRegistry {
    inner: Mutex<Vec<Database>>,
}

impl DatabaseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a database.
    ///
    /// Fails atomically with the first colliding identity field when any of
    /// the five identity fields is already taken; the registry is unchanged
    /// on failure.
    pub fn add(&self, database: Database) -> Result<(), StoreError> {
        let mut databases = self.lock();
        for existing in databases.iter() {
            if let Some((field, value)) = colliding_field(existing, &database) {
                tracing::warn!(%field, value, "database registration rejected");
                return Err(StoreError::DuplicateKey { field, value });
            }
        }
        tracing::info!(database = %database.database_name, "database registered");
        databases.push(database);
        Ok(())
    }

    /// Deregister by name, returning the removed database.
    pub fn remove(&self, database_name: &str) -> Result<Database, StoreError> {
        let mut databases = self.lock();
        let index = databases
            .iter()
            .position(|db| db.database_name == database_name)
            .ok_or(StoreError::NotFound)?;
        tracing::info!(database = %database_name, "database deregistered");
        Ok(databases.remove(index))
    }

    /// Deep-copy snapshot of all registered databases.
    pub fn snapshot(&self) -> Vec<Database> {
        self.lock().clone()
    }

    /// Drop every database. The explicit reset used between tests.
    pub fn clear(&self) {
        self.lock().clear();
        tracing::info!("registry cleared");
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Run a closure against the named database, read-only.
    pub fn with_database<R>(
        &self,
        database_name: &str,
        f: impl FnOnce(&Database) -> R,
    ) -> Result<R, StoreError> {
        let databases = self.lock();
        let database = databases
            .iter()
            .find(|db| db.database_name == database_name)
            .ok_or(StoreError::NotFound)?;
        Ok(f(database))
    }

    /// Run a mutating closure against the named database. The whole
    /// closure executes under the registry lock, so each request's
    /// validation-then-mutation applies fully or not at all.
    pub fn with_database_mut<R>(
        &self,
        database_name: &str,
        f: impl FnOnce(&mut Database) -> R,
    ) -> Result<R, StoreError> {
        let mut databases = self.lock();
        let database = databases
            .iter_mut()
            .find(|db| db.database_name == database_name)
            .ok_or(StoreError::NotFound)?;
        Ok(f(database))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Database>> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn colliding_field(existing: &Database, candidate: &Database) -> Option<(KeyField, String)> {
    let pairs = [
        (
            KeyField::DatabaseName,
            &existing.database_name,
            &candidate.database_name,
        ),
        (
            KeyField::ServerAccessKey,
            &existing.server_access_key,
            &candidate.server_access_key,
        ),
        (
            KeyField::ServerSecretKey,
            &existing.server_secret_key,
            &candidate.server_secret_key,
        ),
        (
            KeyField::ClientAccessKey,
            &existing.client_access_key,
            &candidate.client_access_key,
        ),
        (
            KeyField::ClientSecretKey,
            &existing.client_secret_key,
            &candidate.client_secret_key,
        ),
    ];
    pairs
        .into_iter()
        .find(|(_, a, b)| a == b)
        .map(|(field, _, value)| (field, value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseState;

    #[test]
    fn add_and_snapshot() {
        let registry = DatabaseRegistry::new();
        registry.add(Database::random("a")).expect("add");
        registry.add(Database::random("b")).expect("add");
        assert_eq!(registry.len(), 2);

        let snapshot = registry.snapshot();
        registry.clear();
        // Old snapshots do not observe later mutation.
        assert_eq!(snapshot.len(), 2);
        assert!(registry.is_empty());
    }

    #[test]
    fn any_colliding_identity_field_is_rejected_atomically() {
        let registry = DatabaseRegistry::new();
        let original = Database::random("a");
        let client_access_key = original.client_access_key.clone();
        registry.add(original).expect("add");

        let mut clash = Database::random("b");
        clash.client_access_key = client_access_key.clone();
        let err = registry.add(clash).expect_err("collision must fail");
        assert_eq!(
            err,
            StoreError::DuplicateKey {
                field: KeyField::ClientAccessKey,
                value: client_access_key,
            }
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn duplicate_name_names_the_field() {
        let registry = DatabaseRegistry::new();
        registry.add(Database::random("same")).expect("add");
        let err = registry
            .add(Database::random("same"))
            .expect_err("duplicate name");
        assert!(matches!(
            err,
            StoreError::DuplicateKey {
                field: KeyField::DatabaseName,
                ..
            }
        ));
    }

    #[test]
    fn remove_unknown_database_fails() {
        let registry = DatabaseRegistry::new();
        assert_eq!(
            registry.remove("missing").expect_err("absent"),
            StoreError::NotFound
        );

        registry
            .add(Database::new(
                "known", "sak", "ssk", "cak", "csk",
                DatabaseState::Working,
            ))
            .expect("add");
        let removed = registry.remove("known").expect("remove");
        assert_eq!(removed.database_name, "known");
        assert!(registry.is_empty());
    }
}
