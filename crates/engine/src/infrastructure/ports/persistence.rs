use super::PersistenceError;

/// Host key-value blob store.
#[cfg_attr(test, mockall::automock)]
pub trait PersistencePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}
