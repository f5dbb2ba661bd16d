use crate::domain::{AccountRecord, ConnectionParams, PersistenceError};

/// Port for connectivity checks against candidate settings.
pub trait DatabaseProbe {
    /// Try to open a connection with `params`. Never fails; errors yield `false`.
    fn probe(&self, params: &ConnectionParams) -> bool;
}

/// Port for saving the admin account.
pub trait AccountStore {
    fn create(&self, params: &ConnectionParams, record: &AccountRecord) -> Result<(), PersistenceError>;
}
