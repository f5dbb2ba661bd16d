use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::{AccountRecord, ConnectionParams, PersistenceError};
use crate::ports::{AccountStore, DatabaseProbe};

/// Probe and account store; probes succeed once `accept_after` failures have been served.
pub struct FakeDatabase {
    accept_after: Mutex<usize>,
    probes: Mutex<Vec<ConnectionParams>>,
    failures: Mutex<VecDeque<PersistenceError>>,
    records: Mutex<Vec<AccountRecord>>,
}

impl Default for FakeDatabase {
    fn default() -> Self {
        Self {
            accept_after: Mutex::new(0),
            probes: Mutex::new(Vec::new()),
            failures: Mutex::new(VecDeque::new()),
            records: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDatabase {
    pub fn accept_after(&self, failures: usize) {
        *self.accept_after.lock().unwrap() = failures;
    }

    pub fn fail_next_insert(&self, error: PersistenceError) {
        self.failures.lock().unwrap().push_back(error);
    }

    pub fn probe_count(&self) -> usize {
        self.probes.lock().unwrap().len()
    }

    pub fn records(&self) -> Vec<AccountRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl DatabaseProbe for FakeDatabase {
    fn probe(&self, params: &ConnectionParams) -> bool {
        let mut probes = self.probes.lock().unwrap();
        probes.push(params.clone());
        probes.len() > *self.accept_after.lock().unwrap()
    }
}

impl AccountStore for FakeDatabase {
    fn create(&self, _params: &ConnectionParams, record: &AccountRecord) -> Result<(), PersistenceError> {
        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}
