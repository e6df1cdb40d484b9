use crate::domain::{EvaluationRequest, PiRecord, Supplier, TeamMember};
use crate::foundation::TrackerError;
use crate::infrastructure::storage::Storage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

struct MemoryInner {
    counters: HashMap<String, u64>,
    requests: HashMap<String, EvaluationRequest>,
    suppliers: Vec<Supplier>,
    team_members: HashMap<String, TeamMember>,
    pi_records: Vec<PiRecord>,
}

impl MemoryInner {
    fn new() -> Self {
        Self {
            counters: HashMap::new(),
            requests: HashMap::new(),
            suppliers: Vec::new(),
            team_members: HashMap::new(),
            pi_records: Vec::new(),
        }
    }
}

/// Non-persistent store used by tests and ephemeral deployments.
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(MemoryInner::new())) }
    }

    fn lock_inner(&self) -> Result<MutexGuard<'_, MemoryInner>, TrackerError> {
        self.inner.lock().map_err(|_| TrackerError::StorageError {
            operation: "memory storage lock".to_string(),
            details: "poisoned".to_string(),
        })
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn increment_counter(&self, name: &str) -> Result<u64, TrackerError> {
        // Single find-and-increment under the lock; callers never observe an
        // intermediate value.
        let mut inner = self.lock_inner()?;
        let seq = inner.counters.entry(name.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }

    fn get_counter(&self, name: &str) -> Result<u64, TrackerError> {
        Ok(self.lock_inner()?.counters.get(name).copied().unwrap_or(0))
    }

    fn set_counter(&self, name: &str, value: u64) -> Result<(), TrackerError> {
        self.lock_inner()?.counters.insert(name.to_string(), value);
        Ok(())
    }

    fn put_request(&self, record: EvaluationRequest) -> Result<(), TrackerError> {
        self.lock_inner()?.requests.insert(record.id.clone(), record);
        Ok(())
    }

    fn get_request(&self, id: &str) -> Result<Option<EvaluationRequest>, TrackerError> {
        Ok(self.lock_inner()?.requests.get(id).cloned())
    }

    fn delete_request(&self, id: &str) -> Result<bool, TrackerError> {
        Ok(self.lock_inner()?.requests.remove(id).is_some())
    }

    fn list_requests(&self) -> Result<Vec<EvaluationRequest>, TrackerError> {
        Ok(self.lock_inner()?.requests.values().cloned().collect())
    }

    fn delete_all_requests(&self) -> Result<usize, TrackerError> {
        let mut inner = self.lock_inner()?;
        let removed = inner.requests.len();
        inner.requests.clear();
        Ok(removed)
    }

    fn insert_supplier(&self, supplier: Supplier) -> Result<(), TrackerError> {
        self.lock_inner()?.suppliers.push(supplier);
        Ok(())
    }

    fn list_suppliers(&self) -> Result<Vec<Supplier>, TrackerError> {
        Ok(self.lock_inner()?.suppliers.clone())
    }

    fn upsert_team_member(&self, member: TeamMember) -> Result<(), TrackerError> {
        self.lock_inner()?.team_members.insert(member.name.clone(), member);
        Ok(())
    }

    fn get_team_member(&self, name: &str) -> Result<Option<TeamMember>, TrackerError> {
        Ok(self.lock_inner()?.team_members.get(name).cloned())
    }

    fn list_team_members(&self) -> Result<Vec<TeamMember>, TrackerError> {
        Ok(self.lock_inner()?.team_members.values().cloned().collect())
    }

    fn insert_pi_record(&self, record: PiRecord) -> Result<(), TrackerError> {
        self.lock_inner()?.pi_records.push(record);
        Ok(())
    }

    fn list_pi_records(&self) -> Result<Vec<PiRecord>, TrackerError> {
        Ok(self.lock_inner()?.pi_records.clone())
    }
}
