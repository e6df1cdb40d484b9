use crate::domain::{EvaluationRequest, PiRecord, Supplier, TeamMember};
use crate::foundation::TrackerError;
use crate::infrastructure::storage::Storage;
use crate::storage_err;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default, Serialize, Deserialize)]
struct DbState {
    #[serde(default)]
    counters: HashMap<String, u64>,
    #[serde(default)]
    requests: HashMap<String, EvaluationRequest>,
    #[serde(default)]
    suppliers: Vec<Supplier>,
    #[serde(default)]
    team_members: HashMap<String, TeamMember>,
    #[serde(default)]
    pi_records: Vec<PiRecord>,
}

/// Single-file JSON document store.
///
/// The whole state is held in memory behind one mutex and rewritten to disk
/// after each mutation, so the counter increment and its persistence happen
/// under the same lock. Adequate for the small internal-team volumes this
/// service sees; not a general-purpose database.
pub struct JsonFileStorage {
    path: PathBuf,
    state: Mutex<DbState>,
}

impl JsonFileStorage {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TrackerError> {
        let path = path.into();
        let state = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|err| storage_err!("read db file", err))?;
            serde_json::from_str(&raw)?
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| storage_err!("create data dir", err))?;
            }
            DbState::default()
        };
        info!("opened json storage path={} requests={}", path.display(), state.requests.len());
        Ok(Self { path, state: Mutex::new(state) })
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, DbState>, TrackerError> {
        self.state.lock().map_err(|_| TrackerError::StorageError {
            operation: "json storage lock".to_string(),
            details: "poisoned".to_string(),
        })
    }

    /// Writes via a temp file + rename so a crash mid-write never leaves a
    /// truncated database behind.
    fn persist(&self, state: &DbState) -> Result<(), TrackerError> {
        let raw = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|err| storage_err!("write db file", err))?;
        fs::rename(&tmp, &self.path).map_err(|err| storage_err!("rename db file", err))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonFileStorage {
    fn increment_counter(&self, name: &str) -> Result<u64, TrackerError> {
        let mut state = self.lock_state()?;
        let seq = state.counters.entry(name.to_string()).or_insert(0);
        *seq += 1;
        let value = *seq;
        self.persist(&state)?;
        Ok(value)
    }

    fn get_counter(&self, name: &str) -> Result<u64, TrackerError> {
        Ok(self.lock_state()?.counters.get(name).copied().unwrap_or(0))
    }

    fn set_counter(&self, name: &str, value: u64) -> Result<(), TrackerError> {
        let mut state = self.lock_state()?;
        state.counters.insert(name.to_string(), value);
        self.persist(&state)
    }

    fn put_request(&self, record: EvaluationRequest) -> Result<(), TrackerError> {
        let mut state = self.lock_state()?;
        state.requests.insert(record.id.clone(), record);
        self.persist(&state)
    }

    fn get_request(&self, id: &str) -> Result<Option<EvaluationRequest>, TrackerError> {
        Ok(self.lock_state()?.requests.get(id).cloned())
    }

    fn delete_request(&self, id: &str) -> Result<bool, TrackerError> {
        let mut state = self.lock_state()?;
        let removed = state.requests.remove(id).is_some();
        if removed {
            self.persist(&state)?;
        }
        Ok(removed)
    }

    fn list_requests(&self) -> Result<Vec<EvaluationRequest>, TrackerError> {
        Ok(self.lock_state()?.requests.values().cloned().collect())
    }

    fn delete_all_requests(&self) -> Result<usize, TrackerError> {
        let mut state = self.lock_state()?;
        let removed = state.requests.len();
        state.requests.clear();
        self.persist(&state)?;
        Ok(removed)
    }

    fn insert_supplier(&self, supplier: Supplier) -> Result<(), TrackerError> {
        let mut state = self.lock_state()?;
        state.suppliers.push(supplier);
        self.persist(&state)
    }

    fn list_suppliers(&self) -> Result<Vec<Supplier>, TrackerError> {
        Ok(self.lock_state()?.suppliers.clone())
    }

    fn upsert_team_member(&self, member: TeamMember) -> Result<(), TrackerError> {
        let mut state = self.lock_state()?;
        state.team_members.insert(member.name.clone(), member);
        self.persist(&state)
    }

    fn get_team_member(&self, name: &str) -> Result<Option<TeamMember>, TrackerError> {
        Ok(self.lock_state()?.team_members.get(name).cloned())
    }

    fn list_team_members(&self) -> Result<Vec<TeamMember>, TrackerError> {
        Ok(self.lock_state()?.team_members.values().cloned().collect())
    }

    fn insert_pi_record(&self, record: PiRecord) -> Result<(), TrackerError> {
        let mut state = self.lock_state()?;
        state.pi_records.push(record);
        self.persist(&state)
    }

    fn list_pi_records(&self) -> Result<Vec<PiRecord>, TrackerError> {
        Ok(self.lock_state()?.pi_records.clone())
    }

    fn health_check(&self) -> Result<(), TrackerError> {
        self.lock_state().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RequestDraft;
    use crate::foundation::ReferenceNumber;
    use tempfile::TempDir;

    fn sample_request(id: &str, seq: u64) -> EvaluationRequest {
        let draft = RequestDraft { email: "buyer@example.com".into(), name: "Buyer".into(), ..Default::default() };
        EvaluationRequest::from_draft(id.to_string(), ReferenceNumber::from_seq(seq), seq, draft)
    }

    #[test]
    fn test_state_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("evaltrack-db.json");

        let storage = JsonFileStorage::open(&path).unwrap();
        storage.put_request(sample_request("a", 1)).unwrap();
        assert_eq!(storage.increment_counter("requestCounter").unwrap(), 1);
        drop(storage);

        let storage = JsonFileStorage::open(&path).unwrap();
        assert!(storage.get_request("a").unwrap().is_some());
        assert_eq!(storage.get_counter("requestCounter").unwrap(), 1);
        assert_eq!(storage.increment_counter("requestCounter").unwrap(), 2);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        let storage = JsonFileStorage::open(dir.path().join("fresh.json")).unwrap();
        assert!(storage.list_requests().unwrap().is_empty());
        assert_eq!(storage.get_counter("requestCounter").unwrap(), 0);
    }
}
