use crate::domain::{EvaluationRequest, PiRecord, Supplier, TeamMember};
use crate::foundation::TrackerError;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Document store the tracker runs against.
///
/// Implementations are shared across request handlers, so every method takes
/// `&self` and synchronizes internally. Apart from `increment_counter`,
/// mutations are last-write-wins with no optimistic locking; concurrent
/// edits to the same record may silently overwrite one another.
pub trait Storage: Send + Sync {
    /// Atomic increment-and-fetch on the named counter.
    ///
    /// This is the one operation where a race is a correctness bug: the
    /// increment and the read must happen as a single operation under the
    /// store's synchronization, never as a read-then-write pair. A missing
    /// counter record is created with seq=0 before incrementing.
    fn increment_counter(&self, name: &str) -> Result<u64>;
    fn get_counter(&self, name: &str) -> Result<u64>;
    fn set_counter(&self, name: &str, value: u64) -> Result<()>;

    /// Upsert: insert on first write, replace on subsequent writes.
    fn put_request(&self, record: EvaluationRequest) -> Result<()>;
    fn get_request(&self, id: &str) -> Result<Option<EvaluationRequest>>;
    /// Returns `Ok(true)` when a record was removed, `Ok(false)` when the id
    /// did not resolve.
    fn delete_request(&self, id: &str) -> Result<bool>;
    fn list_requests(&self) -> Result<Vec<EvaluationRequest>>;
    /// Removes every request; returns how many were removed.
    fn delete_all_requests(&self) -> Result<usize>;

    fn insert_supplier(&self, supplier: Supplier) -> Result<()>;
    fn list_suppliers(&self) -> Result<Vec<Supplier>>;

    fn upsert_team_member(&self, member: TeamMember) -> Result<()>;
    fn get_team_member(&self, name: &str) -> Result<Option<TeamMember>>;
    fn list_team_members(&self) -> Result<Vec<TeamMember>>;

    fn insert_pi_record(&self, record: PiRecord) -> Result<()>;
    fn list_pi_records(&self) -> Result<Vec<PiRecord>>;

    fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
