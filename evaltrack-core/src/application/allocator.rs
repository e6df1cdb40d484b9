use crate::foundation::{now_millis, ReferenceNumber, TrackerError, REQUEST_COUNTER_SERIES};
use crate::infrastructure::storage::Storage;
use log::{info, warn};
use std::sync::Arc;

/// Hands out unique sequential reference numbers and keeps them dense after
/// deletions.
///
/// Allocation goes through the store's atomic increment-and-fetch; the
/// allocator itself holds no counter state, so multiple service instances
/// sharing one store stay consistent.
#[derive(Clone)]
pub struct ReferenceAllocator {
    storage: Arc<dyn Storage>,
}

impl ReferenceAllocator {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Issues the next reference number in the series.
    pub fn allocate(&self) -> Result<ReferenceNumber, TrackerError> {
        let seq = self.storage.increment_counter(REQUEST_COUNTER_SERIES)?;
        Ok(ReferenceNumber::from_seq(seq))
    }

    /// Startup recovery: aligns the counter with the highest reference
    /// number already persisted, so restarts against manually seeded data do
    /// not mint colliding references. Returns the recovered sequence value.
    ///
    /// This scan runs once at process start. It must never be used as the
    /// per-allocation strategy: find-max-plus-one races under concurrent
    /// creation, which is exactly what `allocate` exists to avoid.
    pub fn initialize(&self) -> Result<u64, TrackerError> {
        let highest = self
            .storage
            .list_requests()?
            .iter()
            .filter_map(|record| record.reference_number.numeric())
            .max()
            .unwrap_or(0);
        self.storage.set_counter(REQUEST_COUNTER_SERIES, highest)?;
        info!("reference counter initialized series={} seq={}", REQUEST_COUNTER_SERIES, highest);
        Ok(highest)
    }

    /// Reassigns `0001..N` to the surviving requests in creation order and
    /// sets the counter to `N`. Called after a single deletion.
    ///
    /// This is a full O(N) rewrite of the collection. Acceptable at the
    /// volumes this service sees; revisit before the dataset grows past a
    /// few thousand records.
    pub fn renumber_survivors(&self) -> Result<usize, TrackerError> {
        let mut survivors = self.storage.list_requests()?;
        survivors.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));

        let total = survivors.len();
        let now = now_millis();
        for (index, mut record) in survivors.into_iter().enumerate() {
            let reassigned = ReferenceNumber::from_seq(index as u64 + 1);
            if record.reference_number != reassigned {
                record.reference_number = reassigned;
                record.last_updated = now;
                self.storage.put_request(record)?;
            }
        }
        self.storage.set_counter(REQUEST_COUNTER_SERIES, total as u64)?;
        info!("renumbered surviving requests count={}", total);
        Ok(total)
    }

    /// Administrative bulk reset: removes every request and zeroes the
    /// counter. Returns how many records were deleted.
    pub fn reset_all(&self) -> Result<usize, TrackerError> {
        let removed = self.storage.delete_all_requests()?;
        self.storage.set_counter(REQUEST_COUNTER_SERIES, 0)?;
        warn!("bulk reset deleted_requests={} counter=0", removed);
        Ok(removed)
    }

    /// Zeroes the counter WITHOUT touching the stored requests.
    ///
    /// Hazard: while requests survive, subsequent allocations will mint
    /// reference numbers that duplicate live records. Kept for parity with
    /// the legacy admin endpoint; callers must require explicit
    /// confirmation before invoking it.
    pub fn reset_counter_only(&self) -> Result<(), TrackerError> {
        self.storage.set_counter(REQUEST_COUNTER_SERIES, 0)?;
        warn!("reference counter reset to 0 while requests remain; duplicate references now possible");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EvaluationRequest, RequestDraft};
    use crate::infrastructure::storage::MemoryStorage;
    use std::thread;

    fn storage() -> Arc<dyn Storage> {
        Arc::new(MemoryStorage::new())
    }

    fn seed(storage: &Arc<dyn Storage>, id: &str, seq: u64, timestamp: u64) {
        let draft = RequestDraft { email: "buyer@example.com".into(), name: "Buyer".into(), ..Default::default() };
        let record = EvaluationRequest::from_draft(id.to_string(), ReferenceNumber::from_seq(seq), timestamp, draft);
        storage.put_request(record).unwrap();
    }

    #[test]
    fn test_allocate_is_sequential_and_padded() {
        let allocator = ReferenceAllocator::new(storage());
        assert_eq!(allocator.allocate().unwrap().as_str(), "0001");
        assert_eq!(allocator.allocate().unwrap().as_str(), "0002");
        assert_eq!(allocator.allocate().unwrap().as_str(), "0003");
    }

    #[test]
    fn test_concurrent_allocation_has_no_gaps_or_duplicates() {
        let allocator = ReferenceAllocator::new(storage());
        let mut handles = Vec::new();
        for _ in 0..4 {
            let allocator = allocator.clone();
            handles.push(thread::spawn(move || {
                (0..25).map(|_| allocator.allocate().unwrap()).collect::<Vec<ReferenceNumber>>()
            }));
        }
        let mut issued: Vec<ReferenceNumber> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        issued.sort();
        issued.dedup();
        assert_eq!(issued.len(), 100);
        assert_eq!(issued.first().unwrap().as_str(), "0001");
        assert_eq!(issued.last().unwrap().as_str(), "0100");
    }

    #[test]
    fn test_initialize_resumes_after_seeded_data() {
        let storage = storage();
        seed(&storage, "a", 3, 10);
        seed(&storage, "b", 7, 20);

        let allocator = ReferenceAllocator::new(Arc::clone(&storage));
        assert_eq!(allocator.initialize().unwrap(), 7);
        assert_eq!(allocator.allocate().unwrap().as_str(), "0008");
    }

    #[test]
    fn test_initialize_with_empty_store_starts_at_one() {
        let allocator = ReferenceAllocator::new(storage());
        assert_eq!(allocator.initialize().unwrap(), 0);
        assert_eq!(allocator.allocate().unwrap().as_str(), "0001");
    }

    #[test]
    fn test_renumber_closes_the_gap_in_creation_order() {
        let storage = storage();
        for (id, seq) in [("a", 1), ("b", 2), ("c", 3), ("d", 4), ("e", 5)] {
            seed(&storage, id, seq, seq * 100);
        }
        storage.delete_request("b").unwrap();

        let allocator = ReferenceAllocator::new(Arc::clone(&storage));
        assert_eq!(allocator.renumber_survivors().unwrap(), 4);

        let mut survivors = storage.list_requests().unwrap();
        survivors.sort_by_key(|r| r.timestamp);
        let references: Vec<&str> = survivors.iter().map(|r| r.reference_number.as_str()).collect();
        assert_eq!(references, vec!["0001", "0002", "0003", "0004"]);
        // Creation order preserved: "c" (formerly 0003) is now 0002.
        assert_eq!(survivors[1].id, "c");
        assert_eq!(storage.get_counter(REQUEST_COUNTER_SERIES).unwrap(), 4);
    }

    #[test]
    fn test_reset_all_clears_requests_and_counter() {
        let storage = storage();
        seed(&storage, "a", 1, 10);
        let allocator = ReferenceAllocator::new(Arc::clone(&storage));
        allocator.allocate().unwrap();

        assert_eq!(allocator.reset_all().unwrap(), 1);
        assert!(storage.list_requests().unwrap().is_empty());
        assert_eq!(allocator.allocate().unwrap().as_str(), "0001");
    }

    #[test]
    fn test_reset_counter_only_leaves_requests_in_place() {
        let storage = storage();
        seed(&storage, "a", 1, 10);
        let allocator = ReferenceAllocator::new(Arc::clone(&storage));
        allocator.initialize().unwrap();

        allocator.reset_counter_only().unwrap();
        assert_eq!(storage.list_requests().unwrap().len(), 1);
        // The documented hazard: the next allocation duplicates "0001".
        assert_eq!(allocator.allocate().unwrap().as_str(), "0001");
    }
}
