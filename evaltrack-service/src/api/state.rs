use evaltrack_core::application::{LifecycleTracker, ReferenceAllocator};
use evaltrack_core::infrastructure::blobs::BlobStore;
use evaltrack_core::infrastructure::storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub blobs: Arc<dyn BlobStore>,
    pub allocator: ReferenceAllocator,
    pub tracker: LifecycleTracker,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, blobs: Arc<dyn BlobStore>) -> Self {
        let allocator = ReferenceAllocator::new(Arc::clone(&storage));
        let tracker = LifecycleTracker::new(Arc::clone(&storage));
        Self { storage, blobs, allocator, tracker }
    }
}
