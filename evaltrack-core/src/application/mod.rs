mod allocator;
mod lifecycle;
mod stats;

pub use allocator::ReferenceAllocator;
pub use lifecycle::{CoarseStatusUpdate, DetailedStatusUpdate, FileSlot, LifecycleTracker};
pub use stats::{compute_member_stats, MemberStats};
