use std::sync::atomic::AtomicU64;

/// A stable identifier for an object participating in binding.
///
/// Assigned once per object from a monotonically increasing counter and
/// never reused; it is the key half of every model entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Hash)]
pub struct ObjId(u64);

impl ObjId {
    pub(crate) fn next() -> ObjId {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        ObjId(COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed))
    }
}
