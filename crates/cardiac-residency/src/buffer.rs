//! The [`DualBuffer`] type and its freshness state.

use std::fmt;

use tracing::trace;

use crate::stats::TransferStats;

/// One of the two address spaces a [`DualBuffer`] can live in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemorySide {
    /// Host (CPU) memory.
    Host,
    /// Accelerator memory.
    Device,
}

impl MemorySide {
    /// The opposite side.
    pub fn other(self) -> Self {
        match self {
            Self::Host => Self::Device,
            Self::Device => Self::Host,
        }
    }
}

impl fmt::Display for MemorySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Device => write!(f, "device"),
        }
    }
}

/// Which side(s) of a [`DualBuffer`] hold current data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Freshness {
    /// Only the host copy is current.
    Host,
    /// Only the device copy is current.
    Device,
    /// Both copies are identical.
    Both,
}

impl Freshness {
    /// Whether `side` holds current data.
    pub fn is_fresh_on(self, side: MemorySide) -> bool {
        matches!(
            (self, side),
            (Self::Both, _) | (Self::Host, MemorySide::Host) | (Self::Device, MemorySide::Device)
        )
    }

    fn only(side: MemorySide) -> Self {
        match side {
            MemorySide::Host => Self::Host,
            MemorySide::Device => Self::Device,
        }
    }
}

/// An owned array with a host copy and a lazily allocated device copy.
///
/// # Contract
///
/// - [`read_on`](Self::read_on) returns an up-to-date view of the requested
///   side, copying from the other side first if it is the fresher one.
/// - [`modify_on`](Self::modify_on) does the same, then marks the requested
///   side as the sole source of truth. Use it for partial updates.
/// - [`overwrite_on`](Self::overwrite_on) skips the staleness copy and
///   marks the side authoritative. The caller must write every element.
///
/// Transfers happen only on these state transitions, never speculatively.
/// All acquisition methods take `&mut self`; exclusive access is enforced
/// by the borrow checker rather than detected at runtime.
pub struct DualBuffer<T> {
    label: &'static str,
    host: Vec<T>,
    device: Vec<T>,
    freshness: Freshness,
    stats: TransferStats,
}

impl<T: Copy + Default> DualBuffer<T> {
    /// Wrap host data. The host side starts as the only fresh copy.
    ///
    /// `label` names the buffer in trace output.
    pub fn from_host(label: &'static str, data: Vec<T>) -> Self {
        Self {
            label,
            host: data,
            device: Vec::new(),
            freshness: Freshness::Host,
            stats: TransferStats::default(),
        }
    }

    /// A host-resident buffer of `len` default-valued elements.
    pub fn zeroed(label: &'static str, len: usize) -> Self {
        Self::from_host(label, vec![T::default(); len])
    }

    /// Immutable, up-to-date view of `side`.
    pub fn read_on(&mut self, side: MemorySide) -> &[T] {
        self.sync_to(side);
        self.side(side)
    }

    /// Mutable, up-to-date view of `side`; `side` becomes the only fresh copy.
    pub fn modify_on(&mut self, side: MemorySide) -> &mut [T] {
        self.sync_to(side);
        self.freshness = Freshness::only(side);
        self.side_mut(side)
    }

    /// Mutable view of `side` without bringing it up to date first.
    ///
    /// Contents of a stale side are unspecified; every element must be
    /// written before the next read.
    pub fn overwrite_on(&mut self, side: MemorySide) -> &mut [T] {
        self.ensure_allocated(side);
        self.freshness = Freshness::only(side);
        self.side_mut(side)
    }

    /// Shorthand for `read_on(MemorySide::Host)`.
    pub fn read_on_host(&mut self) -> &[T] {
        self.read_on(MemorySide::Host)
    }

    /// Shorthand for `read_on(MemorySide::Device)`.
    pub fn read_on_device(&mut self) -> &[T] {
        self.read_on(MemorySide::Device)
    }

    /// Shorthand for `modify_on(MemorySide::Host)`.
    pub fn modify_on_host(&mut self) -> &mut [T] {
        self.modify_on(MemorySide::Host)
    }

    /// Shorthand for `modify_on(MemorySide::Device)`.
    pub fn modify_on_device(&mut self) -> &mut [T] {
        self.modify_on(MemorySide::Device)
    }

    fn sync_to(&mut self, side: MemorySide) {
        if self.freshness.is_fresh_on(side) {
            return;
        }
        self.ensure_allocated(side);
        match side {
            MemorySide::Device => self.device.copy_from_slice(&self.host),
            MemorySide::Host => self.host.copy_from_slice(&self.device),
        }
        self.stats.record(side, self.host.len());
        trace!(
            buffer = self.label,
            from = %side.other(),
            to = %side,
            elements = self.host.len(),
            "residency transfer"
        );
        self.freshness = Freshness::Both;
    }

    fn ensure_allocated(&mut self, side: MemorySide) {
        if side == MemorySide::Device && self.device.len() != self.host.len() {
            self.device = vec![T::default(); self.host.len()];
        }
    }
}

impl<T> DualBuffer<T> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.host.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.host.is_empty()
    }

    /// Current freshness state.
    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// Whether `side` currently holds up-to-date data.
    pub fn is_fresh_on(&self, side: MemorySide) -> bool {
        self.freshness.is_fresh_on(side)
    }

    /// Whether device memory has been allocated yet.
    pub fn is_device_allocated(&self) -> bool {
        !self.device.is_empty() || self.host.is_empty()
    }

    /// Transfers performed so far.
    pub fn stats(&self) -> TransferStats {
        self.stats
    }

    fn side(&self, side: MemorySide) -> &[T] {
        match side {
            MemorySide::Host => &self.host,
            MemorySide::Device => &self.device,
        }
    }

    fn side_mut(&mut self, side: MemorySide) -> &mut [T] {
        match side {
            MemorySide::Host => &mut self.host,
            MemorySide::Device => &mut self.device,
        }
    }
}

impl<T> fmt::Debug for DualBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualBuffer")
            .field("label", &self.label)
            .field("len", &self.host.len())
            .field("freshness", &self.freshness)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_fresh_on_host_without_device_allocation() {
        let buf = DualBuffer::from_host("v", vec![1.0f64, 2.0, 3.0]);
        assert_eq!(buf.freshness(), Freshness::Host);
        assert!(!buf.is_device_allocated());
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn read_on_device_copies_once() {
        let mut buf = DualBuffer::from_host("v", vec![1.0f64, 2.0, 3.0]);
        assert_eq!(buf.read_on_device(), &[1.0, 2.0, 3.0]);
        assert_eq!(buf.freshness(), Freshness::Both);
        assert_eq!(buf.read_on_device(), &[1.0, 2.0, 3.0]);
        assert_eq!(buf.read_on_host(), &[1.0, 2.0, 3.0]);

        let stats = buf.stats();
        assert_eq!(stats.to_device, 1);
        assert_eq!(stats.to_host, 0);
        assert_eq!(stats.elements_to_device, 3);
    }

    #[test]
    fn modify_on_device_makes_host_stale() {
        let mut buf = DualBuffer::from_host("v", vec![0i32; 4]);
        buf.modify_on_device()[2] = 7;
        assert_eq!(buf.freshness(), Freshness::Device);
        assert!(!buf.is_fresh_on(MemorySide::Host));

        assert_eq!(buf.read_on_host(), &[0, 0, 7, 0]);
        assert_eq!(buf.freshness(), Freshness::Both);
        assert_eq!(buf.stats().to_device, 1);
        assert_eq!(buf.stats().to_host, 1);
    }

    #[test]
    fn repeated_device_writes_do_not_transfer() {
        let mut buf = DualBuffer::<f64>::zeroed("v", 8);
        for step in 0..5 {
            buf.modify_on_device()[0] = step as f64;
        }
        // Only the initial host→device staging of the zeroed contents.
        assert_eq!(buf.stats().total(), 1);
        assert_eq!(buf.read_on_host()[0], 4.0);
        assert_eq!(buf.stats().total(), 2);
    }

    #[test]
    fn overwrite_skips_staleness_copy() {
        let mut buf = DualBuffer::from_host("dv", vec![5.0f64; 4]);
        let dev = buf.overwrite_on(MemorySide::Device);
        dev.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.stats().total(), 0);
        assert_eq!(buf.freshness(), Freshness::Device);
        assert_eq!(buf.read_on_host(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.stats().to_host, 1);
    }

    #[test]
    fn host_write_after_device_write_pulls_back_first() {
        let mut buf = DualBuffer::from_host("v", vec![0u8; 3]);
        buf.modify_on_device()[0] = 1;
        buf.modify_on_host()[1] = 2;
        assert_eq!(buf.freshness(), Freshness::Host);
        assert_eq!(buf.read_on_device(), &[1, 2, 0]);
    }

    #[test]
    fn host_read_resolves_device_data() {
        let mut buf = DualBuffer::from_host("v", vec![0i64; 2]);
        buf.modify_on_device()[1] = 9;
        assert_eq!(buf.read_on_host(), &[0, 9]);
        assert_eq!(buf.freshness(), Freshness::Both);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Read(bool),
        Modify(bool, usize, i32),
        Overwrite(bool, i32),
    }

    fn side(device: bool) -> MemorySide {
        if device {
            MemorySide::Device
        } else {
            MemorySide::Host
        }
    }

    fn arb_op(len: usize) -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<bool>().prop_map(Op::Read),
            (any::<bool>(), 0..len, any::<i32>()).prop_map(|(d, i, v)| Op::Modify(d, i, v)),
            (any::<bool>(), any::<i32>()).prop_map(|(d, v)| Op::Overwrite(d, v)),
        ]
    }

    proptest! {
        #[test]
        fn reads_always_see_last_write(ops in proptest::collection::vec(arb_op(6), 1..40)) {
            let mut model = vec![0i32; 6];
            let mut buf = DualBuffer::from_host("model", model.clone());

            for op in ops {
                match op {
                    Op::Read(d) => {
                        prop_assert_eq!(buf.read_on(side(d)), model.as_slice());
                    }
                    Op::Modify(d, i, v) => {
                        buf.modify_on(side(d))[i] = v;
                        model[i] = v;
                    }
                    Op::Overwrite(d, v) => {
                        buf.overwrite_on(side(d)).fill(v);
                        model.fill(v);
                    }
                }
                let fresh_sides = [MemorySide::Host, MemorySide::Device]
                    .iter()
                    .filter(|&&s| buf.is_fresh_on(s))
                    .count();
                prop_assert!(fresh_sides >= 1);
            }
            prop_assert_eq!(buf.read_on_host(), model.as_slice());
        }
    }
}
