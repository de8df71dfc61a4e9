//! Logical axis handles.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;
use smallvec::SmallVec;

/// Opaque handle naming one logical axis of a compiled plan.
///
/// Handles are allocated once per distinct input label and are only
/// meaningful together with the plan that allocated them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisHandle(u32);

impl AxisHandle {
    /// Creates a handle from its allocation index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the allocation index of this handle.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Parses the `axis#N` form written by `Display`.
    pub fn from_id(text: &str) -> Option<Self> {
        text.strip_prefix("axis#")?.parse().ok().map(Self)
    }
}

impl fmt::Display for AxisHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "axis#{}", self.0)
    }
}

/// Ordered list of axis handles, one per physical dimension.
pub type AxisList = SmallVec<[AxisHandle; 8]>;

/// Bijection between labels and the handles allocated for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisRegistry {
    labels: Vec<String>,
    by_label: HashMap<String, AxisHandle>,
}

impl AxisRegistry {
    /// Allocates one handle per label, in iteration order.
    ///
    /// Repeated labels reuse the handle allocated on first appearance.
    pub fn allocate<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut registry = Self::default();
        for label in labels {
            registry.intern(label);
        }
        registry
    }

    fn intern(&mut self, label: &str) -> AxisHandle {
        if let Some(&handle) = self.by_label.get(label) {
            return handle;
        }
        let handle = AxisHandle::new(self.labels.len() as u32);
        self.labels.push(String::from(label));
        self.by_label.insert(String::from(label), handle);
        handle
    }

    /// Returns the handle bound to a label.
    pub fn handle(&self, label: &str) -> Option<AxisHandle> {
        self.by_label.get(label).copied()
    }

    /// Returns the label a handle was allocated for.
    pub fn label(&self, handle: AxisHandle) -> Option<&str> {
        self.labels.get(handle.index()).map(String::as_str)
    }

    /// Returns every handle in allocation order.
    pub fn handles(&self) -> AxisList {
        (0..self.labels.len() as u32).map(AxisHandle::new).collect()
    }

    /// Returns the number of allocated handles.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no handles were allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Renders a handle list with labels, falling back to the handle's id.
    pub fn describe(&self, handles: &[AxisHandle]) -> String {
        let mut out = String::new();
        for (i, &handle) in handles.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match self.label(handle) {
                Some(label) => out.push_str(label),
                None => out.push_str(&alloc::format!("{}", handle)),
            }
        }
        out
    }

    /// Replaces each `axis#N` in a comma-separated list with its label.
    ///
    /// Ids this registry did not allocate and plain names are kept.
    pub fn relabel(&self, text: &str) -> String {
        text.split(", ")
            .map(|part| AxisHandle::from_id(part).and_then(|h| self.label(h)).unwrap_or(part))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
