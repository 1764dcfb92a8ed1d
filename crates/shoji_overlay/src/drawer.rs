//! Drawer overlay (two named stacks, left and right)

use std::sync::{Arc, Mutex};

use crate::result::{deferred, Deferred, OverlayResult, Resolver};

/// Edge a drawer slides in from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawerSide {
    Left,
    #[default]
    Right,
}

/// Content of one open drawer.
#[derive(Clone, Debug)]
pub struct DrawerPayload {
    pub name: String,
    pub side: DrawerSide,
    pub options: serde_json::Value,
}

impl DrawerPayload {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            side: DrawerSide::default(),
            options: serde_json::Value::Null,
        }
    }

    pub fn side(mut self, side: DrawerSide) -> Self {
        self.side = side;
        self
    }

    pub fn options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }
}

struct Entry {
    payload: DrawerPayload,
    resolver: Resolver,
    /// Monotonic open order across both sides.
    seq: u64,
}

#[derive(Default)]
struct Inner {
    lefts: Vec<Entry>,
    rights: Vec<Entry>,
    next_seq: u64,
}

impl Inner {
    fn stack_mut(&mut self, side: DrawerSide) -> &mut Vec<Entry> {
        match side {
            DrawerSide::Left => &mut self.lefts,
            DrawerSide::Right => &mut self.rights,
        }
    }
}

/// Drawers stack per side; unqualified close removes the newest open drawer
/// across both sides (ties go to the right stack).
#[derive(Clone, Default)]
pub struct Drawers {
    inner: Arc<Mutex<Inner>>,
}

impl Drawers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, payload: DrawerPayload) -> Deferred {
        let (resolver, result) = deferred();
        let mut inner = self.inner.lock().unwrap();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        tracing::debug!(name = %payload.name, side = ?payload.side, "drawer opened");
        let side = payload.side;
        inner.stack_mut(side).push(Entry {
            payload,
            resolver,
            seq,
        });
        result
    }

    /// Close the newest drawer on either side with `Cancelled`.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        let left_seq = inner.lefts.last().map(|e| e.seq);
        let right_seq = inner.rights.last().map(|e| e.seq);
        let side = match (left_seq, right_seq) {
            (None, None) => return,
            (Some(_), None) => DrawerSide::Left,
            (None, Some(_)) => DrawerSide::Right,
            (Some(l), Some(r)) => {
                if l > r {
                    DrawerSide::Left
                } else {
                    DrawerSide::Right
                }
            }
        };
        if let Some(mut entry) = inner.stack_mut(side).pop() {
            tracing::debug!(name = %entry.payload.name, "drawer closed");
            entry.resolver.resolve(OverlayResult::Cancelled);
        }
    }

    /// Close the newest drawer with the given name, resolving `Cancelled`.
    pub fn close_named(&self, name: &str) {
        self.close_with(name, OverlayResult::Cancelled);
    }

    /// Close the newest drawer with the given name and an explicit result.
    pub fn close_with(&self, name: &str, result: impl Into<OverlayResult>) {
        let mut inner = self.inner.lock().unwrap();
        let mut found: Option<(DrawerSide, usize, u64)> = None;
        for (side, stack) in [
            (DrawerSide::Left, &inner.lefts),
            (DrawerSide::Right, &inner.rights),
        ] {
            for (index, entry) in stack.iter().enumerate() {
                if entry.payload.name == name
                    && found.map_or(true, |(_, _, seq)| entry.seq > seq)
                {
                    found = Some((side, index, entry.seq));
                }
            }
        }
        if let Some((side, index, _)) = found {
            let mut entry = inner.stack_mut(side).remove(index);
            tracing::debug!(name = %entry.payload.name, "drawer closed");
            entry.resolver.resolve(result.into());
        }
    }

    /// Close everything, newest first, resolving each `Cancelled`.
    pub fn close_all(&self) {
        let mut guard = self.inner.lock().unwrap();
        let inner = &mut *guard;
        let mut entries: Vec<Entry> = inner.lefts.drain(..).chain(inner.rights.drain(..)).collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.seq));
        for mut entry in entries {
            entry.resolver.resolve(OverlayResult::Cancelled);
        }
    }

    /// Find an open drawer by name. Returns its payload and position in the
    /// combined open order (oldest first).
    pub fn get(&self, name: &str) -> Option<(DrawerPayload, usize)> {
        let inner = self.inner.lock().unwrap();
        let mut all: Vec<&Entry> = inner.lefts.iter().chain(inner.rights.iter()).collect();
        all.sort_by_key(|e| e.seq);
        all.iter()
            .position(|e| e.payload.name == name)
            .map(|index| (all[index].payload.clone(), index))
    }

    pub fn lefts(&self) -> Vec<DrawerPayload> {
        self.inner
            .lock()
            .unwrap()
            .lefts
            .iter()
            .map(|e| e.payload.clone())
            .collect()
    }

    pub fn rights(&self) -> Vec<DrawerPayload> {
        self.inner
            .lock()
            .unwrap()
            .rights
            .iter()
            .map(|e| e.payload.clone())
            .collect()
    }

    pub fn is_open(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        !inner.lefts.is_empty() || !inner.rights.is_empty()
    }
}
