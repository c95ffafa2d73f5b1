//! Ordered light collection. Insertion order is draw order for the forward
//! path and priority order (newest wins) when the deferred buffer overflows.

use super::Light;

/// Stable handle to a registered light. Not reused within one registry
/// until its 32-bit counter wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LightId(u32);

impl LightId {
    pub fn index(&self) -> u32 {
        self.0
    }
}

/// Lights owned by the accumulation stage, addressed by `LightId`.
#[derive(Debug, Clone, Default)]
pub struct LightRegistry {
    entries: Vec<(LightId, Light)>,
    next_id: u32,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a light; it is drawn after every light already present.
    pub fn add(&mut self, light: Light) -> LightId {
        let id = LightId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push((id, light));
        id
    }

    /// Remove a light, preserving the order of the rest.
    pub fn remove(&mut self, id: LightId) -> Option<Light> {
        let pos = self.entries.iter().position(|(e, _)| *e == id)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn get(&self, id: LightId) -> Option<&Light> {
        self.entries.iter().find(|(e, _)| *e == id).map(|(_, l)| l)
    }

    pub fn get_mut(&mut self, id: LightId) -> Option<&mut Light> {
        self.entries
            .iter_mut()
            .find(|(e, _)| *e == id)
            .map(|(_, l)| l)
    }

    pub fn contains(&self, id: LightId) -> bool {
        self.get(id).is_some()
    }

    /// Number of registered lights, enabled or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn enabled_count(&self) -> usize {
        self.entries.iter().filter(|(_, l)| l.enabled).count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Lights in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.entries.iter().map(|(id, l)| (*id, l))
    }

    /// Enabled lights in insertion order.
    pub fn enabled(&self) -> impl Iterator<Item = (LightId, &Light)> {
        self.iter().filter(|(_, l)| l.enabled)
    }
}
