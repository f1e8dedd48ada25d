//! Slot+generation storage for graph-owned objects.
//!
//! Destroyed objects leave their slot behind with a bumped generation, so
//! a key minted for the old object no longer resolves. Removing twice is a
//! safe no-op (returns `None`).

struct Slot<T> {
    generation: u32,
    data: Option<T>,
}

/// Generational table mapping `(slot, generation)` pairs to owned values.
///
/// Reuses slots via a free list.
pub(crate) struct SlotTable<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<u32>,
}

impl<T> SlotTable<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Store a value and return its `(slot, generation)`.
    pub(crate) fn insert(&mut self, value: T) -> (u32, u32) {
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.data = Some(value);
            (idx, slot.generation)
        } else {
            let idx = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                data: Some(value),
            });
            (idx, 0)
        }
    }

    pub(crate) fn get(&self, slot: u32, generation: u32) -> Option<&T> {
        let s = self.slots.get(slot as usize)?;
        if s.generation != generation {
            return None;
        }
        s.data.as_ref()
    }

    pub(crate) fn get_mut(&mut self, slot: u32, generation: u32) -> Option<&mut T> {
        let s = self.slots.get_mut(slot as usize)?;
        if s.generation != generation {
            return None;
        }
        s.data.as_mut()
    }

    /// Take the value out and retire the key.
    ///
    /// A slot whose generation wraps back to 0 is never recycled, so a key
    /// from the slot's first life cannot resolve again.
    pub(crate) fn remove(&mut self, slot: u32, generation: u32) -> Option<T> {
        let s = self.slots.get_mut(slot as usize)?;
        if s.generation != generation {
            return None;
        }
        let value = s.data.take()?;
        s.generation = s.generation.wrapping_add(1);
        if s.generation != 0 {
            self.free_list.push(slot);
        }
        Some(value)
    }

    /// Live entries as `(slot, generation, value)`.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.data.as_ref().map(|d| (i as u32, s.generation, d)))
    }

    /// Live entries, mutably.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (u32, u32, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| {
                let generation = s.generation;
                s.data.as_mut().map(|d| (i as u32, generation, d))
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.data.is_some()).count()
    }
}
