//! Slot storage for every entity of a session.
//!
//! Entities are addressed through generational [`Handle`]s, so a handle kept
//! across a removal can never alias whatever reuses the slot.  Groups
//! ("all hostiles", "all lasers") are derived on demand by kind.

use crate::entities::{Entity, KindTag};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

#[derive(Clone, Debug, Default)]
pub struct Arena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity) -> Handle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.entity = Some(entity);
            return Handle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            entity: Some(entity),
        });
        Handle {
            index,
            generation: 0,
        }
    }

    pub fn get(&self, handle: Handle) -> Option<&Entity> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entity> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    pub fn remove(&mut self, handle: Handle) -> Option<Entity> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(entity)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.entity.as_ref().map(|entity| {
                (
                    Handle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    entity,
                )
            })
        })
    }

    /// Handles of every live entity of one kind, in slot order.
    pub fn handles(&self, tag: KindTag) -> Vec<Handle> {
        self.iter()
            .filter(|(_, e)| e.alive && e.kind.tag() == tag)
            .map(|(h, _)| h)
            .collect()
    }

    /// Number of live entities of one kind.
    pub fn count(&self, tag: KindTag) -> usize {
        self.iter()
            .filter(|(_, e)| e.alive && e.kind.tag() == tag)
            .count()
    }

    /// Removes every entity whose `alive` flag was cleared.  Returns how
    /// many were dropped.
    pub fn sweep(&mut self) -> usize {
        let dead: Vec<Handle> = self
            .iter()
            .filter(|(_, e)| !e.alive)
            .map(|(h, _)| h)
            .collect();
        for &handle in &dead {
            self.remove(handle);
        }
        dead.len()
    }
}
