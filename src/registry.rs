//! Entity registry: interned, id-keyed catalog of schedulable entities (spec §4.1).
//!
//! Ported from `original_source/Clases.py`'s `Identificable`: re-registering
//! the same id is allowed only if every field of the new value matches the
//! one already on file.

use std::collections::HashMap;

use crate::error::RegistryError;

/// An entity that carries a positive-integer id unique within its type.
pub trait Entity: PartialEq + Clone {
    /// Name used in `DuplicateIdConflict` errors (e.g. `"Worker"`).
    const KIND: &'static str;

    fn id(&self) -> u32;
}

/// Per-type id → entity table, confined to a single planning run.
#[derive(Debug, Clone, Default)]
pub struct EntityTable<T: Entity> {
    by_id: HashMap<u32, T>,
}

impl<T: Entity> EntityTable<T> {
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
        }
    }

    /// Registers `entity`, returning the canonical (possibly pre-existing)
    /// instance. Errors if an entity with the same id is already registered
    /// with different fields.
    pub fn register(&mut self, entity: T) -> Result<&T, RegistryError> {
        let id = entity.id();
        match self.by_id.get(&id) {
            Some(existing) if *existing == entity => {}
            Some(_) => {
                return Err(RegistryError::DuplicateIdConflict {
                    kind: T::KIND,
                    id,
                })
            }
            None => {
                self.by_id.insert(id, entity);
            }
        }
        Ok(self.by_id.get(&id).expect("just inserted or already present"))
    }

    pub fn lookup(&self, id: u32) -> Option<&T> {
        self.by_id.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.by_id.values()
    }
}
