//! Bus: per-reduction resources looked up by type.
//!
//! Steps receive `&mut Bus` next to the accumulator. Settings, clients and
//! clocks go here instead of widening the accumulator type. One Bus belongs
//! to one reduction; nothing in it is shared with other calls unless the
//! caller puts a shared handle in.

use crate::error::BusError;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

struct Slot {
    type_name: &'static str,
    value: Box<dyn Any + Send + Sync>,
}

#[derive(Default)]
pub struct Bus {
    slots: HashMap<TypeId, Slot>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `resource`, returning the previous value of the same type.
    pub fn insert<R: Send + Sync + 'static>(&mut self, resource: R) -> Option<R> {
        let slot = Slot {
            type_name: type_name::<R>(),
            value: Box::new(resource),
        };
        self.slots
            .insert(TypeId::of::<R>(), slot)
            .and_then(|old| old.value.downcast().ok())
            .map(|boxed| *boxed)
    }

    /// Builder form of [`Bus::insert`].
    pub fn with<R: Send + Sync + 'static>(mut self, resource: R) -> Self {
        self.insert(resource);
        self
    }

    pub fn get<R: 'static>(&self) -> Option<&R> {
        self.slots
            .get(&TypeId::of::<R>())
            .and_then(|slot| slot.value.downcast_ref())
    }

    pub fn get_mut<R: 'static>(&mut self) -> Option<&mut R> {
        self.slots
            .get_mut(&TypeId::of::<R>())
            .and_then(|slot| slot.value.downcast_mut())
    }

    /// Like [`Bus::get`], but a missing resource is an error naming its type.
    pub fn require<R: 'static>(&self) -> Result<&R, BusError> {
        self.get().ok_or(BusError::Missing {
            type_name: type_name::<R>(),
        })
    }

    /// A copy of the resource, or its default when absent.
    pub fn get_or_default<R: Clone + Default + 'static>(&self) -> R {
        self.get::<R>().cloned().unwrap_or_default()
    }

    pub fn contains<R: 'static>(&self) -> bool {
        self.slots.contains_key(&TypeId::of::<R>())
    }

    pub fn remove<R: 'static>(&mut self) -> Option<R> {
        self.slots
            .remove(&TypeId::of::<R>())
            .and_then(|slot| slot.value.downcast().ok())
            .map(|boxed| *boxed)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.slots.values().map(|slot| slot.type_name).collect();
        names.sort_unstable();
        f.debug_struct("Bus").field("resources", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Limits {
        max: u32,
    }

    #[test]
    fn test_insert_replaces_and_returns_previous() {
        let mut bus = Bus::new();
        assert_eq!(bus.insert(Limits { max: 1 }), None);
        assert_eq!(bus.insert(Limits { max: 2 }), Some(Limits { max: 1 }));
        assert_eq!(bus.get::<Limits>(), Some(&Limits { max: 2 }));
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn test_require_names_missing_type() {
        let bus = Bus::new().with(7u8);
        assert_eq!(bus.require::<u8>(), Ok(&7));

        let err = bus.require::<Limits>().unwrap_err();
        assert!(err.to_string().contains("Limits"));
    }

    #[test]
    fn test_get_or_default() {
        assert_eq!(Bus::new().get_or_default::<Limits>(), Limits::default());
        let bus = Bus::new().with(Limits { max: 9 });
        assert_eq!(bus.get_or_default::<Limits>().max, 9);
    }

    #[test]
    fn test_get_mut_and_remove() {
        let mut bus = Bus::new().with(vec![1, 2, 3]);

        if let Some(v) = bus.get_mut::<Vec<i32>>() {
            v.push(4);
        }

        assert_eq!(bus.remove::<Vec<i32>>(), Some(vec![1, 2, 3, 4]));
        assert!(!bus.contains::<Vec<i32>>());
        assert!(bus.is_empty());
    }

    #[test]
    fn test_debug_lists_resource_types() {
        let bus = Bus::new().with(1u16).with("x".to_string());
        let rendered = format!("{bus:?}");
        assert!(rendered.contains("u16"));
        assert!(rendered.contains("String"));
    }
}
