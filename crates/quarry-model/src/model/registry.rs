use indexmap::{IndexMap, map::Entry};
use serde::{Serialize, Serializer};

///
/// Named
/// Anything stored in a [`Registry`].
///

pub trait Named {
    fn name(&self) -> &str;
}

///
/// Registry
/// Declaration-ordered collection with a name index.
/// Serializes as a plain sequence of items.
///

#[derive(Clone, Debug)]
pub struct Registry<T> {
    items: IndexMap<String, T>,
}

impl<T: Named> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Insert `item`, handing it back if the name is already taken.
    pub(crate) fn insert(&mut self, item: T) -> Result<(), T> {
        match self.items.entry(item.name().to_string()) {
            Entry::Occupied(_) => Err(item),
            Entry::Vacant(slot) => {
                slot.insert(item);
                Ok(())
            }
        }
    }

    /// The item called `name`, created by `make` on first use.
    pub(crate) fn get_or_insert_with(&mut self, name: &str, make: impl FnOnce() -> T) -> &mut T {
        self.items.entry(name.to_string()).or_insert_with(make)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.items.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.items.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn iter(&self) -> indexmap::map::Values<'_, String, T> {
        self.items.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Named> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Named> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = indexmap::map::Values<'a, String, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Serialize> Serialize for Registry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.values())
    }
}
