//! Generic identity-unique list.

use super::{CollectionError, CollectionResult};
use crate::model::Identity;
use std::cmp::Ordering;

/// Ordered list whose elements are pairwise not `is_same`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
    items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Identity> UniqueList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when an element with the same identity exists.
    pub fn contains(&self, candidate: &T) -> bool {
        self.position(candidate).is_some()
    }

    /// Appends `item`, rejecting same-kind duplicates.
    pub fn add(&mut self, item: T) -> CollectionResult<()> {
        if self.contains(&item) {
            return Err(CollectionError::DuplicateEntity(T::KIND));
        }
        self.items.push(item);
        Ok(())
    }

    /// Removes and returns the element with the same identity as `target`.
    pub fn remove(&mut self, target: &T) -> CollectionResult<T> {
        let index = self
            .position(target)
            .ok_or(CollectionError::EntityNotFound(T::KIND))?;
        Ok(self.items.remove(index))
    }

    /// Substitutes `edited` for `target` at the same position.
    ///
    /// `edited` may share `target`'s identity; it may not share the identity
    /// of any other element.
    pub fn replace(&mut self, target: &T, edited: T) -> CollectionResult<()> {
        let index = self
            .position(target)
            .ok_or(CollectionError::EntityNotFound(T::KIND))?;

        let collides = self
            .items
            .iter()
            .enumerate()
            .any(|(other_index, existing)| other_index != index && existing.is_same(&edited));
        if collides {
            return Err(CollectionError::DuplicateEntity(T::KIND));
        }

        self.items[index] = edited;
        Ok(())
    }

    /// Replaces the whole backing list after checking `items` for collisions.
    pub fn reset_to(&mut self, items: Vec<T>) -> CollectionResult<()> {
        Self::ensure_unique(&items)?;
        self.items = items;
        Ok(())
    }

    /// Fails when any two elements of `items` share an identity.
    pub fn ensure_unique(items: &[T]) -> CollectionResult<()> {
        for (index, item) in items.iter().enumerate() {
            if items[index + 1..].iter().any(|other| item.is_same(other)) {
                return Err(CollectionError::InconsistentSnapshot(T::KIND));
            }
        }
        Ok(())
    }

    /// Stable re-sort; identity uniqueness is unaffected.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        self.items.sort_by(compare);
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, candidate: &T) -> Option<usize> {
        self.items.iter().position(|item| item.is_same(candidate))
    }
}

impl<'a, T: Identity> IntoIterator for &'a UniqueList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::UniqueList;
    use crate::collection::CollectionError;
    use crate::model::{EntityKind, Identity};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Keyed {
        key: &'static str,
        value: u32,
    }

    impl Identity for Keyed {
        const KIND: EntityKind = EntityKind::Module;

        fn is_same(&self, other: &Self) -> bool {
            self.key == other.key
        }
    }

    fn keyed(key: &'static str, value: u32) -> Keyed {
        Keyed { key, value }
    }

    #[test]
    fn replace_keeps_position_and_allows_same_key() {
        let mut list = UniqueList::new();
        list.add(keyed("a", 1)).unwrap();
        list.add(keyed("b", 2)).unwrap();
        list.add(keyed("c", 3)).unwrap();

        list.replace(&keyed("b", 0), keyed("b", 20)).unwrap();
        let values = list.iter().map(|item| item.value).collect::<Vec<_>>();
        assert_eq!(values, vec![1, 20, 3]);
    }

    #[test]
    fn replace_rejects_collision_with_other_element() {
        let mut list = UniqueList::new();
        list.add(keyed("a", 1)).unwrap();
        list.add(keyed("b", 2)).unwrap();

        let err = list.replace(&keyed("a", 1), keyed("b", 9)).unwrap_err();
        assert_eq!(err, CollectionError::DuplicateEntity(EntityKind::Module));
        assert_eq!(list.as_slice(), &[keyed("a", 1), keyed("b", 2)]);
    }

    #[test]
    fn reset_to_rejects_internal_duplicates_and_keeps_old_items() {
        let mut list = UniqueList::new();
        list.add(keyed("a", 1)).unwrap();

        let err = list
            .reset_to(vec![keyed("x", 1), keyed("y", 2), keyed("x", 3)])
            .unwrap_err();
        assert_eq!(err, CollectionError::InconsistentSnapshot(EntityKind::Module));
        assert_eq!(list.as_slice(), &[keyed("a", 1)]);
    }
}
