//! Live, predicate-restricted read projections of a collection.
//!
//! A view stores only the active predicate. Every read re-evaluates it against
//! the current backing list, so a view can never go stale after a Track
//! mutation or an `update_filter` call.

use crate::collection::UniqueList;
use crate::model::Identity;
use crate::predicate::Predicate;

/// Active filter for one entity collection.
#[derive(Debug, Clone)]
pub struct FilteredView<T> {
    predicate: Predicate<T>,
}

impl<T: Identity + 'static> FilteredView<T> {
    /// Creates a view that shows every element.
    pub fn new() -> Self {
        Self {
            predicate: Predicate::show_all(),
        }
    }

    /// Replaces the active predicate.
    pub fn update_filter(&mut self, predicate: Predicate<T>) {
        self.predicate = predicate;
    }

    pub fn predicate(&self) -> &Predicate<T> {
        &self.predicate
    }

    /// Elements of `source` matching the active predicate, in list order.
    pub fn items<'a>(&self, source: &'a UniqueList<T>) -> Vec<&'a T> {
        source
            .iter()
            .filter(|item| self.predicate.test(item))
            .collect()
    }

    /// Elements matching both the active predicate and `extra`.
    pub fn items_where<'a>(&self, source: &'a UniqueList<T>, extra: &Predicate<T>) -> Vec<&'a T> {
        let combined = self.predicate.and(extra);
        source.iter().filter(|item| combined.test(item)).collect()
    }
}

impl<T: Identity + 'static> Default for FilteredView<T> {
    fn default() -> Self {
        Self::new()
    }
}
