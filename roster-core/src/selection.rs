//! Reviewer candidate selection
//!
//! Selection is split in two: [`EligiblePool`] decides who may review, and
//! [`select_candidates`] draws from that pool. Neither touches storage, and
//! randomness comes from the caller so tests can seed it.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::User;

/// Draw up to `count` distinct entries uniformly at random without replacement
///
/// Returns the whole pool when it holds fewer than `count` entries, and an
/// empty vector for an empty pool. Callers decide whether that is an error.
pub fn select_candidates<T, R>(pool: &[T], count: usize, rng: &mut R) -> Vec<T>
where
    T: Clone,
    R: Rng + ?Sized,
{
    pool.choose_multiple(rng, count).cloned().collect()
}

/// Active users of a team minus an exclusion set
#[derive(Debug, Clone, Default)]
pub struct EligiblePool {
    excluded: HashSet<String>,
}

impl EligiblePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude a single user
    pub fn exclude(mut self, user_id: impl Into<String>) -> Self {
        self.excluded.insert(user_id.into());
        self
    }

    /// Exclude several users
    pub fn exclude_all<I, S>(mut self, user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded.extend(user_ids.into_iter().map(Into::into));
        self
    }

    pub fn is_excluded(&self, user_id: &str) -> bool {
        self.excluded.contains(user_id)
    }

    /// Keep the active members that are not excluded, as user IDs
    pub fn filter(&self, members: Vec<User>) -> Vec<String> {
        members
            .into_iter()
            .filter(|user| user.is_active && !self.is_excluded(&user.user_id))
            .map(|user| user.user_id)
            .collect()
    }
}
