//! Friend-of-friend suggestions.
//!
//! Candidates are every profile exactly two friendship hops away that is not
//! already a friend. Each is scored by how many of the subject's friends it
//! shares, then ordered by score descending, display name, and id.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::instrument;

use super::SocialNetwork;
use crate::config::NameOrder;
use crate::error::NetworkError;
use crate::model::{UserId, UserProfile};

/// A suggested friend and the number of friends they share with the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Suggestion<'a> {
    pub profile: &'a UserProfile,
    pub mutual_friends: usize,
}

impl Suggestion<'_> {
    fn rank(&self, other: &Self, order: NameOrder) -> Ordering {
        other
            .mutual_friends
            .cmp(&self.mutual_friends)
            .then_with(|| order.compare(self.profile.name(), other.profile.name()))
            .then_with(|| self.profile.id().cmp(&other.profile.id()))
    }
}

impl SocialNetwork {
    /// Suggest friends for `id`, best first.
    ///
    /// An empty list is a valid answer. The configured
    /// [`SuggestConfig`](crate::config::SuggestConfig) picks the name
    /// ordering for ties and an optional cap on the result length.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ProfileNotFound`] if `id` is not live.
    #[instrument(skip_all, fields(id = %id))]
    pub fn suggest_friends(&self, id: UserId) -> Result<Vec<Suggestion<'_>>, NetworkError> {
        let direct = self.friend_ids(id)?;

        let mut mutual: BTreeMap<UserId, usize> = BTreeMap::new();
        for friend in direct {
            let Ok(second) = self.friend_ids(*friend) else {
                continue;
            };
            for &candidate in second {
                if candidate != id && !direct.contains(&candidate) {
                    *mutual.entry(candidate).or_default() += 1;
                }
            }
        }

        let settings = &self.config().suggestions;
        let mut suggestions: Vec<Suggestion<'_>> = mutual
            .into_iter()
            .filter_map(|(candidate, mutual_friends)| {
                self.profile(candidate).map(|profile| Suggestion {
                    profile,
                    mutual_friends,
                })
            })
            .collect();
        suggestions.sort_by(|a, b| a.rank(b, settings.name_order));
        if let Some(limit) = settings.limit {
            suggestions.truncate(limit);
        }

        tracing::debug!(count = suggestions.len(), "suggestions ranked");
        Ok(suggestions)
    }

    /// Ids of the friends `a` and `b` have in common, ascending.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ProfileNotFound`] for the first id that is not live.
    pub fn mutual_friends(&self, a: UserId, b: UserId) -> Result<BTreeSet<UserId>, NetworkError> {
        let left = self.friend_ids(a)?;
        let right = self.friend_ids(b)?;
        Ok(left.intersection(right).copied().collect())
    }
}
