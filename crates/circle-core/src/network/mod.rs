//! The social network: profiles, friendships, and the indices that tie them
//! together.
//!
//! # Overview
//!
//! [`SocialNetwork`] owns five structures that must always agree:
//!
//! - `profiles`: id → [`UserProfile`], the canonical store
//! - `name_index`: display name → ids sharing it
//! - `profile_keys`: `(name, email, phone)` → id, the duplicate guard
//! - `friendships`: id → friend ids, the adjacency mirror
//! - `graph`: a [`DirectedGraph`] with one edge per friendship direction
//!
//! Every public mutation checks all of its failure conditions before the
//! first write, so an `Err` return means nothing changed. Use
//! [`SocialNetwork::audit`] to cross-check the indices.
//!
//! # Usage
//!
//! ```rust
//! use circle_core::network::SocialNetwork;
//!
//! let mut net = SocialNetwork::new();
//! let anna = net.add_profile("Anna", "anna@example.com", "").unwrap().id();
//! let boris = net.add_profile("Boris", "", "").unwrap().id();
//! net.add_friendship(anna, boris).unwrap();
//!
//! assert_eq!(net.get_friends(anna).unwrap()[0].name(), "Boris");
//! ```

pub mod shared;
pub mod suggest;

pub use shared::SharedNetwork;
pub use suggest::Suggestion;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::config::NetworkConfig;
use crate::error::{GraphError, NetworkError};
use crate::graph::DirectedGraph;
use crate::model::{ProfileKey, ProfileUpdate, UserId, UserProfile};
use crate::verify::{VerifyReport, verify_network};

/// First id handed out by a fresh network.
pub const FIRST_ID: u64 = 1;

// ---------------------------------------------------------------------------
// SocialNetwork
// ---------------------------------------------------------------------------

/// Profiles connected by mutual friendships.
#[derive(Debug, Clone)]
pub struct SocialNetwork {
    profiles: BTreeMap<UserId, UserProfile>,
    name_index: HashMap<String, BTreeSet<UserId>>,
    profile_keys: HashMap<ProfileKey, UserId>,
    friendships: HashMap<UserId, BTreeSet<UserId>>,
    graph: DirectedGraph<UserId>,
    next_id: u64,
    config: NetworkConfig,
}

impl Default for SocialNetwork {
    fn default() -> Self {
        Self::with_config(NetworkConfig::default())
    }
}

impl SocialNetwork {
    /// Create an empty network with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty network with explicit settings.
    #[must_use]
    pub fn with_config(config: NetworkConfig) -> Self {
        Self {
            profiles: BTreeMap::new(),
            name_index: HashMap::new(),
            profile_keys: HashMap::new(),
            friendships: HashMap::new(),
            graph: DirectedGraph::new(),
            next_id: FIRST_ID,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &NetworkConfig {
        &self.config
    }

    /// Number of live profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Number of friendships (each counted once, not per direction).
    #[must_use]
    pub fn friendship_count(&self) -> usize {
        self.friendships.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Read-only view of the underlying graph.
    #[must_use]
    pub const fn graph(&self) -> &DirectedGraph<UserId> {
        &self.graph
    }

    /// Cross-check every index against the profile store and the graph.
    #[must_use]
    pub fn audit(&self) -> VerifyReport {
        verify_network(self)
    }

    /// The id the next successful [`add_profile`](Self::add_profile) will
    /// assign.
    #[must_use]
    pub const fn next_id(&self) -> UserId {
        UserId::new(self.next_id)
    }

    // -----------------------------------------------------------------------
    // Profile CRUD
    // -----------------------------------------------------------------------

    /// Create a profile and return it with its freshly assigned id.
    ///
    /// Display names may repeat; the full `(name, email, phone)` triple may
    /// not.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateProfile`] if a live profile has the same
    /// triple. No id is consumed in that case.
    pub fn add_profile(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<&UserProfile, NetworkError> {
        let key = ProfileKey::new(name, email, phone);
        if let Some(&existing) = self.profile_keys.get(&key) {
            return Err(NetworkError::DuplicateProfile { existing });
        }

        let id = UserId::new(self.next_id);
        self.next_id += 1;

        self.graph.add_vertex(id);
        self.friendships.insert(id, BTreeSet::new());
        self.name_index
            .entry(key.name.clone())
            .or_default()
            .insert(id);
        self.profile_keys.insert(key.clone(), id);
        debug!(id = %id, name = %key.name, "profile added");

        Ok(&*self
            .profiles
            .entry(id)
            .or_insert_with(|| UserProfile::from_key(id, key)))
    }

    /// Change some of a profile's fields in place. The id never changes.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::ProfileNotFound`] if `id` is not live.
    /// - [`NetworkError::DuplicateProfile`] if the edited triple belongs to a
    ///   different live profile. The profile keeps its old values.
    pub fn update_profile(
        &mut self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<&UserProfile, NetworkError> {
        let Some(profile) = self.profiles.get_mut(&id) else {
            return Err(NetworkError::ProfileNotFound(id));
        };

        let old_key = profile.key();
        let new_key = update.apply_to(&old_key);
        if let Some(&existing) = self.profile_keys.get(&new_key).filter(|&&owner| owner != id) {
            return Err(NetworkError::DuplicateProfile { existing });
        }

        if new_key != old_key {
            self.profile_keys.remove(&old_key);
            if new_key.name != old_key.name {
                unindex_name(&mut self.name_index, &old_key.name, id);
                self.name_index
                    .entry(new_key.name.clone())
                    .or_default()
                    .insert(id);
            }
            self.profile_keys.insert(new_key.clone(), id);
            profile.set_key(new_key);
            debug!(id = %id, name = %profile.name(), "profile updated");
        }

        Ok(&*profile)
    }

    /// Delete a profile, every friendship it takes part in, and every index
    /// entry that refers to it. Returns the removed profile.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ProfileNotFound`] if `id` is not live.
    pub fn remove_profile(&mut self, id: UserId) -> Result<UserProfile, NetworkError> {
        let Some(profile) = self.profiles.get(&id) else {
            return Err(NetworkError::ProfileNotFound(id));
        };
        let key = profile.key();

        // Drops both directions of every friendship edge along with the vertex.
        self.graph.remove_vertex(&id)?;

        let friends = self.friendships.remove(&id).unwrap_or_default();
        for friend in &friends {
            if let Some(theirs) = self.friendships.get_mut(friend) {
                theirs.remove(&id);
            }
        }
        unindex_name(&mut self.name_index, &key.name, id);
        self.profile_keys.remove(&key);
        debug!(id = %id, friends = friends.len(), "profile removed");

        self.profiles
            .remove(&id)
            .ok_or(NetworkError::ProfileNotFound(id))
    }

    /// Profile with the given id, if live.
    #[must_use]
    pub fn profile(&self, id: UserId) -> Option<&UserProfile> {
        self.profiles.get(&id)
    }

    /// All live profiles in ascending id order.
    pub fn profiles(&self) -> impl Iterator<Item = &UserProfile> + '_ {
        self.profiles.values()
    }

    /// Every profile whose display name is exactly `name`, ascending by id.
    #[must_use]
    pub fn find_profile(&self, name: &str) -> Vec<&UserProfile> {
        self.name_index
            .get(name)
            .map(|ids| self.resolve(ids))
            .unwrap_or_default()
    }

    /// Returns `true` if a live profile carries exactly this triple.
    #[must_use]
    pub fn profile_exists(&self, key: &ProfileKey) -> bool {
        self.profile_keys.contains_key(key)
    }

    /// The live profile carrying exactly this triple, regardless of id.
    #[must_use]
    pub fn find_profile_by_data(&self, key: &ProfileKey) -> Option<&UserProfile> {
        self.profile_keys
            .get(key)
            .and_then(|id| self.profiles.get(id))
    }

    // -----------------------------------------------------------------------
    // Friendships
    // -----------------------------------------------------------------------

    /// Make `a` and `b` friends.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::ProfileNotFound`] for the first id that is not live.
    /// - [`NetworkError::SelfFriendship`] if `a == b`.
    /// - [`NetworkError::DuplicateFriendship`] if they are already friends.
    pub fn add_friendship(&mut self, a: UserId, b: UserId) -> Result<(), NetworkError> {
        self.require(a)?;
        self.require(b)?;
        if a == b {
            return Err(NetworkError::SelfFriendship(a));
        }
        if self.are_friends(a, b) {
            return Err(NetworkError::DuplicateFriendship(a, b));
        }
        for id in [a, b] {
            if !self.graph.contains_vertex(&id) {
                return Err(GraphError::missing_vertex(&id).into());
            }
        }

        self.graph.add_unit_edge(&a, &b)?;
        self.graph.add_unit_edge(&b, &a)?;
        self.friends_mut(a).insert(b);
        self.friends_mut(b).insert(a);
        debug!(a = %a, b = %b, "friendship added");
        Ok(())
    }

    /// End the friendship between `a` and `b`.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::ProfileNotFound`] for the first id that is not live.
    /// - [`NetworkError::FriendshipNotFound`] if they are not friends.
    pub fn remove_friendship(&mut self, a: UserId, b: UserId) -> Result<(), NetworkError> {
        self.require(a)?;
        self.require(b)?;
        if !self.are_friends(a, b) {
            return Err(NetworkError::FriendshipNotFound(a, b));
        }
        for (from, to) in [(a, b), (b, a)] {
            if !self.graph.contains_edge(&from, &to) {
                return Err(GraphError::missing_edge(&from, &to).into());
            }
        }

        self.graph.remove_edge(&a, &b)?;
        self.graph.remove_edge(&b, &a)?;
        self.friends_mut(a).remove(&b);
        self.friends_mut(b).remove(&a);
        debug!(a = %a, b = %b, "friendship removed");
        Ok(())
    }

    /// Returns `true` if `a` and `b` are friends. Unknown ids are never
    /// friends.
    #[must_use]
    pub fn are_friends(&self, a: UserId, b: UserId) -> bool {
        self.friendships
            .get(&a)
            .is_some_and(|friends| friends.contains(&b))
    }

    /// Friends of `id`, ascending by id.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ProfileNotFound`] if `id` is not live.
    pub fn get_friends(&self, id: UserId) -> Result<Vec<&UserProfile>, NetworkError> {
        self.friend_ids(id).map(|ids| self.resolve(ids))
    }

    /// Ids of the friends of `id`, ascending.
    ///
    /// # Errors
    ///
    /// [`NetworkError::ProfileNotFound`] if `id` is not live.
    pub fn friend_ids(&self, id: UserId) -> Result<&BTreeSet<UserId>, NetworkError> {
        self.friendships
            .get(&id)
            .ok_or(NetworkError::ProfileNotFound(id))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn require(&self, id: UserId) -> Result<(), NetworkError> {
        if self.profiles.contains_key(&id) {
            Ok(())
        } else {
            Err(NetworkError::ProfileNotFound(id))
        }
    }

    fn friends_mut(&mut self, id: UserId) -> &mut BTreeSet<UserId> {
        self.friendships.entry(id).or_default()
    }

    fn resolve<'a>(&'a self, ids: impl IntoIterator<Item = &'a UserId>) -> Vec<&'a UserProfile> {
        ids.into_iter()
            .filter_map(|id| self.profiles.get(id))
            .collect()
    }

    pub(crate) const fn name_index(&self) -> &HashMap<String, BTreeSet<UserId>> {
        &self.name_index
    }

    pub(crate) const fn profile_keys(&self) -> &HashMap<ProfileKey, UserId> {
        &self.profile_keys
    }

    pub(crate) const fn friendships(&self) -> &HashMap<UserId, BTreeSet<UserId>> {
        &self.friendships
    }
}

/// Drop `id` from the entry for `name`, pruning the entry once it is empty.
fn unindex_name(index: &mut HashMap<String, BTreeSet<UserId>>, name: &str, id: UserId) {
    if let Some(ids) = index.get_mut(name) {
        ids.remove(&id);
        if ids.is_empty() {
            index.remove(name);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
