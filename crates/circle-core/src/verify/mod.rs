//! Cross-checks the indices of a [`SocialNetwork`].
//!
//! A healthy network yields an empty [`VerifyReport`]. Any
//! [`IndexViolation`] means a mutation left the profile store, the name
//! index, the duplicate index, the friendship mirror, and the graph out of
//! step.

use std::fmt;

use crate::model::UserId;
use crate::network::SocialNetwork;

/// One disagreement between the network's indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexViolation {
    /// A profile is missing from, or misfiled in, the name index.
    NameIndex { id: UserId, name: String },
    /// The name index holds an empty id set for this name.
    EmptyNameEntry { name: String },
    /// A profile's triple does not map back to it in the duplicate index.
    ProfileKey { id: UserId },
    /// The duplicate index and the profile store differ in size.
    ProfileKeyCount { keys: usize, profiles: usize },
    /// A live profile has no friendship entry.
    MissingFriendSet { id: UserId },
    /// A friendship entry refers to a profile that does not exist.
    DanglingFriend { id: UserId, friend: UserId },
    /// A friendship is recorded for one side only.
    Asymmetric { id: UserId, friend: UserId },
    /// A profile is listed as its own friend.
    SelfLoop { id: UserId },
    /// A friendship direction has no matching graph edge.
    MissingEdge { from: UserId, to: UserId },
    /// The graph holds an edge the mirror does not know about.
    StrayEdge { from: UserId, to: UserId },
    /// Graph vertices and live profiles disagree.
    VertexSet { vertices: usize, profiles: usize },
    /// An assigned id is not below the next id to be handed out.
    IdNotBelowNext { id: UserId, next: UserId },
}

impl fmt::Display for IndexViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameIndex { id, name } => write!(f, "profile {id} not indexed under '{name}'"),
            Self::EmptyNameEntry { name } => write!(f, "name '{name}' has an empty id set"),
            Self::ProfileKey { id } => write!(f, "profile {id} missing from duplicate index"),
            Self::ProfileKeyCount { keys, profiles } => {
                write!(f, "{keys} duplicate keys for {profiles} profiles")
            }
            Self::MissingFriendSet { id } => write!(f, "profile {id} has no friend set"),
            Self::DanglingFriend { id, friend } => {
                write!(f, "profile {id} lists unknown friend {friend}")
            }
            Self::Asymmetric { id, friend } => {
                write!(f, "{id} lists {friend} but not the other way round")
            }
            Self::SelfLoop { id } => write!(f, "profile {id} is its own friend"),
            Self::MissingEdge { from, to } => write!(f, "graph edge {from}>{to} missing"),
            Self::StrayEdge { from, to } => write!(f, "graph edge {from}>{to} is not a friendship"),
            Self::VertexSet { vertices, profiles } => {
                write!(f, "{vertices} graph vertices for {profiles} profiles")
            }
            Self::IdNotBelowNext { id, next } => write!(f, "id {id} is not below next id {next}"),
        }
    }
}

/// Aggregate verification report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyReport {
    pub violations: Vec<IndexViolation>,
}

impl VerifyReport {
    /// Return `true` when all checks passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Check every index of `net` against the profile store and the graph.
#[must_use]
pub fn verify_network(net: &SocialNetwork) -> VerifyReport {
    let mut violations = Vec::new();
    let next = net.next_id();
    let graph = net.graph();

    for profile in net.profiles() {
        let id = profile.id();
        if id >= next {
            violations.push(IndexViolation::IdNotBelowNext { id, next });
        }
        if !net
            .name_index()
            .get(profile.name())
            .is_some_and(|ids| ids.contains(&id))
        {
            violations.push(IndexViolation::NameIndex {
                id,
                name: profile.name().to_string(),
            });
        }
        if net.profile_keys().get(&profile.key()) != Some(&id) {
            violations.push(IndexViolation::ProfileKey { id });
        }
        if !net.friendships().contains_key(&id) {
            violations.push(IndexViolation::MissingFriendSet { id });
        }
    }

    for (name, ids) in net.name_index() {
        if ids.is_empty() {
            violations.push(IndexViolation::EmptyNameEntry { name: name.clone() });
        }
        for &id in ids {
            if net.profile(id).is_none_or(|p| p.name() != name) {
                violations.push(IndexViolation::NameIndex {
                    id,
                    name: name.clone(),
                });
            }
        }
    }

    if net.profile_keys().len() != net.len() {
        violations.push(IndexViolation::ProfileKeyCount {
            keys: net.profile_keys().len(),
            profiles: net.len(),
        });
    }

    for (&id, friends) in net.friendships() {
        if net.profile(id).is_none() {
            violations.push(IndexViolation::DanglingFriend { id, friend: id });
        }
        for &friend in friends {
            if friend == id {
                violations.push(IndexViolation::SelfLoop { id });
                continue;
            }
            if net.profile(friend).is_none() {
                violations.push(IndexViolation::DanglingFriend { id, friend });
            } else if !net.are_friends(friend, id) {
                violations.push(IndexViolation::Asymmetric { id, friend });
            }
            if !graph.contains_edge(&id, &friend) {
                violations.push(IndexViolation::MissingEdge { from: id, to: friend });
            }
        }
    }

    if graph.vertex_count() != net.len() {
        violations.push(IndexViolation::VertexSet {
            vertices: graph.vertex_count(),
            profiles: net.len(),
        });
    }
    for edge in graph.edges() {
        if !net.are_friends(*edge.from, *edge.to) {
            violations.push(IndexViolation::StrayEdge {
                from: *edge.from,
                to: *edge.to,
            });
        }
    }

    VerifyReport { violations }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_network_verifies() {
        let report = verify_network(&SocialNetwork::new());
        assert!(report.is_ok());
    }

    #[test]
    fn populated_network_verifies() {
        let mut net = SocialNetwork::new();
        let a = net.add_profile("Anna", "", "").expect("add").id();
        let b = net.add_profile("Boris", "", "").expect("add").id();
        let c = net.add_profile("Anna", "x", "").expect("add").id();
        net.add_friendship(a, b).expect("friends");
        net.add_friendship(b, c).expect("friends");
        net.remove_profile(a).expect("remove");

        let report = verify_network(&net);
        assert!(report.is_ok(), "{:?}", report.violations);
    }

    #[test]
    fn violations_render_readably() {
        let v = IndexViolation::Asymmetric {
            id: UserId::new(1),
            friend: UserId::new(2),
        };
        assert_eq!(v.to_string(), "1 lists 2 but not the other way round");
        let v = IndexViolation::StrayEdge {
            from: UserId::new(3),
            to: UserId::new(4),
        };
        assert_eq!(v.to_string(), "graph edge 3>4 is not a friendship");
    }
}
