use std::fmt;

use crate::model::UserId;

/// Machine-readable error codes for front-ends and scripted callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    VertexNotFound,
    EdgeNotFound,
    ProfileNotFound,
    DuplicateProfile,
    SelfFriendship,
    DuplicateFriendship,
    FriendshipNotFound,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::VertexNotFound => "E1001",
            Self::EdgeNotFound => "E1002",
            Self::ProfileNotFound => "E2001",
            Self::DuplicateProfile => "E2002",
            Self::SelfFriendship => "E3001",
            Self::DuplicateFriendship => "E3002",
            Self::FriendshipNotFound => "E3003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::VertexNotFound => "Vertex not found",
            Self::EdgeNotFound => "Edge not found",
            Self::ProfileNotFound => "Profile not found",
            Self::DuplicateProfile => "Profile already exists",
            Self::SelfFriendship => "Profile cannot befriend itself",
            Self::DuplicateFriendship => "Profiles are already friends",
            Self::FriendshipNotFound => "Profiles are not friends",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::VertexNotFound | Self::EdgeNotFound | Self::SelfFriendship => None,
            Self::ProfileNotFound => Some("Use \"show all profiles\" to list the live ids."),
            Self::DuplicateProfile => {
                Some("Change the name, email, or phone so the profile is distinct.")
            }
            Self::DuplicateFriendship => Some("No action needed; the friendship already exists."),
            Self::FriendshipNotFound => Some("Add the friendship before trying to remove it."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures reported by [`DirectedGraph`](crate::graph::DirectedGraph).
///
/// Labels are captured through their `Display` form so the error stays
/// independent of the graph's label type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("vertex {label} is not in the graph")]
    MissingVertex { label: String },

    #[error("edge {from}>{to} is not in the graph")]
    MissingEdge { from: String, to: String },
}

impl GraphError {
    pub(crate) fn missing_vertex(label: &impl fmt::Display) -> Self {
        Self::MissingVertex {
            label: label.to_string(),
        }
    }

    pub(crate) fn missing_edge(from: &impl fmt::Display, to: &impl fmt::Display) -> Self {
        Self::MissingEdge {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::MissingVertex { .. } => ErrorCode::VertexNotFound,
            Self::MissingEdge { .. } => ErrorCode::EdgeNotFound,
        }
    }
}

/// Caller-facing failures of [`SocialNetwork`](crate::network::SocialNetwork).
///
/// Every variant is raised before any index is written, so a failed call
/// leaves the network exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    #[error("profile {0} not found")]
    ProfileNotFound(UserId),

    #[error("a profile with the same name, email, and phone already exists (id {existing})")]
    DuplicateProfile { existing: UserId },

    #[error("profile {0} cannot be friends with itself")]
    SelfFriendship(UserId),

    #[error("profiles {0} and {1} are already friends")]
    DuplicateFriendship(UserId, UserId),

    #[error("profiles {0} and {1} are not friends")]
    FriendshipNotFound(UserId, UserId),

    /// The friendship mirror and the graph disagree.
    #[error("graph index out of sync: {0}")]
    Graph(#[from] GraphError),
}

impl NetworkError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::ProfileNotFound(_) => ErrorCode::ProfileNotFound,
            Self::DuplicateProfile { .. } => ErrorCode::DuplicateProfile,
            Self::SelfFriendship(_) => ErrorCode::SelfFriendship,
            Self::DuplicateFriendship(..) => ErrorCode::DuplicateFriendship,
            Self::FriendshipNotFound(..) => ErrorCode::FriendshipNotFound,
            Self::Graph(_) => ErrorCode::InternalUnexpected,
        }
    }

    /// Optional remediation hint for the user.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 8] = [
        ErrorCode::VertexNotFound,
        ErrorCode::EdgeNotFound,
        ErrorCode::ProfileNotFound,
        ErrorCode::DuplicateProfile,
        ErrorCode::SelfFriendship,
        ErrorCode::DuplicateFriendship,
        ErrorCode::FriendshipNotFound,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let text = code.code();
            assert_eq!(text.len(), 5);
            assert!(text.starts_with('E'));
            assert!(text.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn network_errors_map_to_codes() {
        let id = UserId::new(7);
        assert_eq!(
            NetworkError::ProfileNotFound(id).code(),
            ErrorCode::ProfileNotFound
        );
        assert_eq!(
            NetworkError::FriendshipNotFound(id, UserId::new(8)).code(),
            ErrorCode::FriendshipNotFound
        );
        let wrapped: NetworkError = GraphError::missing_vertex(&id).into();
        assert_eq!(wrapped.code(), ErrorCode::InternalUnexpected);
        assert!(wrapped.hint().is_some());
    }

    #[test]
    fn display_includes_ids() {
        let err = NetworkError::DuplicateFriendship(UserId::new(1), UserId::new(2));
        assert_eq!(err.to_string(), "profiles 1 and 2 are already friends");

        let err = GraphError::missing_edge(&3, &4);
        assert_eq!(err.to_string(), "edge 3>4 is not in the graph");
    }
}
