//! Owned, renderable snapshots of profiles and suggestions.

use std::io::{self, Write};

use circle_core::{SocialNetwork, Suggestion, UserId, UserProfile};
use serde::Serialize;

use crate::output::Renderable;

/// A friend as listed under a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendRef {
    pub id: UserId,
    pub name: String,
}

/// A profile together with its friend list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub friends: Vec<FriendRef>,
}

impl ProfileView {
    /// Snapshot `profile` and its current friends.
    pub fn capture(net: &SocialNetwork, profile: &UserProfile) -> Self {
        let friends = net
            .get_friends(profile.id())
            .unwrap_or_default()
            .into_iter()
            .map(|f| FriendRef {
                id: f.id(),
                name: f.name().to_string(),
            })
            .collect();
        Self {
            id: profile.id(),
            name: profile.name().to_string(),
            email: profile.email().to_string(),
            phone: profile.phone().to_string(),
            friends,
        }
    }

    /// Snapshot every live profile, ascending by id.
    pub fn all(net: &SocialNetwork) -> Vec<Self> {
        net.profiles().map(|p| Self::capture(net, p)).collect()
    }

    fn friend_list(&self) -> String {
        self.friends
            .iter()
            .map(|f| format!("{} (id={})", f.name, f.id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Renderable for ProfileView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "[id={}]", self.id)?;
        writeln!(w, "Name:  {}", self.name)?;
        writeln!(w, "Email: {}", self.email)?;
        writeln!(w, "Phone: {}", self.phone)?;
        if self.friends.is_empty() {
            writeln!(w, "Friends: (none)")?;
        } else {
            writeln!(w, "Friends: {}", self.friend_list())?;
        }
        writeln!(w)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        let friends = self
            .friends
            .iter()
            .map(|f| f.id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            self.id, self.name, self.email, self.phone, friends
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "name", "email", "phone", "friends"]
    }
}

/// One ranked friend suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionView {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub mutual_friends: usize,
}

impl From<&Suggestion<'_>> for SuggestionView {
    fn from(s: &Suggestion<'_>) -> Self {
        Self {
            id: s.profile.id(),
            name: s.profile.name().to_string(),
            email: s.profile.email().to_string(),
            phone: s.profile.phone().to_string(),
            mutual_friends: s.mutual_friends,
        }
    }
}

impl Renderable for SuggestionView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            " - id={}, name={}, email={}, phone={} ({} mutual)",
            self.id, self.name, self.email, self.phone, self.mutual_friends
        )
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}",
            self.id, self.name, self.email, self.phone, self.mutual_friends
        )
    }

    fn table_headers() -> &'static [&'static str] {
        &["id", "name", "email", "phone", "mutual"]
    }
}

/// The raw graph, as vertices and directed weighted edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    pub vertices: Vec<UserId>,
    pub edges: Vec<EdgeRow>,
    #[serde(skip)]
    rendered: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    pub from: UserId,
    pub to: UserId,
    pub weight: f64,
}

impl GraphView {
    pub fn capture(net: &SocialNetwork) -> Self {
        let graph = net.graph();
        Self {
            vertices: graph.vertices().copied().collect(),
            edges: graph
                .edges()
                .map(|e| EdgeRow {
                    from: *e.from,
                    to: *e.to,
                    weight: e.weight,
                })
                .collect(),
            rendered: graph.to_string(),
        }
    }
}

impl Renderable for GraphView {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "Raw graph representation:")?;
        writeln!(w, "{}", self.rendered)
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer(w, self).map_err(io::Error::other)
    }

    fn render_table(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "{}", self.rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{OutputMode, render_item, render_list};

    fn sample() -> (SocialNetwork, UserId, UserId) {
        let mut net = SocialNetwork::new();
        let a = net
            .add_profile("Alex", "alex@wvc.edu", "408-111-2222")
            .expect("add")
            .id();
        let b = net.add_profile("Bella", "", "").expect("add").id();
        net.add_friendship(a, b).expect("friends");
        (net, a, b)
    }

    fn text_of<R: Renderable>(items: &[R], mode: OutputMode) -> String {
        let mut buf = Vec::new();
        render_list(&mut buf, items, mode).expect("render");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn profile_view_lists_friends() {
        let (net, a, b) = sample();
        let view = ProfileView::capture(&net, net.profile(a).expect("live"));
        assert_eq!(view.friends, vec![FriendRef { id: b, name: "Bella".into() }]);

        let pretty = text_of(&[view], OutputMode::Pretty);
        assert!(pretty.contains("Name:  Alex\nEmail: alex@wvc.edu\nPhone: 408-111-2222\n"));
        assert!(pretty.contains("Friends: Bella (id=2)"));
    }

    #[test]
    fn profile_rows_are_tab_separated() {
        let (net, _, _) = sample();
        let text = text_of(&ProfileView::all(&net), OutputMode::Text);
        assert_eq!(
            text,
            "id\tname\temail\tphone\tfriends\n1\tAlex\talex@wvc.edu\t408-111-2222\t2\n2\tBella\t\t\t1\n"
        );
    }

    #[test]
    fn profile_json_has_friend_objects() {
        let (net, _, _) = sample();
        let json = text_of(&ProfileView::all(&net), OutputMode::Json);
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value[0]["friends"][0]["name"], "Bella");
        assert_eq!(value[1]["id"], 2);
    }

    #[test]
    fn graph_view_matches_display() {
        let (net, _, _) = sample();
        let view = GraphView::capture(&net);
        assert_eq!(view.vertices.len(), 2);
        assert_eq!(view.edges.len(), 2);

        let mut buf = Vec::new();
        render_item(&mut buf, &view, OutputMode::Text).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with("2 Vertices: "));
        assert!(text.contains("2 Edges: "));
    }
}
