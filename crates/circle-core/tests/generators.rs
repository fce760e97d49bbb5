use circle_core::{ProfileUpdate, SocialNetwork, UserId};
use proptest::prelude::*;

/// Small pools so generated profiles collide often.
const NAMES: &[&str] = &["Alex", "alex", "Bella", "Carlos", "Diana"];
const EMAILS: &[&str] = &["", "a@x", "b@x"];
const PHONES: &[&str] = &["", "111", "222"];

/// Ids above the number of profiles ever created exercise the not-found paths.
const MAX_ID: u64 = 16;

#[derive(Debug, Clone)]
pub enum Op {
    AddProfile {
        name: &'static str,
        email: &'static str,
        phone: &'static str,
    },
    UpdateProfile {
        id: UserId,
        name: Option<&'static str>,
        email: Option<&'static str>,
        phone: Option<&'static str>,
    },
    RemoveProfile(UserId),
    AddFriendship(UserId, UserId),
    RemoveFriendship(UserId, UserId),
}

impl Op {
    /// Apply to `net`, returning whether the call succeeded.
    pub fn apply(&self, net: &mut SocialNetwork) -> bool {
        match *self {
            Self::AddProfile { name, email, phone } => net.add_profile(name, email, phone).is_ok(),
            Self::UpdateProfile {
                id,
                name,
                email,
                phone,
            } => {
                let update = ProfileUpdate {
                    name: name.map(str::to_string),
                    email: email.map(str::to_string),
                    phone: phone.map(str::to_string),
                };
                net.update_profile(id, &update).is_ok()
            }
            Self::RemoveProfile(id) => net.remove_profile(id).is_ok(),
            Self::AddFriendship(a, b) => net.add_friendship(a, b).is_ok(),
            Self::RemoveFriendship(a, b) => net.remove_friendship(a, b).is_ok(),
        }
    }
}

pub fn arb_id() -> impl Strategy<Value = UserId> + Clone {
    (1..=MAX_ID).prop_map(UserId::new)
}

fn pick(pool: &'static [&'static str]) -> impl Strategy<Value = &'static str> + Clone {
    prop::sample::select(pool)
}

pub fn arb_op() -> impl Strategy<Value = Op> + Clone {
    prop_oneof![
        3 => (pick(NAMES), pick(EMAILS), pick(PHONES))
            .prop_map(|(name, email, phone)| Op::AddProfile { name, email, phone }),
        2 => (
            arb_id(),
            prop::option::of(pick(NAMES)),
            prop::option::of(pick(EMAILS)),
            prop::option::of(pick(PHONES)),
        )
            .prop_map(|(id, name, email, phone)| Op::UpdateProfile {
                id,
                name,
                email,
                phone,
            }),
        1 => arb_id().prop_map(Op::RemoveProfile),
        4 => (arb_id(), arb_id()).prop_map(|(a, b)| Op::AddFriendship(a, b)),
        2 => (arb_id(), arb_id()).prop_map(|(a, b)| Op::RemoveFriendship(a, b)),
    ]
}

pub fn arb_ops() -> impl Strategy<Value = Vec<Op>> + Clone {
    prop::collection::vec(arb_op(), 0..60)
}
