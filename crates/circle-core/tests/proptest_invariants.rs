use circle_core::{SocialNetwork, UserId, UserProfile};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;

#[path = "generators.rs"]
mod generators;
use generators::*;

/// Observable state used to check that failed calls change nothing.
fn observe(net: &SocialNetwork) -> (Vec<UserProfile>, Vec<(UserId, UserId)>, UserId) {
    let profiles = net.profiles().cloned().collect();
    let mut edges: Vec<_> = net.graph().edges().map(|e| (*e.from, *e.to)).collect();
    edges.sort();
    (profiles, edges, net.next_id())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn indices_stay_consistent(ops in arb_ops()) {
        let mut net = SocialNetwork::new();
        for op in &ops {
            op.apply(&mut net);
            let report = net.audit();
            prop_assert!(report.is_ok(), "after {:?}: {:?}", op, report.violations);
        }
    }

    #[test]
    fn failed_calls_leave_state_untouched(ops in arb_ops()) {
        let mut net = SocialNetwork::new();
        for op in &ops {
            let before = observe(&net);
            if !op.apply(&mut net) {
                prop_assert_eq!(observe(&net), before, "failed {:?} mutated state", op);
            }
        }
    }

    #[test]
    fn ids_are_strictly_increasing_and_never_reused(ops in arb_ops()) {
        let mut net = SocialNetwork::new();
        let mut seen: HashSet<UserId> = HashSet::new();
        let mut last: Option<UserId> = None;
        for op in &ops {
            let expected = net.next_id();
            let was_add = matches!(op, Op::AddProfile { .. });
            if op.apply(&mut net) && was_add {
                let newest = net.profiles().map(UserProfile::id).max();
                prop_assert_eq!(newest, Some(expected));
                prop_assert!(last.is_none_or(|prev| prev < expected));
                prop_assert!(seen.insert(expected));
                last = Some(expected);
            }
        }
    }

    #[test]
    fn live_profiles_never_share_a_triple(ops in arb_ops()) {
        let mut net = SocialNetwork::new();
        for op in &ops {
            op.apply(&mut net);
        }
        let keys: HashSet<_> = net.profiles().map(UserProfile::key).collect();
        prop_assert_eq!(keys.len(), net.len());
        for key in &keys {
            prop_assert!(net.profile_exists(key));
        }
    }

    #[test]
    fn suggestions_are_two_hops_and_ranked(ops in arb_ops()) {
        let mut net = SocialNetwork::new();
        for op in &ops {
            op.apply(&mut net);
        }
        for profile in net.profiles() {
            let id = profile.id();
            let suggestions = net.suggest_friends(id).expect("live profile");
            for s in &suggestions {
                let other = s.profile.id();
                prop_assert_ne!(other, id);
                prop_assert!(!net.are_friends(id, other));
                let shared = net.mutual_friends(id, other).expect("live");
                prop_assert_eq!(shared.len(), s.mutual_friends);
                prop_assert!(s.mutual_friends > 0);
            }
            let order = net.config().suggestions.name_order;
            for pair in suggestions.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                let rank = b
                    .mutual_friends
                    .cmp(&a.mutual_friends)
                    .then_with(|| order.compare(a.profile.name(), b.profile.name()))
                    .then_with(|| a.profile.id().cmp(&b.profile.id()));
                prop_assert_eq!(rank, Ordering::Less, "{:?} ranked before {:?}", a, b);
            }
        }
    }
}
