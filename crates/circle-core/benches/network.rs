use circle_core::{SocialNetwork, UserId};
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// (label, profiles, average friends per profile)
const TIERS: &[(&str, usize, usize)] = &[("small", 100, 5), ("medium", 1_000, 10), ("large", 5_000, 20)];

fn random_network(profiles: usize, degree: usize, seed: u64) -> (SocialNetwork, Vec<UserId>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut net = SocialNetwork::new();
    let ids: Vec<UserId> = (0..profiles)
        .map(|n| {
            net.add_profile(format!("user-{n}"), format!("user{n}@example.com"), "")
                .expect("unique triple")
                .id()
        })
        .collect();

    let target = profiles * degree / 2;
    let mut made = 0;
    while made < target {
        let a = ids[rng.gen_range(0..ids.len())];
        let b = ids[rng.gen_range(0..ids.len())];
        if net.add_friendship(a, b).is_ok() {
            made += 1;
        }
    }
    (net, ids)
}

fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("network.suggest_friends");
    for &(name, profiles, degree) in TIERS {
        let (net, ids) = random_network(profiles, degree, 0xC1_2C1E_u64 + profiles as u64);
        group.bench_with_input(BenchmarkId::from_parameter(name), &net, |b, net| {
            let mut cursor = 0;
            b.iter(|| {
                cursor = (cursor + 1) % ids.len();
                black_box(net.suggest_friends(ids[cursor]).map(|s| s.len()))
            });
        });
    }
    group.finish();
}

fn bench_remove_profile(c: &mut Criterion) {
    let mut group = c.benchmark_group("network.remove_profile");
    for &(name, profiles, degree) in TIERS {
        let (net, ids) = random_network(profiles, degree, 0x5EED_u64 + profiles as u64);
        let victim = ids[ids.len() / 2];
        group.bench_with_input(BenchmarkId::from_parameter(name), &net, |b, net| {
            b.iter_batched(
                || net.clone(),
                |mut net| black_box(net.remove_profile(victim).is_ok()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_suggest, bench_remove_profile);
criterion_main!(benches);
