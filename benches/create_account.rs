use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode};
use rand::{distributions::Alphanumeric, rngs::StdRng, Rng, SeedableRng};
use std::sync::Arc;

use accounts::config::SlowHashSettings;
use accounts::hashing::Argon2Hasher;
use accounts::mock;
use accounts::model::Model;
use accounts::schema::{Object, Resource, ResourcePath};
use accounts::AccountModel;

fn gen_password(rng: &mut StdRng) -> String {
    rng.sample_iter(&Alphanumeric).take(16).map(char::from).collect()
}

fn bench_create(c: &mut Criterion) {
    let mut group = c.benchmark_group("account_create");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(10);

    let costs = [("cheap", mock::cheap_hash_settings()), ("default", SlowHashSettings::default())];
    let coll = ResourcePath::from("/accounts/*");
    let subject = AccountModel::new();

    for (label, settings) in costs {
        let hasher = match Argon2Hasher::new(&settings) {
            Ok(h) => h,
            Err(e) => { eprintln!("skipping {}: {}", label, e); continue; }
        };
        let txn = mock::txn_with_hasher(Arc::new(hasher));
        let mut rng = StdRng::seed_from_u64(0xACC0_0001);
        let mut n = 0u64;
        group.bench_with_input(BenchmarkId::new("create", label), &label, |b, _| {
            b.iter(|| {
                n += 1;
                let extra = format!(r#"{{"password":"{}"}}"#, gen_password(&mut rng));
                let mut payload = Resource::new(Object::new(format!("user{}", n), extra.as_bytes()));
                let res = subject.create(&txn, &coll, &mut payload);
                criterion::black_box(res.is_ok());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_create);
criterion_main!(benches);
