use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generator used by `fit` when no generator is injected: seeded from
/// `random_state` when set, from OS entropy otherwise.
pub(crate) fn rng_from_state(random_state: Option<u64>) -> ChaCha8Rng {
    match random_state {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
