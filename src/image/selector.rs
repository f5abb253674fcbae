//! Uniform random choice over listed images

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one item uniformly at random, `None` when there is nothing to pick
pub fn select_random<'a, T, R>(items: &'a [T], rng: &mut R) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    items.choose(rng)
}
