//! Uniform random selection.
//!
//! One tiny primitive used twice per request: once to choose the image
//! filename from the pool, and once to resolve the `random` filter sentinel
//! against the filter table. An empty pool yields `None`, which callers
//! surface as [`PoolError::Empty`](crate::error::PoolError::Empty).

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one element uniformly at random from `pool`.
///
/// Returns `None` if the pool is empty.
pub fn pick<'a, T, R: Rng + ?Sized>(pool: &'a [T], rng: &mut R) -> Option<&'a T> {
    pool.choose(rng)
}
