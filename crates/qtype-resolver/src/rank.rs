//! Rank-vector domination.

use crate::call::MatchRank;

/// `a` dominates `b` iff it is no worse at every position and strictly
/// better at one. Vectors of different length never dominate each other.
pub fn dominates(a: &[MatchRank], b: &[MatchRank]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x <= y) && a.iter().zip(b).any(|(x, y)| x < y)
}

/// Indexes of the vectors no other vector dominates, in input order.
pub fn non_dominated<V: AsRef<[MatchRank]>>(ranks: &[V]) -> Vec<usize> {
    (0..ranks.len())
        .filter(|&i| {
            !ranks
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && dominates(other.as_ref(), ranks[i].as_ref()))
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/rank_tests.rs"]
mod tests;
