//! Greedy single-pass duplicate clustering.
//!
//! Each not-yet-grouped record becomes an *anchor* and collects every later,
//! ungrouped record that scores at or above the threshold against it.
//! Members are compared with the anchor only, never with each other, so a
//! group is a star around its anchor rather than a fully connected cluster.
//! Results depend on input order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::classify::{classify, MatchType};
use crate::model::{Contact, Order, Product};
use crate::scoring::{ContactScorer, OrderScorer, ProductScorer, Scorer};

/// Default inclusion threshold (percent).
pub const DEFAULT_THRESHOLD: u8 = 70;

/// Records believed to describe the same real-world entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup<T> {
    /// Synthetic id, unique per call
    pub id: String,
    /// Anchor first, then matches in input order; always two or more
    pub members: Vec<T>,
    /// Highest pairwise score seen while building the group
    pub similarity_score: u8,
    pub match_type: MatchType,
    /// Built from a caller's selection rather than by clustering
    #[serde(default)]
    pub manual: bool,
}

impl<T: Clone> DuplicateGroup<T> {
    /// Build a group from caller-chosen members without any threshold.
    ///
    /// Members are scored against the first one for information only.
    /// Returns `None` for fewer than two members.
    pub fn manual<S>(members: Vec<T>, scorer: &S) -> Option<Self>
    where
        S: Scorer<T> + ?Sized,
    {
        if members.len() < 2 {
            return None;
        }

        let anchor = &members[0];
        let mut max_score: u8 = 0;
        let mut reasons = Vec::new();
        for other in &members[1..] {
            let sim = scorer.score(anchor, other);
            max_score = max_score.max(sim.score);
            reasons.extend(sim.reasons);
        }

        Some(Self {
            id: Uuid::new_v4().to_string(),
            match_type: classify(&reasons, scorer.fallback_category()),
            members,
            similarity_score: max_score,
            manual: true,
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Partition `records` into duplicate groups.
///
/// Records that match nothing are left out. Groups come back sorted by
/// `similarity_score`, highest first; equal scores keep discovery order.
pub fn cluster<T, S>(records: &[T], scorer: &S, threshold: u8) -> Vec<DuplicateGroup<T>>
where
    T: Clone,
    S: Scorer<T> + ?Sized,
{
    let mut groups: Vec<DuplicateGroup<T>> = Vec::new();
    let mut processed: HashSet<usize> = HashSet::new();

    for i in 0..records.len() {
        if processed.contains(&i) {
            continue;
        }

        let mut member_indices = vec![i];
        let mut max_score: u8 = 0;
        let mut reasons = Vec::new();

        for j in (i + 1)..records.len() {
            if processed.contains(&j) {
                continue;
            }

            let sim = scorer.score(&records[i], &records[j]);
            if sim.score >= threshold {
                trace!(anchor = i, candidate = j, score = sim.score, "pair above threshold");
                member_indices.push(j);
                max_score = max_score.max(sim.score);
                reasons.extend(sim.reasons);
            }
        }

        if member_indices.len() > 1 {
            processed.extend(member_indices.iter().copied());
            groups.push(DuplicateGroup {
                id: Uuid::new_v4().to_string(),
                members: member_indices.iter().map(|&k| records[k].clone()).collect(),
                similarity_score: max_score,
                match_type: classify(&reasons, scorer.fallback_category()),
                manual: false,
            });
        }
    }

    groups.sort_by(|a, b| b.similarity_score.cmp(&a.similarity_score));

    debug!(
        records = records.len(),
        groups = groups.len(),
        threshold,
        "clustered records"
    );
    groups
}

/// Pair up a selection as consecutive, non-overlapping pairs.
///
/// Fallback for when clustering finds nothing in a user's selection: the
/// pairs are kept whatever they score. A trailing odd record is left out.
pub fn pair_consecutive<T, S>(records: &[T], scorer: &S) -> Vec<DuplicateGroup<T>>
where
    T: Clone,
    S: Scorer<T> + ?Sized,
{
    records
        .chunks_exact(2)
        .filter_map(|pair| DuplicateGroup::manual(pair.to_vec(), scorer))
        .collect()
}

/// Find duplicate contacts with the default field rules.
pub fn find_duplicate_contacts(contacts: &[Contact], threshold: u8) -> Vec<DuplicateGroup<Contact>> {
    cluster(contacts, &ContactScorer::default(), threshold)
}

/// Find duplicate orders with the default field rules.
pub fn find_duplicate_orders(orders: &[Order], threshold: u8) -> Vec<DuplicateGroup<Order>> {
    cluster(orders, &OrderScorer::default(), threshold)
}

/// Find duplicate products with the default field rules.
pub fn find_duplicate_products(products: &[Product], threshold: u8) -> Vec<DuplicateGroup<Product>> {
    cluster(products, &ProductScorer::default(), threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{MatchCategory, MatchReason, Similarity};
    use std::collections::HashMap;

    /// Scores pairs of letters from a lookup table; unknown pairs score 0.
    struct TableScorer {
        scores: HashMap<(char, char), u8>,
    }

    impl TableScorer {
        fn new(entries: &[(char, char, u8)]) -> Self {
            let mut scores = HashMap::new();
            for &(a, b, s) in entries {
                scores.insert((a, b), s);
                scores.insert((b, a), s);
            }
            Self { scores }
        }
    }

    impl Scorer<char> for TableScorer {
        fn score(&self, a: &char, b: &char) -> Similarity {
            let score = self.scores.get(&(*a, *b)).copied().unwrap_or(0);
            Similarity {
                score,
                reasons: vec![MatchReason::new(MatchCategory::Name, format!("{a}{b}"))],
            }
        }

        fn fallback_category(&self) -> MatchCategory {
            MatchCategory::Name
        }
    }

    #[test]
    fn empty_and_single_inputs() {
        let scorer = TableScorer::new(&[]);
        assert!(cluster::<char, _>(&[], &scorer, 70).is_empty());
        assert!(cluster(&['a'], &scorer, 70).is_empty());
    }

    #[test]
    fn threshold_is_inclusive() {
        let scorer = TableScorer::new(&[('a', 'b', 70)]);
        assert_eq!(cluster(&['a', 'b'], &scorer, 70).len(), 1);
        assert!(cluster(&['a', 'b'], &scorer, 71).is_empty());
    }

    #[test]
    fn star_shape_is_preserved() {
        // b and c both match a, but not each other
        let scorer = TableScorer::new(&[('a', 'b', 80), ('a', 'c', 90), ('b', 'c', 0)]);
        let groups = cluster(&['a', 'b', 'c'], &scorer, 70);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!['a', 'b', 'c']);
        assert_eq!(groups[0].similarity_score, 90);
    }

    #[test]
    fn grouped_records_are_not_reconsidered() {
        // c would match b strongly, but b is already taken by a
        let scorer = TableScorer::new(&[('a', 'b', 75), ('b', 'c', 99)]);
        let groups = cluster(&['a', 'b', 'c'], &scorer, 70);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!['a', 'b']);
    }

    #[test]
    fn order_dependence() {
        let scorer = TableScorer::new(&[('a', 'b', 75), ('b', 'c', 99)]);
        let groups = cluster(&['b', 'a', 'c'], &scorer, 70);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members, vec!['b', 'a', 'c']);
    }

    #[test]
    fn sorted_by_score_descending() {
        let scorer = TableScorer::new(&[('a', 'b', 72), ('c', 'd', 95), ('e', 'f', 80)]);
        let groups = cluster(&['a', 'b', 'c', 'd', 'e', 'f'], &scorer, 70);
        let scores: Vec<u8> = groups.iter().map(|g| g.similarity_score).collect();
        assert_eq!(scores, vec![95, 80, 72]);
        assert!(groups.iter().all(|g| g.len() >= 2 && !g.manual));
    }

    #[test]
    fn consecutive_pairs_ignore_threshold() {
        let scorer = TableScorer::new(&[]);
        let groups = pair_consecutive(&['a', 'b', 'c', 'd', 'e'], &scorer);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members, vec!['a', 'b']);
        assert_eq!(groups[1].members, vec!['c', 'd']);
        assert!(groups.iter().all(|g| g.manual && g.similarity_score == 0));
    }

    #[test]
    fn manual_group_needs_two_members() {
        let scorer = TableScorer::new(&[]);
        assert!(DuplicateGroup::manual(vec!['a'], &scorer).is_none());
        assert!(DuplicateGroup::manual(vec!['a', 'z'], &scorer).is_some());
    }
}
