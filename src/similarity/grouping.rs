use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::{GroupId, Score, ScoredPair, SimilarityGroup, Threshold};
use crate::similarity::disjoint_set::DisjointSet;
use crate::similarity::explain::explain;
use crate::similarity::normalize::{differs_only_in_formatting, scoring_form};
use crate::similarity::score::score_forms;

/// Group near-duplicate attributes.
///
/// Every unordered pair of distinct strings is scored once; pairs at or above
/// `threshold` are linked, and linked strings are merged into connected
/// components. Clustering is transitive: if A~B and B~C clear the threshold,
/// A, B and C share a group even when A~C does not. Such below-threshold
/// member pairs are reported in [`SimilarityGroup::bridged`].
///
/// Strings without any link are omitted. Groups are ordered by the input
/// position of their first member and numbered from 1; members keep input
/// order. Comparison is O(n²) in the number of distinct strings.
pub fn group<S: AsRef<str>>(strings: &[S], threshold: Threshold) -> Vec<SimilarityGroup> {
    group_with_progress(strings, threshold, |_| {})
}

/// [`group`], calling `on_row(i)` after the `i`-th distinct string has been
/// compared against every later one.
pub fn group_with_progress<S, F>(
    strings: &[S],
    threshold: Threshold,
    mut on_row: F,
) -> Vec<SimilarityGroup>
where
    S: AsRef<str>,
    F: FnMut(usize),
{
    let distinct = distinct(strings);
    let n = distinct.len();
    let forms: Vec<String> = distinct.iter().map(|s| scoring_form(s)).collect();

    let mut set = DisjointSet::new(n);
    let mut links: Vec<(usize, usize, ScoredPair)> = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            let score = score_forms(&forms[i], &forms[j]);
            if threshold.admits(score) {
                set.union(i, j);
                links.push((i, j, scored_pair(distinct[i], distinct[j], score)));
            }
        }
        on_row(i + 1);
    }

    let mut linked = vec![false; n];
    for (i, j, _) in &links {
        linked[*i] = true;
        linked[*j] = true;
    }

    // Components in order of their earliest member.
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut components: Vec<Vec<usize>> = Vec::new();
    for i in (0..n).filter(|&i| linked[i]) {
        let root = set.find(i);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        components[slot].push(i);
    }

    let mut component_links: Vec<Vec<ScoredPair>> = vec![Vec::new(); components.len()];
    let mut linked_pairs: HashSet<(usize, usize)> = HashSet::with_capacity(links.len());
    for (i, j, pair) in links {
        let slot = slot_of_root[&set.find(i)];
        component_links[slot].push(pair);
        linked_pairs.insert((i, j));
    }

    let groups: Vec<SimilarityGroup> = components
        .into_iter()
        .zip(component_links)
        .enumerate()
        .map(|(slot, (members, links))| {
            let mut bridged = Vec::new();
            for (k, &i) in members.iter().enumerate() {
                for &j in &members[k + 1..] {
                    if !linked_pairs.contains(&(i, j)) {
                        let score = score_forms(&forms[i], &forms[j]);
                        bridged.push(scored_pair(distinct[i], distinct[j], score));
                    }
                }
            }

            SimilarityGroup {
                id: (slot + 1) as GroupId,
                members: members.iter().map(|&i| distinct[i].to_string()).collect(),
                links,
                bridged,
            }
        })
        .collect();

    debug!(
        distinct = n,
        groups = groups.len(),
        threshold = threshold.value(),
        "grouping complete"
    );

    groups
}

/// Exact-match deduplication, keeping first occurrences in order.
fn distinct<S: AsRef<str>>(strings: &[S]) -> Vec<&str> {
    let mut seen: HashSet<&str> = HashSet::new();
    strings
        .iter()
        .map(AsRef::as_ref)
        .filter(|s| seen.insert(*s))
        .collect()
}

fn scored_pair(a: &str, b: &str, score: Score) -> ScoredPair {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    ScoredPair {
        first: first.to_string(),
        second: second.to_string(),
        score,
        formatting_only: differs_only_in_formatting(first, second),
        differences: explain(first, second),
    }
}
