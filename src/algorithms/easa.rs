/*!
Enhanced annotated suffix array.

Simulates the annotated suffix tree in flat arrays: the suffix array and
LCP array of the concatenated terminated fragments, the Abouelhoda child
tables for O(σ) child enumeration of any lcp-interval, and an annotation
table holding the leaf count of every internal interval. Construction is
linear and scoring visits exactly the same virtual nodes, with the same
weights, as the tree backends.
*/

use crate::algorithms::suffix_array::{lcp_array, suffix_array};
use crate::error::Result;
use crate::text::{common_prefix_len, make_unique_endings};

/// An lcp-interval `ℓ-[begin..end]` of the suffix array: the maximal range
/// of positions whose suffixes share a common prefix of length `lcp`. A
/// singleton interval (`begin == end`) is a leaf of the virtual tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcpInterval {
    /// Common prefix length of the interval
    pub lcp: usize,
    /// First suffix-array position (inclusive)
    pub begin: usize,
    /// Last suffix-array position (inclusive)
    pub end: usize,
}

impl LcpInterval {
    /// Whether the interval is a single suffix-array position.
    pub fn is_leaf(&self) -> bool {
        self.begin == self.end
    }
}

/// The enhanced annotated suffix array backend.
///
/// # Example
/// ```
/// use east_core::algorithms::easa::EnhancedSuffixArray;
///
/// let fragments = vec!["ABCD".to_string(), "ABCE".to_string()];
/// let easa = EnhancedSuffixArray::build(&fragments).unwrap();
/// assert_eq!(easa.score("XYZ", true), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedSuffixArray {
    /// The fragment collection as passed in by the caller
    fragments: Vec<String>,
    /// Concatenation of the terminated fragments
    text: Vec<char>,
    /// Suffix array of `text`
    suffix_table: Vec<usize>,
    /// LCP array of `text`
    lcp_table: Vec<usize>,
    /// Abouelhoda child table, `up` entries
    child_up: Vec<usize>,
    /// Abouelhoda child table, `down` entries
    child_down: Vec<usize>,
    /// Abouelhoda child table, next sibling at the same lcp level
    child_next: Vec<usize>,
    /// Leaf count of every internal interval, at its canonical index
    annotations: Vec<usize>,
}

impl EnhancedSuffixArray {
    /// Builds the enhanced suffix array over a fragment collection.
    ///
    /// Fails with [`AstError::EmptyCollection`](crate::AstError::EmptyCollection)
    /// on an empty collection and with
    /// [`AstError::ReservedCharacterInInput`](crate::AstError::ReservedCharacterInInput)
    /// when a fragment contains a code point from the terminator region.
    pub fn build(fragments: &[String]) -> Result<Self> {
        let strings = make_unique_endings(fragments)?;
        let text: Vec<char> = strings.into_iter().flatten().collect();
        let suffix_table = suffix_array(&text);
        let lcp_table = lcp_array(&text, &suffix_table);
        let (child_up, child_down) = child_tables(&lcp_table);
        let child_next = child_next_table(&lcp_table);
        let annotations = annotation_table(&lcp_table, fragments.len());
        Ok(Self {
            fragments: fragments.to_vec(),
            text,
            suffix_table,
            lcp_table,
            child_up,
            child_down,
            child_next,
            annotations,
        })
    }

    /// The fragment collection the index was built over.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The root interval covering the whole suffix array.
    pub fn root_interval(&self) -> LcpInterval {
        LcpInterval {
            lcp: 0,
            begin: 0,
            end: self.suffix_table.len() - 1,
        }
    }

    /// Leaf-count annotation of an interval; a leaf interval counts 1.
    pub fn annotation(&self, interval: LcpInterval) -> usize {
        if interval.is_leaf() {
            1
        } else {
            self.annotations[self.interval_index(interval)]
        }
    }

    /// Canonical index of an internal interval: the first position at or
    /// after `begin` whose LCP entry equals the interval's lcp.
    fn interval_index(&self, interval: LcpInterval) -> usize {
        let mut p = interval.begin;
        while self.lcp_table[p] != interval.lcp {
            p += 1;
        }
        p
    }

    /// Edge depth of the interval `[i..j]` via the child tables.
    fn lcp_value(&self, i: usize, j: usize) -> usize {
        let n = self.suffix_table.len();
        if (i == 0 || i == n - 1) && j == n - 1 {
            return 0;
        }
        if j + 1 < n {
            let up = self.child_up[j + 1];
            if i < up && up <= j {
                return self.lcp_table[up];
            }
        }
        self.lcp_table[self.child_down[i]]
    }

    /// The child interval of `[i..j]` whose edge starts with `c`, if any.
    fn child_interval(&self, i: usize, j: usize, c: char) -> Option<LcpInterval> {
        if i == j {
            return None;
        }
        let n = self.suffix_table.len();
        let depth = self.lcp_value(i, j);
        let mut first;
        if i == 0 && j == n - 1 {
            first = 0;
        } else {
            let up = self.child_up[j + 1];
            first = if i < up { up } else { self.child_down[i] };
            if self.text[self.suffix_table[i] + depth] == c {
                return Some(LcpInterval {
                    lcp: self.lcp_value(i, first - 1),
                    begin: i,
                    end: first - 1,
                });
            }
        }
        while self.child_next[first] != 0 {
            let next = self.child_next[first];
            if self.text[self.suffix_table[first] + depth] == c {
                return Some(LcpInterval {
                    lcp: self.lcp_value(first, next - 1),
                    begin: first,
                    end: next - 1,
                });
            }
            first = next;
        }
        if self.text[self.suffix_table[first] + depth] == c {
            return Some(LcpInterval {
                lcp: self.lcp_value(first, j),
                begin: first,
                end: j,
            });
        }
        None
    }

    /// All child intervals of `[i..j]`, ordered by their first edge
    /// character (suffix-array order).
    fn child_intervals(&self, i: usize, j: usize) -> Vec<LcpInterval> {
        if i == j {
            return Vec::new();
        }
        let n = self.suffix_table.len();
        let mut intervals = Vec::new();
        let mut first;
        if i == 0 && j == n - 1 {
            first = 0;
        } else {
            let up = self.child_up[j + 1];
            first = if i < up { up } else { self.child_down[i] };
            intervals.push(LcpInterval {
                lcp: self.lcp_value(i, first - 1),
                begin: i,
                end: first - 1,
            });
        }
        while self.child_next[first] != 0 {
            let next = self.child_next[first];
            intervals.push(LcpInterval {
                lcp: self.lcp_value(first, next - 1),
                begin: first,
                end: next - 1,
            });
            first = next;
        }
        intervals.push(LcpInterval {
            lcp: self.lcp_value(first, j),
            begin: first,
            end: j,
        });
        intervals
    }

    /// Matches `query` against the virtual tree and returns the score.
    ///
    /// Same semantics as the tree scorer: a suffix walk accumulating the
    /// conditional probability `annotation(child) / annotation(parent)` of
    /// every interval on the longest matching path. Empty and non-matching
    /// queries score `0`.
    pub fn score(&self, query: &str, normalized: bool) -> f64 {
        let query: Vec<char> = query.chars().collect();
        if query.is_empty() {
            return 0.0;
        }
        let mut result = 0.0;
        for suffix_start in 0..query.len() {
            let (suffix_result, matched) = self.score_suffix(&query[suffix_start..], normalized);
            if matched > 0 {
                result += suffix_result;
            }
        }
        result / query.len() as f64
    }

    /// Per-suffix score contributions in suffix-start order.
    pub fn suffix_scores(&self, query: &str, normalized: bool) -> Vec<(String, f64)> {
        let query: Vec<char> = query.chars().collect();
        let mut scores = Vec::with_capacity(query.len());
        for suffix_start in 0..query.len() {
            let suffix = &query[suffix_start..];
            let (suffix_result, matched) = self.score_suffix(suffix, normalized);
            let contribution = if matched > 0 { suffix_result } else { 0.0 };
            scores.push((suffix.iter().collect(), contribution));
        }
        scores
    }

    fn score_suffix(&self, suffix: &[char], normalized: bool) -> (f64, usize) {
        let n = self.suffix_table.len();
        let mut suffix = suffix;
        let mut suffix_score = 0.0;
        let mut matched = 0usize;
        let mut nodes_matched = 0usize;

        let mut parent = self.root_interval();
        let mut child = self.child_interval(parent.begin, parent.end, suffix[0]);
        while let Some(interval) = child {
            nodes_matched += 1;
            let label_start = self.suffix_table[interval.begin] + parent.lcp;
            let label_end = if interval.is_leaf() {
                n
            } else {
                label_start + interval.lcp - parent.lcp
            };
            let m = common_prefix_len(suffix, &self.text[label_start..label_end]);
            suffix_score += self.annotation(interval) as f64 / self.annotation(parent) as f64;
            matched += m;
            suffix = &suffix[m..];
            if !suffix.is_empty() && m == label_end - label_start {
                parent = interval;
                child = self.child_interval(parent.begin, parent.end, suffix[0]);
            } else {
                break;
            }
        }

        let mut suffix_result = suffix_score + matched as f64 - nodes_matched as f64;
        if normalized && matched > 0 {
            suffix_result /= matched as f64;
        }
        (suffix_result, matched)
    }

    /// Visits every internal interval, the root included, parents before
    /// children; children are visited in edge-character order.
    pub fn traverse_pre_order<F: FnMut(LcpInterval)>(&self, mut callback: F) {
        let mut stack = vec![self.root_interval()];
        while let Some(interval) = stack.pop() {
            callback(interval);
            let children = self.child_intervals(interval.begin, interval.end);
            for child in children.into_iter().rev() {
                if !child.is_leaf() {
                    stack.push(child);
                }
            }
        }
    }

    /// Visits every internal interval, the root included, children before
    /// parents, in a single LCP scan with an explicit frame stack.
    pub fn traverse_post_order<F: FnMut(LcpInterval)>(&self, mut callback: F) {
        post_order_walk(&self.lcp_table, |interval, _children| callback(interval));
    }
}

/// One stack pass over the LCP array fills the `up` and `down` child table
/// entries.
fn child_tables(lcp_table: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let n = lcp_table.len();
    let mut up = vec![0usize; n];
    let mut down = vec![0usize; n];
    let mut last: Option<usize> = None;
    let mut stack = vec![0usize];
    for i in 0..n {
        while lcp_table[i] < lcp_table[*stack.last().expect("stack keeps a sentinel")] {
            let popped = stack.pop().expect("stack keeps a sentinel");
            last = Some(popped);
            let top = *stack.last().expect("stack keeps a sentinel");
            if lcp_table[i] <= lcp_table[top] && lcp_table[top] != lcp_table[popped] {
                down[top] = popped;
            }
        }
        if let Some(popped) = last.take() {
            up[i] = popped;
        }
        stack.push(i);
    }
    (up, down)
}

/// Second stack pass fills the next-sibling chain at each lcp level.
fn child_next_table(lcp_table: &[usize]) -> Vec<usize> {
    let n = lcp_table.len();
    let mut next = vec![0usize; n];
    let mut stack = vec![0usize];
    for i in 0..n {
        while lcp_table[i] < lcp_table[*stack.last().expect("stack keeps a sentinel")] {
            stack.pop();
        }
        if lcp_table[i] == lcp_table[*stack.last().expect("stack keeps a sentinel")] {
            let same_level = stack.pop().expect("stack keeps a sentinel");
            next[same_level] = i;
        }
        stack.push(i);
    }
    next
}

/// Iterative post-order walk over all internal lcp-intervals. The callback
/// receives each interval together with its direct children in ascending
/// `begin` order; children are emitted before their parent.
fn post_order_walk<F: FnMut(LcpInterval, &[LcpInterval])>(lcp_table: &[usize], mut callback: F) {
    struct Frame {
        lcp: usize,
        begin: usize,
        children: Vec<LcpInterval>,
    }

    let n = lcp_table.len();
    if n == 0 {
        return;
    }
    let mut stack = vec![Frame {
        lcp: 0,
        begin: 0,
        children: Vec::new(),
    }];
    let mut pending: Option<LcpInterval> = None;
    for i in 1..n {
        let mut left_bound = i - 1;
        while lcp_table[i] < stack.last().expect("root frame stays").lcp {
            let top = stack.pop().expect("root frame stays");
            let interval = LcpInterval {
                lcp: top.lcp,
                begin: top.begin,
                end: i - 1,
            };
            callback(interval, &top.children);
            left_bound = interval.begin;
            if lcp_table[i] <= stack.last().expect("root frame stays").lcp {
                stack
                    .last_mut()
                    .expect("root frame stays")
                    .children
                    .push(interval);
            } else {
                pending = Some(interval);
            }
        }
        if lcp_table[i] > stack.last().expect("root frame stays").lcp {
            let children = match pending.take() {
                Some(interval) => vec![interval],
                None => Vec::new(),
            };
            stack.push(Frame {
                lcp: lcp_table[i],
                begin: left_bound,
                children,
            });
        }
    }
    let top = stack.pop().expect("root frame stays");
    let interval = LcpInterval {
        lcp: top.lcp,
        begin: top.begin,
        end: n - 1,
    };
    callback(interval, &top.children);
}

/// Computes the leaf count of every internal interval by a post-order walk:
/// singleton positions between the children plus the children's own counts.
/// The root entry is reduced by the number of fragments to discount the
/// degenerate terminator-only leaves.
fn annotation_table(lcp_table: &[usize], fragment_count: usize) -> Vec<usize> {
    let n = lcp_table.len();
    let mut annotations = vec![0usize; n];
    post_order_walk(lcp_table, |interval, children| {
        let index = canonical_index(lcp_table, interval);
        let mut position = interval.begin;
        let mut total = 0usize;
        for child in children {
            if position < child.begin {
                total += child.begin - position;
            }
            total += annotations[canonical_index(lcp_table, *child)];
            position = child.end + 1;
        }
        if position <= interval.end {
            total += interval.end - position + 1;
        }
        annotations[index] = total;
    });
    annotations[0] -= fragment_count;
    annotations
}

fn canonical_index(lcp_table: &[usize], interval: LcpInterval) -> usize {
    let mut p = interval.begin;
    while lcp_table[p] != interval.lcp {
        p += 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::naive;
    use crate::error::AstError;

    fn fragments(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    const COLLECTIONS: &[&[&str]] = &[
        &["ABCD", "ABCE"],
        &["AAAA"],
        &["HELLO", "WORLD", "HELLOWORLD"],
        &["ABAB", "BA"],
        &["AB", "AB"],
        &["MISSISSIPPI", "MISS", "SIPPI"],
        &["A"],
    ];

    #[test]
    fn test_empty_collection_is_rejected() {
        let err = EnhancedSuffixArray::build(&[]).unwrap_err();
        assert!(matches!(err, AstError::EmptyCollection));
    }

    #[test]
    fn test_reserved_code_points_are_rejected() {
        let err = EnhancedSuffixArray::build(&fragments(&["A\u{0A00}B"])).unwrap_err();
        assert!(matches!(err, AstError::ReservedCharacterInInput { .. }));
    }

    #[test]
    fn test_leaf_intervals_count_terminated_suffixes() {
        for items in COLLECTIONS {
            let easa = EnhancedSuffixArray::build(&fragments(items)).unwrap();
            let expected: usize = items.iter().map(|s| s.chars().count() + 1).sum();
            assert_eq!(easa.suffix_table.len(), expected, "for {items:?}");
        }
    }

    #[test]
    fn test_root_annotation_discounts_terminator_leaves() {
        let easa = EnhancedSuffixArray::build(&fragments(&["ABCD", "ABCE"])).unwrap();
        assert_eq!(easa.annotation(easa.root_interval()), 8);
    }

    #[test]
    fn test_scores_match_the_naive_tree_exactly() {
        let queries = ["ABC", "ABCD", "AAA", "AAAB", "HELLO", "ISS", "XYZ", "BA"];
        for items in COLLECTIONS {
            let easa = EnhancedSuffixArray::build(&fragments(items)).unwrap();
            let tree = naive::build(&fragments(items)).unwrap();
            for query in queries {
                for normalized in [true, false] {
                    assert_eq!(
                        easa.score(query, normalized),
                        tree.score(query, normalized),
                        "score differs for {items:?} / {query:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_internal_annotations_match_tree_weights() {
        for items in COLLECTIONS {
            let easa = EnhancedSuffixArray::build(&fragments(items)).unwrap();
            let tree = naive::build(&fragments(items)).unwrap();

            let mut interval_weights = Vec::new();
            easa.traverse_post_order(|interval| {
                interval_weights.push(easa.annotation(interval));
            });
            interval_weights.sort_unstable();

            let mut node_weights = Vec::new();
            tree.traverse_post_order(|node| {
                if !tree.is_leaf(node) {
                    node_weights.push(tree.weight(node));
                }
            });
            node_weights.sort_unstable();

            assert_eq!(interval_weights, node_weights, "for {items:?}");
        }
    }

    #[test]
    fn test_pre_and_post_order_visit_the_same_intervals() {
        for items in COLLECTIONS {
            let easa = EnhancedSuffixArray::build(&fragments(items)).unwrap();
            let mut pre = Vec::new();
            easa.traverse_pre_order(|interval| pre.push(interval));
            let mut post = Vec::new();
            easa.traverse_post_order(|interval| post.push(interval));

            assert_eq!(pre[0], easa.root_interval());
            assert_eq!(*post.last().unwrap(), easa.root_interval());

            let key = |iv: &LcpInterval| (iv.lcp, iv.begin, iv.end);
            let mut pre_sorted: Vec<_> = pre.iter().map(key).collect();
            let mut post_sorted: Vec<_> = post.iter().map(key).collect();
            pre_sorted.sort_unstable();
            post_sorted.sort_unstable();
            assert_eq!(pre_sorted, post_sorted, "for {items:?}");
        }
    }

    #[test]
    fn test_suffix_scores_match_the_full_score() {
        let easa = EnhancedSuffixArray::build(&fragments(&["ABCD", "ABCE"])).unwrap();
        let scores = easa.suffix_scores("ABCD", true);
        assert_eq!(scores.len(), 4);
        let total: f64 = scores.iter().map(|(_, s)| s).sum();
        assert_eq!(total / 4.0, easa.score("ABCD", true));
    }
}
