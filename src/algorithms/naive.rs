/*!
Naive generalized suffix tree construction.

Every suffix of every fragment is inserted by walking from the root, which
gives quadratic worst-case time in the total fragment length. The resulting
tree is identical to the one produced by the linear builder and serves as
its reference in tests; for realistic inputs prefer
[`ukkonen`](super::ukkonen).
*/

use crate::algorithms::tree::{AnnotatedTree, ROOT};
use crate::error::Result;
use crate::text::{common_prefix_len, make_unique_endings};

/// Builds an annotated suffix tree by direct suffix insertion.
///
/// Fails with [`AstError::EmptyCollection`](crate::AstError::EmptyCollection)
/// on an empty collection and with
/// [`AstError::ReservedCharacterInInput`](crate::AstError::ReservedCharacterInInput)
/// when a fragment contains a code point from the terminator region.
///
/// # Example
/// ```
/// use east_core::algorithms::naive;
///
/// let fragments = vec!["ABCD".to_string(), "ABCE".to_string()];
/// let tree = naive::build(&fragments).unwrap();
/// assert_eq!(tree.weight(east_core::algorithms::tree::ROOT), 8);
/// ```
pub fn build(fragments: &[String]) -> Result<AnnotatedTree> {
    let strings = make_unique_endings(fragments)?;
    let mut tree = AnnotatedTree::new(fragments.to_vec(), strings);

    for fragment in 0..tree.strings.len() {
        // The suffix holding only the terminator is skipped: it would become
        // a degenerate root child that annotation must not count.
        let len = tree.strings[fragment].len();
        for suffix_start in 0..len - 1 {
            insert_suffix(&mut tree, fragment, suffix_start);
        }
    }

    let root_weight = tree.nodes[ROOT]
        .children
        .values()
        .map(|&child| tree.nodes[child].weight)
        .sum();
    tree.nodes[ROOT].weight = root_weight;
    tree.update_depths();
    Ok(tree)
}

/// Walks the maximal matching path for one suffix and attaches a new leaf,
/// splitting the edge where the match ends. Every fully traversed node gains
/// one unit of weight; the unique terminators guarantee that each suffix
/// creates exactly one new leaf.
fn insert_suffix(tree: &mut AnnotatedTree, fragment: usize, suffix_start: usize) {
    let len = tree.strings[fragment].len();
    let mut pos = suffix_start;
    let mut node = ROOT;
    let mut child = tree.choose_arc(node, tree.strings[fragment][pos]);

    while let Some(current) = child {
        let (other, start, end) = tree.span(current).expect("non-root node has an edge");
        let matched = common_prefix_len(
            &tree.strings[fragment][pos..],
            &tree.strings[other][start..end],
        );
        if matched == end - start {
            // Matched the whole arc, proceed with the child.
            pos += matched;
            node = current;
            tree.nodes[node].weight += 1;
            child = tree.choose_arc(node, tree.strings[fragment][pos]);
        } else {
            // The matching path ends inside this arc: split it with a fresh
            // internal node and hang the rest of the suffix below it.
            tree.remove_child(node, current);
            let inner = tree.new_child(node, fragment, pos, Some(pos + matched));
            let leaf = tree.new_child(inner, fragment, pos + matched, Some(len));
            if let Some(edge) = tree.nodes[current].edge.as_mut() {
                edge.start += matched;
            }
            tree.add_child(inner, current);
            tree.nodes[leaf].weight = 1;
            tree.nodes[inner].weight = 1 + tree.nodes[current].weight;
            return;
        }
    }

    // No arc to proceed with: the rest of the suffix becomes a new leaf.
    let leaf = tree.new_child(node, fragment, pos, Some(len));
    tree.nodes[leaf].weight = 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AstError;

    const EPS: f64 = 1e-12;

    fn fragments(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_collection_is_rejected() {
        let err = build(&[]).unwrap_err();
        assert!(matches!(err, AstError::EmptyCollection));
    }

    #[test]
    fn test_annotation_conservation() {
        let tree = build(&fragments(&["ABCD", "ABCE"])).unwrap();
        assert_eq!(tree.weight(ROOT), 8);

        let tree = build(&fragments(&["HELLO", "WORLD", "HELLOWORLD"])).unwrap();
        assert_eq!(tree.weight(ROOT), 20);
    }

    #[test]
    fn test_score_of_shared_prefix() {
        let tree = build(&fragments(&["ABCD", "ABCE"])).unwrap();
        assert!((tree.score("ABC", true) - 13.0 / 24.0).abs() < EPS);
    }

    #[test]
    fn test_score_of_full_fragment() {
        let tree = build(&fragments(&["ABCD", "ABCE"])).unwrap();
        assert!((tree.score("ABCD", true) - 85.0 / 192.0).abs() < EPS);
    }

    #[test]
    fn test_score_of_disjoint_alphabet_is_zero() {
        let tree = build(&fragments(&["ABCD", "ABCE"])).unwrap();
        assert_eq!(tree.score("XYZ", true), 0.0);
    }

    #[test]
    fn test_score_of_repeated_characters() {
        let tree = build(&fragments(&["AAAA"])).unwrap();
        assert!((tree.score("AAA", true) - 193.0 / 216.0).abs() < EPS);
    }

    #[test]
    fn test_unnormalized_score_can_exceed_one() {
        let tree = build(&fragments(&["AAAA"])).unwrap();
        let score = tree.score("AAAB", false);
        assert!((score - 31.0 / 24.0).abs() < EPS);
        assert!(score > 0.0 && score < 4.0);
    }

    #[test]
    fn test_score_over_several_fragments() {
        let tree = build(&fragments(&["HELLO", "WORLD", "HELLOWORLD"])).unwrap();
        assert!((tree.score("HELLO", true) - 0.5312222222222222).abs() < EPS);
    }

    #[test]
    fn test_empty_query_scores_zero() {
        let tree = build(&fragments(&["ABCD"])).unwrap();
        assert_eq!(tree.score("", true), 0.0);
    }

    #[test]
    fn test_normalized_score_stays_in_unit_interval() {
        let tree = build(&fragments(&["MISSISSIPPI", "MISS", "SIPPI"])).unwrap();
        for query in ["ISS", "SSI", "PPI", "MISSI", "XYZ", "IPPIS"] {
            let score = tree.score(query, true);
            assert!((0.0..=1.0).contains(&score), "{query} scored {score}");
        }
    }

    #[test]
    fn test_suffix_scores_are_reported_in_suffix_order() {
        let tree = build(&fragments(&["ABCD", "ABCE"])).unwrap();
        let scores = tree.suffix_scores("ABX", true);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].0, "ABX");
        assert_eq!(scores[1].0, "BX");
        assert_eq!(scores[2].0, "X");
        assert!(scores[0].1 > 0.0);
        assert_eq!(scores[2].1, 0.0);

        let total: f64 = scores.iter().map(|(_, s)| s).sum();
        assert!((total / 3.0 - tree.score("ABX", true)).abs() < EPS);
    }

    #[test]
    fn test_leaves_spell_every_suffix() {
        let items = ["ABAB", "BA"];
        let tree = build(&fragments(&items)).unwrap();
        let mut leaves = Vec::new();
        tree.traverse_pre_order(|node| {
            if tree.is_leaf(node) {
                leaves.push(tree.path(node));
            }
        });
        // One leaf per proper suffix of each terminated fragment.
        assert_eq!(leaves.len(), 4 + 2);
        for (i, item) in items.iter().enumerate() {
            let terminated: String = item
                .chars()
                .chain(std::iter::once(char::from_u32(0x0A00 + i as u32).unwrap()))
                .collect();
            for start in 0..item.len() {
                let suffix: String = terminated.chars().skip(start).collect();
                assert!(leaves.contains(&suffix), "missing suffix {suffix:?}");
            }
        }
    }

    #[test]
    fn test_depths_count_nodes_from_root() {
        let tree = build(&fragments(&["AAAA"])).unwrap();
        let mut max_depth = 0;
        tree.traverse_pre_order(|node| max_depth = max_depth.max(tree.depth(node)));
        // Root, three inner nodes on the A-chain, then the deepest leaf.
        assert_eq!(max_depth, 4);
    }
}
