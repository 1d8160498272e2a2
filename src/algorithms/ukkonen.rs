/*!
Linear-time generalized suffix tree construction.

Ukkonen's algorithm extended to a collection of strings: each fragment is
processed in phases, one per character, and every phase runs the pending
continuations using suffix links and skip/count descent. All leaves keep an
open edge end resolved through the tree's shared open-end vector, so
extending every leaf of a fragment by one character is a single counter
bump. Total work is linear in the combined fragment length.
*/

use crate::algorithms::tree::{AnnotatedTree, ROOT};
use crate::error::Result;
use crate::text::{common_prefix_len, make_unique_endings};

/// Carry-over state between phases of one fragment.
///
/// `node` and `path` name the point where the previous phase stopped (the
/// path is replayed by skip/count before the first continuation of the next
/// phase); `continuation` is the first continuation that still needs work —
/// earlier ones were settled by a show-stopper.
struct PhaseState {
    node: usize,
    path: (usize, usize, usize),
    continuation: usize,
}

/// Builds an annotated suffix tree with the extended Ukkonen algorithm.
///
/// Produces a tree structurally identical to [`naive::build`](super::naive::build)
/// in linear time. Fails with
/// [`AstError::EmptyCollection`](crate::AstError::EmptyCollection) on an
/// empty collection and with
/// [`AstError::ReservedCharacterInInput`](crate::AstError::ReservedCharacterInInput)
/// when a fragment contains a code point from the terminator region.
///
/// # Example
/// ```
/// use east_core::algorithms::ukkonen;
///
/// let fragments = vec!["ABCD".to_string(), "ABCE".to_string()];
/// let tree = ukkonen::build(&fragments).unwrap();
/// assert_eq!(tree.weight(east_core::algorithms::tree::ROOT), 8);
/// ```
pub fn build(fragments: &[String]) -> Result<AnnotatedTree> {
    let strings = make_unique_endings(fragments)?;
    let mut tree = AnnotatedTree::new(fragments.to_vec(), strings);

    for fragment in 0..tree.strings.len() {
        let (start_phase, mut state) = scan_existing_prefix(&mut tree, fragment);
        let len = tree.strings[fragment].len();
        for phase in start_phase..len {
            run_phase(&mut tree, fragment, phase, &mut state);
        }
    }

    tree.remove_terminator_children();
    tree.annotate();
    tree.update_depths();
    Ok(tree)
}

/// Walks the tree along the fragment to find how much of it is already
/// encoded by earlier fragments. Returns the number of implicit phases and
/// the node/path to start the first explicit phase from; the fragment's
/// open-end frontier is primed with the implicit length.
fn scan_existing_prefix(tree: &mut AnnotatedTree, fragment: usize) -> (usize, PhaseState) {
    let mut already_in_tree = 0;
    let mut node = ROOT;
    let mut path = (0, 0, 0);
    let mut pos = 0;

    let mut child = tree
        .strings[fragment]
        .first()
        .and_then(|&c| tree.choose_arc(ROOT, c));
    while let Some(current) = child {
        let (other, start, end) = tree.span(current).expect("non-root node has an edge");
        let matched = common_prefix_len(
            &tree.strings[fragment][pos..],
            &tree.strings[other][start..end],
        );
        already_in_tree += matched;
        if matched == end - start {
            pos += matched;
            node = current;
            child = tree.strings[fragment]
                .get(pos)
                .and_then(|&c| tree.choose_arc(node, c));
        } else {
            path = (other, start, start + matched);
            break;
        }
    }

    tree.open_ends[fragment] = already_in_tree;
    let state = PhaseState {
        node,
        path,
        continuation: 0,
    };
    (already_in_tree, state)
}

/// Runs one explicit phase: continuations `state.continuation ..= phase`,
/// each applying exactly one of the Ukkonen rules for the character
/// `strings[fragment][phase]`. A show-stopper (rule 3) records the restart
/// point and aborts the remaining continuations; they would be no-ops.
fn run_phase(tree: &mut AnnotatedTree, fragment: usize, phase: usize, state: &mut PhaseState) {
    let mut current = state.node;
    let mut link_source: Option<usize> = None;
    let (mut path_fragment, mut path_start, mut path_end) = state.path;
    let start_continuation = state.continuation;

    for continuation in start_continuation..=phase {
        if continuation > start_continuation {
            // Go up at most one edge to a node with a suffix link, remember
            // the skipped edge, then hop through the link. From the root the
            // whole remaining suffix is replayed instead.
            path_fragment = 0;
            path_start = 0;
            path_end = 0;
            if tree.nodes[current].suffix_link.is_none() {
                let (f, s, e) = tree.span(current).expect("non-root node has an edge");
                path_fragment = f;
                path_start = s;
                path_end = e;
                current = tree.nodes[current].parent;
            }
            if current == ROOT {
                path_fragment = fragment;
                path_start = continuation;
                path_end = phase;
            } else {
                current = tree.nodes[current]
                    .suffix_link
                    .expect("internal node past the first continuation has a link");
            }
        }

        // Skip/count descent: jump whole edges using only their lengths.
        let mut g = path_end - path_start;
        if g > 0 {
            current = tree
                .choose_arc(current, tree.strings[path_fragment][path_start])
                .expect("replayed path exists in the tree");
            loop {
                let edge_len = tree.edge_len(current);
                if g < edge_len {
                    break;
                }
                path_start += edge_len;
                g -= edge_len;
                if g == 0 {
                    break;
                }
                current = tree
                    .choose_arc(current, tree.strings[path_fragment][path_start])
                    .expect("replayed path exists in the tree");
            }
        }

        let next_char = tree.strings[fragment][phase];
        if g == 0 {
            if tree.is_leaf(current) {
                // Rule 1: the open end of the leaf grows by itself.
            } else if tree.choose_arc(current, next_char).is_none() {
                // Rule 2a: new open leaf below an existing node.
                if let Some(source) = link_source {
                    tree.nodes[source].suffix_link = Some(current);
                }
                let leaf = tree.new_child(current, fragment, phase, None);
                tree.nodes[leaf].weight = 1;
                if continuation == start_continuation {
                    state.node = leaf;
                    state.path = (0, 0, 0);
                }
            } else {
                // Rule 3a: the continuation is already present.
                if let Some(source) = link_source {
                    tree.nodes[source].suffix_link = Some(current);
                }
                state.continuation = continuation;
                state.node = current;
                state.path = (fragment, phase, phase + 1);
                break;
            }
            link_source = None;
        } else {
            let edge = tree.nodes[current].edge.expect("non-root node has an edge");
            let (other, start) = (edge.fragment, edge.start);
            if tree.strings[other][start + g] != next_char {
                // Rule 2b: split the edge at the mismatch, attach the new
                // leaf, and leave a pending suffix link on the split node.
                let parent = tree.nodes[current].parent;
                tree.remove_child(parent, current);
                let inner = tree.new_child(parent, other, start, Some(start + g));
                let leaf = tree.new_child(inner, fragment, phase, None);
                tree.nodes[leaf].weight = 1;
                if continuation == start_continuation {
                    state.node = leaf;
                    state.path = (0, 0, 0);
                }
                if let Some(e) = tree.nodes[current].edge.as_mut() {
                    e.start += g;
                }
                tree.add_child(inner, current);
                if let Some(source) = link_source {
                    tree.nodes[source].suffix_link = Some(inner);
                }
                link_source = Some(inner);
                current = inner;
            } else {
                // Rule 3b: show-stopper in the middle of an edge.
                link_source = None;
                state.continuation = continuation;
                state.node = tree.nodes[current].parent;
                state.path = (other, start, start + g + 1);
                break;
            }
        }
    }

    // Extend every open leaf of this fragment by the phase character.
    tree.open_ends[fragment] += 1;
}
