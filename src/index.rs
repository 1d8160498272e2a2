/*!
Backend selection and the index contract.

An [`Index`] is a tagged variant over the three interchangeable backends:
the naive tree, the Ukkonen tree and the enhanced suffix array. All three
score identically; they differ only in construction cost and memory layout,
so callers pick one with [`Algorithm`] and use the shared `score`,
`suffix_scores` and `traverse` operations.
*/

use std::fmt;
use std::str::FromStr;

use crate::algorithms::easa::EnhancedSuffixArray;
use crate::algorithms::tree::AnnotatedTree;
use crate::algorithms::{naive, ukkonen};
use crate::error::{AstError, Result};
use crate::text::tokenize;

/// Upper bound on the number of query variants scored during synonym
/// expansion; the Cartesian product of per-word synonym lists is cut off
/// beyond it. The unmodified query is always scored.
pub const MAX_SYNONYM_VARIANTS: usize = 1024;

/// Index construction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Direct suffix insertion, quadratic time
    Naive,
    /// Extended Ukkonen construction, linear time
    Linear,
    /// Enhanced annotated suffix array, linear time
    Easa,
}

impl Algorithm {
    /// The selector name accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Naive => "naive",
            Algorithm::Linear => "linear",
            Algorithm::Easa => "easa",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "naive" => Ok(Algorithm::Naive),
            "linear" => Ok(Algorithm::Linear),
            "easa" => Ok(Algorithm::Easa),
            other => Err(AstError::unknown_algorithm(other)),
        }
    }
}

/// Order of an [`Index::traverse`] walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Parents before children
    PreOrder,
    /// Children before parents
    PostOrder,
    /// Level by level; not supported by the suffix-array backend
    BreadthFirst,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::PreOrder => "pre-order",
            TraversalOrder::PostOrder => "post-order",
            TraversalOrder::BreadthFirst => "breadth-first",
        };
        f.write_str(name)
    }
}

/// Supplies synonyms for query words during scoring.
///
/// The scorer substitutes each query word by itself plus its synonyms and
/// takes the maximum score over the resulting query variants (capped at
/// [`MAX_SYNONYM_VARIANTS`]). Synonym discovery itself is out of scope
/// here; any source of word alternatives can implement this.
pub trait SynonymExpander {
    /// Synonyms of `word`, not including the word itself.
    fn synonyms(&self, word: &str) -> Vec<String>;
}

/// Options for [`Index::score_with`].
pub struct ScoreOptions<'a> {
    /// Divide each suffix contribution by its matched length, keeping the
    /// score in `[0, 1]`. Defaults to `true`.
    pub normalized: bool,
    /// Optional synonym source; when present the query is tokenized and the
    /// best-scoring variant wins.
    pub expander: Option<&'a dyn SynonymExpander>,
}

impl Default for ScoreOptions<'_> {
    fn default() -> Self {
        Self {
            normalized: true,
            expander: None,
        }
    }
}

/// A frozen annotated suffix index over a fragment collection.
///
/// Construction consumes the fragments once; afterwards the index is
/// immutable and scoring only reads it, so concurrent scoring through a
/// shared reference is safe.
///
/// # Example
/// ```
/// use east_core::{build_index, Algorithm};
///
/// let fragments = vec!["ABCD".to_string(), "ABCE".to_string()];
/// let index = build_index(&fragments, Algorithm::Easa).unwrap();
/// assert!(index.score("ABC") > index.score("XYZ"));
/// ```
#[derive(Debug)]
pub enum Index {
    /// Tree built by direct suffix insertion
    Naive(AnnotatedTree),
    /// Tree built by the extended Ukkonen algorithm
    Linear(AnnotatedTree),
    /// Enhanced annotated suffix array
    Easa(EnhancedSuffixArray),
}

/// Builds an index over `fragments` with the chosen backend.
///
/// Fails with [`AstError::EmptyCollection`] on an empty collection and with
/// [`AstError::ReservedCharacterInInput`] when a fragment contains a code
/// point from the reserved terminator region.
pub fn build_index(fragments: &[String], algorithm: Algorithm) -> Result<Index> {
    match algorithm {
        Algorithm::Naive => Ok(Index::Naive(naive::build(fragments)?)),
        Algorithm::Linear => Ok(Index::Linear(ukkonen::build(fragments)?)),
        Algorithm::Easa => Ok(Index::Easa(EnhancedSuffixArray::build(fragments)?)),
    }
}

impl Index {
    /// The algorithm that built this index.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Index::Naive(_) => Algorithm::Naive,
            Index::Linear(_) => Algorithm::Linear,
            Index::Easa(_) => Algorithm::Easa,
        }
    }

    /// The fragment collection the index was built over.
    pub fn fragments(&self) -> &[String] {
        match self {
            Index::Naive(tree) | Index::Linear(tree) => tree.fragments(),
            Index::Easa(easa) => easa.fragments(),
        }
    }

    /// Normalized matching score of `query` against the index, in `[0, 1]`.
    ///
    /// Empty and non-matching queries score `0`. Scoring never fails.
    pub fn score(&self, query: &str) -> f64 {
        self.score_with(query, &ScoreOptions::default())
    }

    /// Matching score with explicit options.
    ///
    /// With an expander the query is tokenized, each word is substituted by
    /// itself plus its synonyms, and the maximum score over the variants
    /// (word concatenations) is returned.
    pub fn score_with(&self, query: &str, options: &ScoreOptions<'_>) -> f64 {
        match options.expander {
            None => self.score_plain(query, options.normalized),
            Some(expander) => self.score_expanded(query, options.normalized, expander),
        }
    }

    /// Per-suffix score contributions in suffix-start order.
    pub fn suffix_scores(&self, query: &str, normalized: bool) -> Vec<(String, f64)> {
        match self {
            Index::Naive(tree) | Index::Linear(tree) => tree.suffix_scores(query, normalized),
            Index::Easa(easa) => easa.suffix_scores(query, normalized),
        }
    }

    /// Visits the annotation of every internal node (or lcp-interval)
    /// exactly once, in the requested order.
    ///
    /// The suffix-array backend does not support breadth-first traversal
    /// and returns [`AstError::UnsupportedTraversal`] for it.
    pub fn traverse<F: FnMut(usize)>(&self, order: TraversalOrder, mut visitor: F) -> Result<()> {
        match self {
            Index::Naive(tree) | Index::Linear(tree) => {
                let mut visit = |node: usize| {
                    if !tree.is_leaf(node) {
                        visitor(tree.weight(node));
                    }
                };
                match order {
                    TraversalOrder::PreOrder => tree.traverse_pre_order(&mut visit),
                    TraversalOrder::PostOrder => tree.traverse_post_order(&mut visit),
                    TraversalOrder::BreadthFirst => tree.traverse_breadth_first(&mut visit),
                }
                Ok(())
            }
            Index::Easa(easa) => match order {
                TraversalOrder::PreOrder => {
                    easa.traverse_pre_order(|interval| visitor(easa.annotation(interval)));
                    Ok(())
                }
                TraversalOrder::PostOrder => {
                    easa.traverse_post_order(|interval| visitor(easa.annotation(interval)));
                    Ok(())
                }
                TraversalOrder::BreadthFirst => Err(AstError::unsupported_traversal(
                    TraversalOrder::BreadthFirst,
                    "suffix array",
                )),
            },
        }
    }

    /// Structural equality across indices of the same backend: equal tree
    /// shapes and annotations, or equal suffix-array tables.
    pub fn same_structure(&self, other: &Index) -> bool {
        match (self, other) {
            (Index::Naive(a), Index::Naive(b)) | (Index::Linear(a), Index::Linear(b)) => {
                a.structurally_equal(b)
            }
            (Index::Easa(a), Index::Easa(b)) => a == b,
            _ => false,
        }
    }

    fn score_plain(&self, query: &str, normalized: bool) -> f64 {
        match self {
            Index::Naive(tree) | Index::Linear(tree) => tree.score(query, normalized),
            Index::Easa(easa) => easa.score(query, normalized),
        }
    }

    fn score_expanded(
        &self,
        query: &str,
        normalized: bool,
        expander: &dyn SynonymExpander,
    ) -> f64 {
        let words = tokenize(query);
        if words.is_empty() {
            return self.score_plain(query, normalized);
        }
        let alternatives: Vec<Vec<String>> = words
            .iter()
            .map(|word| {
                let mut list = expander.synonyms(word);
                list.push(word.clone());
                list
            })
            .collect();

        // The unmodified query is scored up front so that the cut-off can
        // never lose it.
        let mut result = self.score_plain(&words.concat(), normalized);
        let mut indices = vec![0usize; alternatives.len()];
        let mut scored = 0usize;
        'variants: loop {
            let variant: String = indices
                .iter()
                .zip(&alternatives)
                .map(|(&choice, list)| list[choice].as_str())
                .collect();
            result = result.max(self.score_plain(&variant, normalized));
            scored += 1;
            if scored >= MAX_SYNONYM_VARIANTS {
                break;
            }
            let mut position = alternatives.len();
            loop {
                if position == 0 {
                    break 'variants;
                }
                position -= 1;
                indices[position] += 1;
                if indices[position] < alternatives[position].len() {
                    break;
                }
                indices[position] = 0;
            }
        }
        result
    }
}
