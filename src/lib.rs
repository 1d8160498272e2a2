/*!
This crate provides an annotated suffix tree engine for scoring short
queries against a text, after Chernyak and Mirkin: a generalized suffix
tree is built over fragments of the text, every node is annotated with the
number of leaves it dominates, and a query is scored by summing weighted
conditional probabilities along the longest matching path of each of its
suffixes.

The engine is implemented with a focus on:
- Three interchangeable backends with identical scores
- Linear-time construction (extended Ukkonen, DC3 + Kasai)
- Deterministic floating-point results across backends
- Comprehensive testing
- Modern Rust idioms

# Backends

- [`Algorithm::Naive`]: direct suffix insertion, quadratic construction
- [`Algorithm::Linear`]: Ukkonen's algorithm extended to a string collection
- [`Algorithm::Easa`]: enhanced annotated suffix array in flat arrays

# Usage Example

```rust
use east_core::{build_index, text, Algorithm};

let fragments = text::text_to_fragments("the quick brown fox jumps over the lazy dog", 3);
let index = build_index(&fragments, Algorithm::Easa).expect("fragments are not empty");

let relevant = index.score(&text::prepare_text("quick fox"));
let unrelated = index.score(&text::prepare_text("submarine"));
assert!(relevant > unrelated);
```

# Features
- Pure, single-threaded construction; the finished index is immutable and
  safe to score from several threads
- Scoring never fails: empty and non-matching queries score `0`
- Optional synonym expansion of queries through a caller-supplied
  [`SynonymExpander`]
*/

pub mod algorithms;
pub mod error;
pub mod index;
pub mod text;

pub use error::{AstError, Result};
pub use index::{
    build_index, Algorithm, Index, ScoreOptions, SynonymExpander, TraversalOrder,
    MAX_SYNONYM_VARIANTS,
};
