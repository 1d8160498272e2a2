/*!
This module provides the construction and scoring backends of the annotated
suffix index. All backends produce identical scores for the same fragment
collection; they trade construction time against memory layout.

# Available Algorithms

## Naive Generalized Suffix Tree
Direct insertion of every suffix of every fragment.
- Time: O(n₁² + … + n_m²) construction, O(|q|²) scoring
- Space: O(n) nodes
- Suitable for: small collections and as a reference implementation

## Ukkonen Generalized Suffix Tree
Online construction with suffix links, skip/count descent and a shared
open-end vector, extended to a collection of strings.
- Time: O(n₁ + … + n_m) construction
- Space: O(n) nodes
- Suitable for: large collections needing the explicit tree shape

## Enhanced Annotated Suffix Array
Suffix array (Kärkkäinen–Sanders DC3) + LCP array (Kasai) + Abouelhoda
child tables + annotation table, simulating the tree in five flat arrays.
- Time: O(n) construction
- Space: five n-length integer arrays plus the text
- Suitable for: memory-conscious indexing of large collections

# Examples
```rust
use east_core::algorithms::{easa::EnhancedSuffixArray, naive, ukkonen};

let fragments = vec!["ABCD".to_string(), "ABCE".to_string()];
let tree = ukkonen::build(&fragments).unwrap();
let reference = naive::build(&fragments).unwrap();
let easa = EnhancedSuffixArray::build(&fragments).unwrap();
assert_eq!(tree.score("ABC", true), reference.score("ABC", true));
assert_eq!(easa.score("ABC", true), reference.score("ABC", true));
```
*/

pub mod easa;
pub mod naive;
pub mod suffix_array;
pub mod tree;
pub mod ukkonen;

/// Re-export of [`tree::AnnotatedTree`].
///
/// The arena-backed generalized suffix tree shared by the naive and Ukkonen
/// builders.
pub use self::tree::AnnotatedTree;

/// Re-export of [`easa::EnhancedSuffixArray`].
///
/// The flat-array backend simulating the annotated suffix tree over
/// lcp-intervals.
pub use self::easa::EnhancedSuffixArray;

/// Re-export of [`suffix_array::suffix_array`].
///
/// Linear-time DC3 suffix array construction.
pub use self::suffix_array::suffix_array as build_suffix_array;

/// Re-export of [`suffix_array::lcp_array`].
///
/// Linear-time Kasai LCP array construction.
pub use self::suffix_array::lcp_array as build_lcp_array;
