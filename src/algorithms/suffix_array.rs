/*!
Suffix array and LCP array construction.

The suffix array is built with the Kärkkäinen–Sanders DC3 algorithm: sort
the suffixes starting at positions not divisible by three by radix-sorting
character triples (recursing when triples collide), derive the remaining
positions from them, and merge the two groups with a constant-time pairwise
comparison. The LCP array is derived from the finished suffix array with
Kasai's algorithm. Both run in O(n).
*/

/// Builds the suffix array of `text` in O(n).
///
/// Returns the start positions of all suffixes in lexicographic order.
///
/// # Example
/// ```
/// use east_core::algorithms::suffix_array::suffix_array;
///
/// let text: Vec<char> = "banana".chars().collect();
/// assert_eq!(suffix_array(&text), vec![5, 3, 1, 0, 4, 2]);
/// ```
pub fn suffix_array(text: &[char]) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0];
    }
    // Code points plus three sentinel zeros so triple reads never go out of
    // bounds; real code points are non-zero.
    let mut s: Vec<usize> = text.iter().map(|&c| c as usize).collect();
    let max_code = s.iter().copied().max().unwrap_or(0);
    s.extend([0, 0, 0]);
    let mut sa = vec![0usize; n];
    kark_sort(&s, &mut sa, n, max_code + 1);
    sa
}

/// Builds the LCP array with Kasai's algorithm in O(n).
///
/// `lcp[i]` is the length of the longest common prefix of the suffixes at
/// suffix-array positions `i - 1` and `i`; `lcp[0] == 0`.
pub fn lcp_array(text: &[char], sa: &[usize]) -> Vec<usize> {
    let n = sa.len();
    let mut rank = vec![0usize; n];
    for (i, &suffix) in sa.iter().enumerate() {
        rank[suffix] = i;
    }
    let mut lcp = vec![0usize; n];
    let mut h = 0usize;
    // Walk the text in position order; the common prefix shrinks by at most
    // one character per step, so h is only ever re-grown.
    for i in 0..n {
        if rank[i] >= 1 {
            let j = sa[rank[i] - 1];
            while i + h < n && j + h < n && text[i + h] == text[j + h] {
                h += 1;
            }
            lcp[rank[i]] = h;
            if h > 0 {
                h -= 1;
            }
        }
    }
    lcp
}

/// Stable counting sort of `a` into `b` by the key `s[a[i] + offset]`.
fn radix_pass(a: &[usize], b: &mut [usize], s: &[usize], offset: usize, n: usize, k: usize) {
    let mut count = vec![0usize; k + 1];
    for &x in &a[..n] {
        count[s[x + offset]] += 1;
    }
    let mut total = 0;
    for c in count.iter_mut() {
        let freq = *c;
        *c = total;
        total += freq;
    }
    for &x in &a[..n] {
        b[count[s[x + offset]]] = x;
        count[s[x + offset]] += 1;
    }
}

/// Recursive DC3 core; `s` carries three sentinel zeros past `n`, `k` is
/// the alphabet bound.
fn kark_sort(s: &[usize], sa: &mut [usize], n: usize, k: usize) {
    let n0 = (n + 2) / 3;
    let n1 = (n + 1) / 3;
    let n2 = n / 3;
    let n02 = n0 + n2;

    let mut sa12 = vec![0usize; n02 + 3];
    let mut s12: Vec<usize> = (0..n + n0 - n1).filter(|i| i % 3 != 0).collect();
    s12.extend([0, 0, 0]);

    // Radix sort the mod-1/mod-2 suffixes by their character triples.
    radix_pass(&s12, &mut sa12, s, 2, n02, k);
    radix_pass(&sa12, &mut s12, s, 1, n02, k);
    radix_pass(&s12, &mut sa12, s, 0, n02, k);

    // Name the triples; equal triples share a name.
    let mut name = 0usize;
    let (mut c0, mut c1, mut c2) = (usize::MAX, usize::MAX, usize::MAX);
    for i in 0..n02 {
        let p = sa12[i];
        if s[p] != c0 || s[p + 1] != c1 || s[p + 2] != c2 {
            name += 1;
            c0 = s[p];
            c1 = s[p + 1];
            c2 = s[p + 2];
        }
        if p % 3 == 1 {
            s12[p / 3] = name;
        } else {
            s12[p / 3 + n0] = name;
        }
    }

    if name < n02 {
        // Names collide: recurse on the reduced string.
        kark_sort(&s12, &mut sa12, n02, name + 1);
        for i in 0..n02 {
            s12[sa12[i]] = i + 1;
        }
    } else {
        for i in 0..n02 {
            sa12[s12[i] - 1] = i;
        }
    }

    // Sort the mod-0 suffixes by (first character, rank of the rest).
    let s0: Vec<usize> = (0..n02).filter(|&i| sa12[i] < n0).map(|i| sa12[i] * 3).collect();
    let mut sa0 = vec![0usize; n0];
    radix_pass(&s0, &mut sa0, s, 0, n0, k);

    // Merge the two sorted groups.
    let mut p = 0usize;
    let mut t = n0 - n1;
    let mut out = 0usize;
    while out < n {
        let i = if sa12[t] < n0 {
            sa12[t] * 3 + 1
        } else {
            (sa12[t] - n0) * 3 + 2
        };
        let j = if p < n0 { sa0[p] } else { 0 };

        let take_sample = if sa12[t] < n0 {
            if s[i] == s[j] {
                s12[sa12[t] + n0] <= s12[j / 3]
            } else {
                s[i] < s[j]
            }
        } else if s[i] == s[j] {
            if s[i + 1] == s[j + 1] {
                s12[sa12[t] - n0 + 1] <= s12[j / 3 + n0]
            } else {
                s[i + 1] < s[j + 1]
            }
        } else {
            s[i] < s[j]
        };

        if take_sample {
            sa[out] = i;
            t += 1;
            if t == n02 {
                out += 1;
                while p < n0 {
                    sa[out] = sa0[p];
                    p += 1;
                    out += 1;
                }
            }
        } else {
            sa[out] = j;
            p += 1;
            if p == n0 {
                out += 1;
                while t < n02 {
                    sa[out] = if sa12[t] < n0 {
                        sa12[t] * 3 + 1
                    } else {
                        (sa12[t] - n0) * 3 + 2
                    };
                    t += 1;
                    out += 1;
                }
            }
        }
        out += 1;
    }
}
