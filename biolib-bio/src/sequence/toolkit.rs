//! Nucleotide sequence manipulation helpers

/// Counts of unambiguous nucleotides in a sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NucleotideCounts {
    pub a: usize,
    pub c: usize,
    pub g: usize,
    /// T and U together
    pub t: usize,
}

impl NucleotideCounts {
    pub fn total(&self) -> usize {
        self.a + self.c + self.g + self.t
    }
}

/// Count A, C, G and T/U; ambiguous bases are ignored
pub fn count_nt(seq: &[u8]) -> NucleotideCounts {
    let mut counts = NucleotideCounts::default();
    for &base in seq {
        match base.to_ascii_uppercase() {
            b'A' => counts.a += 1,
            b'C' => counts.c += 1,
            b'G' => counts.g += 1,
            b'T' | b'U' => counts.t += 1,
            _ => {}
        }
    }
    counts
}

/// GC content as (G+C)/(A+C+G+T), ignoring ambiguous bases.
///
/// Returns `None` when the sequence has no unambiguous bases.
pub fn gc_content(seq: &[u8]) -> Option<f64> {
    let counts = count_nt(seq);
    let total = counts.total();
    if total == 0 {
        return None;
    }
    Some((counts.g + counts.c) as f64 / total as f64)
}

/// Number of bases that are not A, C, G or T/U
pub fn ambiguous_nucleotides(seq: &[u8]) -> usize {
    seq.len() - count_nt(seq).total()
}

fn complement(base: u8) -> u8 {
    let comp = match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' | b'U' => b'A',
        b'R' => b'Y',
        b'Y' => b'R',
        b'M' => b'K',
        b'K' => b'M',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        // S, W, N, gaps and anything unknown map to themselves
        other => other,
    };
    if base.is_ascii_lowercase() {
        comp.to_ascii_lowercase()
    } else {
        comp
    }
}

/// Reverse complement, preserving case and IUPAC ambiguity codes
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Cut a sequence into consecutive, non-overlapping fragments.
///
/// A cut is placed at `i + window_size` for every `i` stepping by
/// `step_size` that falls inside the sequence; each fragment runs from the
/// previous cut to the next one, so fragments are `window_size` long only
/// when `step_size == window_size`. A trailing remainder is kept only when it
/// is at least half the window size. Returns no fragments when either size is
/// zero.
pub fn fragment(seq: &[u8], window_size: usize, step_size: usize) -> Vec<&[u8]> {
    let mut fragments = Vec::new();
    if window_size == 0 || step_size == 0 {
        return fragments;
    }

    let mut start = 0;
    for i in (0..seq.len()).step_by(step_size) {
        let end = i + window_size;
        if end < seq.len() {
            fragments.push(&seq[start..end]);
            start = end;
        }
    }

    if (seq.len() - start) as f64 >= 0.5 * window_size as f64 {
        fragments.push(&seq[start..]);
    }

    fragments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_nt() {
        let counts = count_nt(b"AACGTUNRacg");
        assert_eq!(counts, NucleotideCounts { a: 3, c: 2, g: 2, t: 2 });
        assert_eq!(counts.total(), 9);
    }

    #[test]
    fn test_gc_content() {
        assert_eq!(gc_content(b"GGCC"), Some(1.0));
        assert_eq!(gc_content(b"ACGT"), Some(0.5));
        assert_eq!(gc_content(b"ACGTNNNN"), Some(0.5));
        assert_eq!(gc_content(b"NNNN"), None);
        assert_eq!(gc_content(b""), None);
    }

    #[test]
    fn test_ambiguous_nucleotides() {
        assert_eq!(ambiguous_nucleotides(b"ACGTNRY-"), 4);
        assert_eq!(ambiguous_nucleotides(b"acgu"), 0);
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement(b"ATGC"), b"GCAT");
        assert_eq!(reverse_complement(b"aacg"), b"cgtt");
        assert_eq!(reverse_complement(b"RYKMBDHVN"), b"NBDHVKMRY");
        assert_eq!(reverse_complement(b""), b"");
    }

    #[test]
    fn test_reverse_complement_is_involution() {
        let seq = b"ACGTRYKMSWBDHVNacgt-";
        assert_eq!(reverse_complement(&reverse_complement(seq)), seq.to_vec());
    }

    #[test]
    fn test_fragment() {
        let frags = fragment(b"AAAACCCCGGGG", 4, 4);
        assert_eq!(frags, vec![&b"AAAA"[..], b"CCCC", b"GGGG"]);

        // remainder "TT" is half the window, so it is kept
        let frags = fragment(b"AAAACCCCTT", 4, 4);
        assert_eq!(frags, vec![&b"AAAA"[..], b"CCCC", b"TT"]);

        // remainder "T" is under half the window
        let frags = fragment(b"AAAACCCCT", 4, 4);
        assert_eq!(frags, vec![&b"AAAA"[..], b"CCCC"]);
    }

    #[test]
    fn test_fragment_step_shorter_than_window() {
        // cuts at 4 and 6; fragments tile the sequence
        let frags = fragment(b"AAAACCCC", 4, 2);
        assert_eq!(frags, vec![&b"AAAA"[..], b"CC", b"CC"]);
        assert_eq!(frags.concat(), b"AAAACCCC");
    }

    #[test]
    fn test_fragment_step_longer_than_window() {
        // cuts at 4 and 9; remainder "G" is under half the window
        let frags = fragment(b"AAAACCCCCG", 4, 5);
        assert_eq!(frags, vec![&b"AAAA"[..], b"CCCCC"]);
    }

    #[test]
    fn test_fragment_degenerate_sizes() {
        assert!(fragment(b"ACGT", 0, 1).is_empty());
        assert!(fragment(b"ACGT", 4, 0).is_empty());
        assert!(fragment(b"", 4, 4).is_empty());
    }
}
