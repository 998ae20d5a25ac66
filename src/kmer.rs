//! K-mer extraction and occurrence counting.

use ahash::AHashMap;

/// Iterate over all length-`k` substrings of `seq`, left to right.
///
/// Yields `max(0, seq.len() - k + 1)` k-mers; a read shorter than `k`
/// yields nothing rather than erroring.
pub fn kmers(seq: &str, k: usize) -> impl Iterator<Item = &str> {
    let count = (seq.len() + 1).saturating_sub(k);
    (0..count).map(move |i| &seq[i..i + k])
}

/// Occurrence counts for every distinct k-mer seen across a set of reads.
///
/// Counts are stored in a hash map, but the first-observation order of each
/// distinct k-mer is kept separately: the graph build iterates in that order,
/// which makes node numbering (and every downstream deterministic scan)
/// reproducible for a given input.
#[derive(Debug, Default)]
pub struct KmerCounts {
    counts: AHashMap<String, u32>,
    order: Vec<String>,
}

impl KmerCounts {
    pub fn from_reads<'a, I>(reads: I, k: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts = Self::default();
        for read in reads {
            for kmer in kmers(read, k) {
                counts.observe(kmer);
            }
        }

        counts
    }

    /// Record one occurrence of `kmer`.
    pub fn observe(&mut self, kmer: &str) {
        if let Some(count) = self.counts.get_mut(kmer) {
            *count += 1;
        } else {
            self.counts.insert(kmer.to_owned(), 1);
            self.order.push(kmer.to_owned());
        }
    }

    pub fn get(&self, kmer: &str) -> Option<u32> {
        self.counts.get(kmer).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over `(kmer, count)` pairs in first-observation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.order.iter().map(|kmer| (kmer.as_str(), self.counts[kmer]))
    }
}

#[cfg(test)]
mod tests {
    use super::{kmers, KmerCounts};

    #[test]
    fn test_kmer_count_and_length() {
        let read = "ATCGGCATTG";
        let extracted: Vec<&str> = kmers(read, 5).collect();

        assert_eq!(extracted.len(), read.len() - 5 + 1);
        assert!(extracted.iter().all(|kmer| kmer.len() == 5));
        assert_eq!(extracted[0], "ATCGG");
        assert_eq!(extracted[5], "CATTG");
    }

    #[test]
    fn test_kmer_size_exceeding_read_yields_nothing() {
        assert_eq!(kmers("ACG", 4).count(), 0);
        assert_eq!(kmers("", 4).count(), 0);
        assert_eq!(kmers("ACGT", 4).count(), 1);
    }

    #[test]
    fn test_extraction_is_restartable() {
        let read = "ACGTACGT";
        let first: Vec<&str> = kmers(read, 3).collect();
        let second: Vec<&str> = kmers(read, 3).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_counts_accumulate_across_reads() {
        let reads = ["ACGTA", "ACGT", "TACGT"];
        let counts = KmerCounts::from_reads(reads, 4);

        assert_eq!(counts.get("ACGT"), Some(3));
        assert_eq!(counts.get("CGTA"), Some(1));
        assert_eq!(counts.get("TACG"), Some(1));
        assert_eq!(counts.get("AAAA"), None);
        assert_eq!(counts.len(), 3);
    }

    #[test]
    fn test_iteration_in_first_observation_order() {
        let counts = KmerCounts::from_reads(["ACGTA", "TACGT"], 4);
        let order: Vec<&str> = counts.iter().map(|(kmer, _)| kmer).collect();

        assert_eq!(order, vec!["ACGT", "CGTA", "TACG"]);
    }
}
