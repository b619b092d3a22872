use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use fxhash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Kmer {
    sequence: Vec<u8>,
}

impl Kmer {
    pub fn new(sequence: &[u8]) -> Self {
        Kmer {
            sequence: sequence.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn sequence(&self) -> String {
        String::from_utf8_lossy(&self.sequence).into_owned()
    }
}

// Lets tables be queried with a plain byte slice.
impl Borrow<[u8]> for Kmer {
    fn borrow(&self) -> &[u8] {
        &self.sequence
    }
}

impl fmt::Display for Kmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.sequence))
    }
}

/// Read index -> offsets at which a k-mer starts in that read.
pub type ReadOffsets = BTreeMap<usize, BTreeSet<usize>>;

/// Map keyed by k-mer that iterates in the order keys were first inserted.
///
/// Dominant-k-mer tie-breaks rely on this order.
#[derive(Debug, Clone)]
pub struct KmerTable<V> {
    keys: Vec<Kmer>,
    values: Vec<V>,
    slots: FxHashMap<Kmer, usize>,
}

impl<V> KmerTable<V> {
    pub fn new() -> Self {
        KmerTable {
            keys: Vec::new(),
            values: Vec::new(),
            slots: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, kmer: &[u8]) -> bool {
        self.slots.contains_key(kmer)
    }

    pub fn get(&self, kmer: &[u8]) -> Option<&V> {
        self.slots.get(kmer).map(|&slot| &self.values[slot])
    }

    /// Returns the value for `kmer`, appending `default()` at the end if absent.
    pub fn get_or_insert_with<F>(&mut self, kmer: &[u8], default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let slot = match self.slots.get(kmer) {
            Some(&slot) => slot,
            None => {
                let slot = self.keys.len();
                let key = Kmer::new(kmer);
                self.slots.insert(key.clone(), slot);
                self.keys.push(key);
                self.values.push(default());
                slot
            }
        };
        &mut self.values[slot]
    }

    /// Appends a new entry. Existing keys are overwritten in place.
    pub fn insert(&mut self, kmer: Kmer, value: V) {
        match self.slots.get(kmer.as_bytes()) {
            Some(&slot) => self.values[slot] = value,
            None => {
                self.slots.insert(kmer.clone(), self.keys.len());
                self.keys.push(kmer);
                self.values.push(value);
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Kmer> {
        self.keys.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Kmer, &V)> {
        self.keys.iter().zip(self.values.iter())
    }

    pub fn into_iter_ordered(self) -> impl Iterator<Item = (Kmer, V)> {
        self.keys.into_iter().zip(self.values)
    }
}

impl<V> Default for KmerTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for KmerTable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kmer_display() {
        let kmer = Kmer::new(b"ACGT");
        assert_eq!(kmer.to_string(), "ACGT");
        assert_eq!(kmer.sequence(), "ACGT");
        assert_eq!(kmer.len(), 4);
    }

    #[test]
    fn test_table_keeps_insertion_order() {
        let mut table: KmerTable<u32> = KmerTable::new();
        *table.get_or_insert_with(b"TTT", || 0) += 1;
        *table.get_or_insert_with(b"AAA", || 0) += 1;
        *table.get_or_insert_with(b"TTT", || 0) += 1;

        let keys: Vec<String> = table.keys().map(|k| k.sequence()).collect();
        assert_eq!(keys, vec!["TTT", "AAA"]);
        assert_eq!(table.get(b"TTT"), Some(&2));
        assert_eq!(table.get(b"AAA"), Some(&1));
        assert_eq!(table.get(b"CCC"), None);
    }

    #[test]
    fn test_insert_overwrites_without_reordering() {
        let mut table = KmerTable::new();
        table.insert(Kmer::new(b"AC"), 1);
        table.insert(Kmer::new(b"GT"), 2);
        table.insert(Kmer::new(b"AC"), 3);

        let entries: Vec<(String, i32)> = table
            .iter()
            .map(|(k, v)| (k.sequence(), *v))
            .collect();
        assert_eq!(entries, vec![("AC".to_string(), 3), ("GT".to_string(), 2)]);
        assert!(table.contains(b"GT"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_equality_is_order_sensitive() {
        let mut a = KmerTable::new();
        a.insert(Kmer::new(b"A"), 1);
        a.insert(Kmer::new(b"C"), 1);
        let mut b = KmerTable::new();
        b.insert(Kmer::new(b"C"), 1);
        b.insert(Kmer::new(b"A"), 1);
        assert_ne!(a, b);
    }
}
