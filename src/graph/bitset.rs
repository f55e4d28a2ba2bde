use super::{Node, NumNodes};
use bitvec::prelude::*;
use std::fmt::{self, Debug, Formatter};

/// Fixed-size set of nodes with cached cardinality.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BitSet {
    cardinality: NumNodes,
    bit_vec: BitVec,
}

impl BitSet {
    pub fn new(size: NumNodes) -> Self {
        Self {
            cardinality: 0,
            bit_vec: bitvec![0; size as usize],
        }
    }

    pub fn len(&self) -> NumNodes {
        self.bit_vec.len() as NumNodes
    }

    pub fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    pub fn cardinality(&self) -> NumNodes {
        self.cardinality
    }

    pub fn get_bit(&self, i: Node) -> bool {
        self.bit_vec[i as usize]
    }

    /// Sets bit `i` and returns its previous value.
    pub fn set_bit(&mut self, i: Node) -> bool {
        let prev = self.bit_vec.replace(i as usize, true);
        self.cardinality += !prev as NumNodes;
        prev
    }

    /// Clears bit `i` and returns its previous value.
    pub fn clear_bit(&mut self, i: Node) -> bool {
        let prev = self.bit_vec.replace(i as usize, false);
        self.cardinality -= prev as NumNodes;
        prev
    }

    pub fn clear_all(&mut self) {
        self.bit_vec.fill(false);
        self.cardinality = 0;
    }

    pub fn iter_set_bits(&self) -> impl Iterator<Item = Node> + '_ {
        self.bit_vec.iter_ones().map(|i| i as Node)
    }
}

impl Debug for BitSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let values: Vec<_> = self.iter_set_bits().map(|i| i.to_string()).collect();
        write!(
            f,
            "BitSet {{ cardinality: {}, bits: [{}] }}",
            self.cardinality,
            values.join(", "),
        )
    }
}
