// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Iterator over k-subsets indices.

/// Iterates all the `k` indices subsets of `0..n` in lexicographic order.
pub struct Combinations<const K: usize> {
    n: usize,
    indices: [usize; K],
    done: bool,
}

impl<const K: usize> Combinations<K> {
    /// Creates a new iterator, there are no subsets if `n < K`.
    pub fn new(n: usize) -> Self {
        let mut indices = [0; K];
        for (i, idx) in indices.iter_mut().enumerate() {
            *idx = i;
        }

        Self {
            n,
            indices,
            done: n < K,
        }
    }
}

impl<const K: usize> Iterator for Combinations<K> {
    type Item = [usize; K];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find the rightmost index that can still move right.
        match (0..K).rev().find(|&i| self.indices[i] < self.n - K + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in (i + 1)..K {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(result)
    }
}
