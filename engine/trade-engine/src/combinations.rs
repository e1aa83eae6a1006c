//! Lazy k-combinations over roster indices

/// All index combinations of size 1..=max_size drawn from `0..n`
///
/// Sizes are produced in increasing order and each size in lexicographic
/// order. Nothing is materialized up front; requesting a size larger than
/// `n` simply ends the sequence.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    max_size: usize,
    indices: Vec<usize>,
    started: bool,
}

impl Combinations {
    pub fn new(n: usize, max_size: usize) -> Self {
        Self { n, max_size, indices: Vec::new(), started: false }
    }

    /// Number of combinations the iterator yields: sum of C(n, k) for k in 1..=max_size
    pub fn count_for(n: usize, max_size: usize) -> u64 {
        (1..=max_size.min(n)).fold(0u64, |acc, k| acc.saturating_add(binomial(n as u64, k as u64)))
    }

    fn start_size(&mut self, size: usize) -> Option<Vec<usize>> {
        if size == 0 || size > self.max_size || size > self.n {
            self.indices.clear();
            return None;
        }
        self.indices = (0..size).collect();
        Some(self.indices.clone())
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if !self.started {
            self.started = true;
            return self.start_size(1);
        }

        let k = self.indices.len();
        if k == 0 {
            return None;
        }

        // Rightmost index that can still move right
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(self.indices.clone());
            }
        }

        self.start_size(k + 1)
    }
}

fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut result: u64 = 1;
    for i in 0..k {
        result = result.saturating_mul(n - i) / (i + 1);
    }
    result
}
