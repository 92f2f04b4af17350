/// Prefix sums over the item extents (size plus trailing spacing) of a viewport.
///
/// Values must stay non-negative for the descent in [`Fenwick::count_below`] to hold.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fenwick {
    tree: Vec<f64>, // 1-indexed
    total: f64,
    max_bit: usize,
}

impl Fenwick {
    /// Builds the tree from item sizes; every item but the last is followed by `gap`.
    pub(crate) fn from_sizes(sizes: impl ExactSizeIterator<Item = f32>, gap: f32) -> Self {
        let n = sizes.len();
        let mut tree = vec![0.0f64; n + 1];
        let mut total = 0.0f64;
        let gap = f64::from(gap);
        for (i, size) in (1..=n).zip(sizes) {
            let mut v = f64::from(size);
            if i < n {
                v += gap;
            }
            total += v;
            tree[i] += v;
            let j = i + lsb(i);
            if j <= n {
                tree[j] += tree[i];
            }
        }
        Self {
            tree,
            total,
            max_bit: highest_power_of_two_leq(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn add(&mut self, index: usize, delta: f64) {
        let n = self.len();
        if index >= n || delta == 0.0 {
            return;
        }
        self.total += delta;
        let mut i = index + 1;
        while i <= n {
            self.tree[i] += delta;
            i += lsb(i);
        }
    }

    /// Sum of the first `count` values.
    pub(crate) fn prefix_sum(&self, count: usize) -> f64 {
        let mut i = count.min(self.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i &= i - 1;
        }
        sum
    }

    pub(crate) fn total(&self) -> f64 {
        self.total
    }

    /// Returns the largest `count` whose prefix sum is strictly below `target` (0 if none is).
    ///
    /// Maps an offset to the index of the item extent containing it.
    pub(crate) fn count_below(&self, mut target: f64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.max_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] < target {
                target -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn highest_power_of_two_leq(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let mut p = 1usize;
    while p <= n / 2 {
        p <<= 1;
    }
    p
}

