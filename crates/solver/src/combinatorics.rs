//! Lazy enumeration of placement candidates.
//!
//! Every iterator here is finite, deterministic and restartable: cloning a
//! fresh iterator (or calling `restart`) replays the same sequence.
//! Sequences are lexicographic over indices, so the search order is fixed by
//! roster order and row-major tile order alone.

/// k-element subsets of `0..n` in lexicographic order.
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    k: usize,
    current: Option<Vec<usize>>,
    started: bool,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let current = (k <= n).then(|| (0..k).collect());
        Self {
            n,
            k,
            current,
            started: false,
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.n, self.k);
    }

    /// Exact length of the full sequence, saturating at `u64::MAX`.
    pub fn count_total(n: usize, k: usize) -> u64 {
        if k > n {
            return 0;
        }
        let k = k.min(n - k);
        let mut total: u128 = 1;
        for i in 0..k {
            total = total * (n - i) as u128 / (i + 1) as u128;
        }
        u64::try_from(total).unwrap_or(u64::MAX)
    }

    fn advance(&mut self) {
        let Some(indices) = self.current.as_mut() else {
            return;
        };
        let (n, k) = (self.n, self.k);
        let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            self.current = None;
            return;
        };
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.advance();
        }
        self.started = true;
        self.current.clone()
    }
}

/// Injective maps from `k` slots into `0..n`, in lexicographic order.
///
/// Slot `i` of an item is the value assigned to the `i`-th chosen
/// character; no value repeats within an item.
#[derive(Clone, Debug)]
pub struct Arrangements {
    n: usize,
    k: usize,
    current: Option<Vec<usize>>,
    started: bool,
}

impl Arrangements {
    pub fn new(n: usize, k: usize) -> Self {
        let current = (k <= n).then(|| (0..k).collect());
        Self {
            n,
            k,
            current,
            started: false,
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new(self.n, self.k);
    }

    /// `n! / (n - k)!`, saturating at `u64::MAX`.
    pub fn count_total(n: usize, k: usize) -> u64 {
        if k > n {
            return 0;
        }
        (n - k + 1..=n).fold(1u64, |total, factor| total.saturating_mul(factor as u64))
    }

    fn advance(&mut self) {
        let Some(values) = self.current.as_mut() else {
            return;
        };
        let n = self.n;
        for i in (0..self.k).rev() {
            let prefix = &values[..i];
            let bumped = (values[i] + 1..n).find(|candidate| !prefix.contains(candidate));
            if let Some(value) = bumped {
                values[i] = value;
                for j in i + 1..self.k {
                    let smallest = (0..n).find(|candidate| !values[..j].contains(candidate));
                    match smallest {
                        Some(smallest) => values[j] = smallest,
                        None => {
                            self.current = None;
                            return;
                        }
                    }
                }
                return;
            }
        }
        self.current = None;
    }
}

impl Iterator for Arrangements {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.started {
            self.advance();
        }
        self.started = true;
        self.current.clone()
    }
}

/// Every (roster subset, tile assignment) pair for a fixed character count.
///
/// Items are `(roster index, tile index)` pairs, one per chosen character,
/// in roster order. Subsets are the outer loop.
#[derive(Clone, Debug)]
pub struct PlacementCandidates {
    tiles: usize,
    count: usize,
    subsets: Combinations,
    subset: Option<Vec<usize>>,
    arrangements: Arrangements,
}

impl PlacementCandidates {
    pub fn new(roster: usize, tiles: usize, count: usize) -> Self {
        let mut subsets = Combinations::new(roster, count);
        let subset = subsets.next();
        Self {
            tiles,
            count,
            subsets,
            subset,
            arrangements: Arrangements::new(tiles, count),
        }
    }

    pub fn restart(&mut self) {
        self.subsets.restart();
        self.subset = self.subsets.next();
        self.arrangements.restart();
    }

    /// Exact length of the full sequence, saturating at `u64::MAX`.
    pub fn count_total(roster: usize, tiles: usize, count: usize) -> u64 {
        Combinations::count_total(roster, count)
            .saturating_mul(Arrangements::count_total(tiles, count))
    }

    pub fn character_count(&self) -> usize {
        self.count
    }
}

impl Iterator for PlacementCandidates {
    type Item = Vec<(usize, usize)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let subset = self.subset.as_ref()?;
            if let Some(tiles) = self.arrangements.next() {
                return Some(subset.iter().copied().zip(tiles).collect());
            }
            self.subset = self.subsets.next();
            self.arrangements = Arrangements::new(self.tiles, self.count);
        }
    }
}
