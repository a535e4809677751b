/// Lexicographic iterator over all `k`-element subsets of a slice.
///
/// Yields nothing when `k` exceeds the slice length; yields a single empty
/// subset when `k == 0`.
pub struct Combinations<'a, T> {
    items: &'a [T],
    indices: Vec<usize>,
    done: bool,
}

pub fn combinations<T: Clone>(items: &[T], k: usize) -> Combinations<'_, T> {
    Combinations {
        items,
        indices: (0..k).collect(),
        done: k > items.len(),
    }
}

impl<'a, T: Clone> Iterator for Combinations<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let current = self.indices.iter().map(|&i| self.items[i].clone()).collect();

        // advance the rightmost index that still has room
        let n = self.items.len();
        let k = self.indices.len();
        match (0..k).rev().find(|&i| self.indices[i] < n - k + i) {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }
        Some(current)
    }
}

/// Binomial coefficient, saturating on overflow.
pub fn choose(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u64 = 1;
    for i in 0..k {
        acc = acc.saturating_mul((n - i) as u64) / (i as u64 + 1);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_in_lexicographic_order() {
        let got: Vec<Vec<char>> = combinations(&['a', 'b', 'c'], 2).collect();
        assert_eq!(got, vec![vec!['a', 'b'], vec!['a', 'c'], vec!['b', 'c']]);
    }

    #[test]
    fn edge_sizes() {
        assert_eq!(combinations(&[1, 2], 3).count(), 0);
        assert_eq!(combinations(&[1, 2], 0).collect::<Vec<_>>(), vec![Vec::<i32>::new()]);
        assert_eq!(combinations::<u8>(&[], 0).count(), 1);
        assert_eq!(combinations(&[1, 2, 3], 3).count(), 1);
    }

    #[test]
    fn count_matches_choose() {
        let items: Vec<usize> = (0..11).collect();
        for k in 0..=11 {
            assert_eq!(combinations(&items, k).count() as u64, choose(11, k));
        }
        assert_eq!(choose(24, 6), 134_596);
    }
}
