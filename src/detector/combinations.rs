/// All `k`-sized subsequences of `items`, in order of original index.
///
/// Each element in turn is taken as the head and paired with every
/// `(k - 1)`-combination of the elements strictly after it.
pub fn combinations<T: Clone>(items: &[T], k: usize) -> Vec<Vec<T>> {
    if k == 0 || k > items.len() {
        return Vec::new();
    }
    if k == 1 {
        return items.iter().map(|x| vec![x.clone()]).collect();
    }
    items[..=items.len() - k]
        .iter()
        .enumerate()
        .flat_map(|(i, head)| {
            combinations(&items[i + 1..], k - 1).into_iter().map(move |rest| {
                let mut combo = Vec::with_capacity(k);
                combo.push(head.clone());
                combo.extend(rest);
                combo
            })
        })
        .collect()
}

/// Lazy iterator over all C(n, 3) index triples in lexicographic order.
pub struct Combinations3 {
    n: usize,
    indices: [usize; 3],
    done: bool,
}

impl Combinations3 {
    pub fn new(n: usize) -> Self {
        Self { n, indices: [0, 1, 2], done: n < 3 }
    }
}

impl Iterator for Combinations3 {
    type Item = [usize; 3];

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.indices;

        // Find rightmost index that can be incremented
        let mut i = 2;
        loop {
            if self.indices[i] < self.n - (3 - i) {
                self.indices[i] += 1;
                for j in (i + 1)..3 {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                break;
            }

            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
        }

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            let n = self.n;
            (1, Some(n * (n - 1) * (n - 2) / 6))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_three_of_five_in_order() {
        let combos = combinations(&[0, 1, 2, 3, 4], 3);
        assert_eq!(combos.len(), 10);
        assert_eq!(combos[0], vec![0, 1, 2]);
        assert_eq!(combos[1], vec![0, 1, 3]);
        assert_eq!(combos[6], vec![1, 2, 3]);
        assert_eq!(combos[9], vec![2, 3, 4]);
    }

    #[test]
    fn degenerate_sizes_are_empty() {
        assert!(combinations(&[1, 2], 3).is_empty());
        assert!(combinations(&[1, 2, 3], 0).is_empty());
        assert!(combinations::<u8>(&[], 1).is_empty());
    }

    #[test]
    fn choose_one_and_all() {
        assert_eq!(combinations(&['a', 'b'], 1), vec![vec!['a'], vec!['b']]);
        assert_eq!(combinations(&['a', 'b', 'c'], 3), vec![vec!['a', 'b', 'c']]);
    }

    #[test]
    fn counts_match_binomial() {
        let items: Vec<u8> = (0..21).collect();
        assert_eq!(combinations(&items, 3).len(), 1330);
        assert_eq!(combinations(&items[..12], 3).len(), 220);
        assert_eq!(combinations(&items[..6], 2).len(), 15);
    }

    #[test]
    fn lazy_triples_match_recursive_order() {
        for n in 0..10 {
            let items: Vec<usize> = (0..n).collect();
            let eager: Vec<[usize; 3]> =
                combinations(&items, 3).into_iter().map(|v| [v[0], v[1], v[2]]).collect();
            let lazy: Vec<[usize; 3]> = Combinations3::new(n).collect();
            assert_eq!(eager, lazy, "n = {n}");
        }
    }

    #[test]
    fn lazy_iterator_exhausts() {
        let mut iter = Combinations3::new(3);
        assert_eq!(iter.next(), Some([0, 1, 2]));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn no_duplicates() {
        let combos: Vec<[usize; 3]> = Combinations3::new(12).collect();
        let mut seen = std::collections::HashSet::new();
        for combo in combos {
            assert!(seen.insert(combo), "Duplicate: {combo:?}");
        }
    }
}
