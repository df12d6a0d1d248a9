/// Lazily enumerates every `k` sized combination of a slice in lexicographic
/// index order.
///
/// `k == 0` and `k > list.len()` are both treated as `k == list.len()`.
pub struct Combinations<'a, T> {
  list: &'a [T],
  indices: Vec<usize>,
  done: bool,
}

impl<'a, T> Combinations<'a, T> {
  pub fn new(list: &'a [T], k: usize) -> Self {
    let k = if k == 0 || k > list.len() {
      list.len()
    } else {
      k
    };

    Self {
      list,
      indices: (0..k).collect(),
      done: false,
    }
  }

  fn advance(&mut self) {
    let n = self.list.len();
    let k = self.indices.len();

    // rightmost index that has not reached its last possible position
    let Some(i) = (0..k).rev().find(|&i| self.indices[i] < n - k + i) else {
      self.done = true;
      return;
    };

    self.indices[i] += 1;
    for j in i + 1..k {
      self.indices[j] = self.indices[j - 1] + 1;
    }
  }
}

impl<'a, T> Iterator for Combinations<'a, T> {
  type Item = Vec<&'a T>;

  fn next(&mut self) -> Option<Self::Item> {
    if self.done {
      return None;
    }

    let list = self.list;
    let item = self.indices.iter().map(|&i| &list[i]).collect();
    self.advance();

    Some(item)
  }
}

/// Every non-empty subset of `list`, smallest first.
pub fn subsets<T>(list: &[T]) -> impl Iterator<Item = Vec<&T>> {
  (1..=list.len()).flat_map(move |k| Combinations::new(list, k))
}

#[cfg(test)]
mod test {
  use std::collections::HashSet;

  use proptest::prelude::*;

  use super::{subsets, Combinations};

  fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
  }

  #[test]
  fn lexicographic_order() {
    let list = ['a', 'b', 'c', 'd'];
    let pairs = Combinations::new(&list, 2)
      .map(|c| c.into_iter().collect::<String>())
      .collect::<Vec<_>>();

    assert_eq!(pairs, vec!["ab", "ac", "ad", "bc", "bd", "cd"]);
  }

  #[test]
  fn clamp() {
    let list = [1, 2, 3];

    let zero = Combinations::new(&list, 0).collect::<Vec<_>>();
    assert_eq!(zero, vec![vec![&1, &2, &3]]);

    let over = Combinations::new(&list, 5).collect::<Vec<_>>();
    assert_eq!(over, vec![vec![&1, &2, &3]]);
  }

  #[test]
  fn single() {
    let list = ["x"];
    assert_eq!(Combinations::new(&list, 1).count(), 1);
  }

  #[test]
  fn power_set() {
    let list = [1, 2, 3];
    let all = subsets(&list).collect::<Vec<_>>();

    assert_eq!(all.len(), 7);
    assert_eq!(all[0], vec![&1]);
    assert_eq!(all[6], vec![&1, &2, &3]);
    assert!(subsets::<u8>(&[]).next().is_none());
  }

  proptest! {
    #[test]
    fn counts(n in 1usize..10, k in 1usize..10) {
      let list = (0..n).collect::<Vec<_>>();
      let combinations = Combinations::new(&list, k).collect::<Vec<_>>();
      let k = if k > n { n } else { k };

      prop_assert_eq!(combinations.len(), binomial(n, k));
      prop_assert!(combinations.iter().all(|c| c.len() == k));

      let unique = combinations.iter().cloned().collect::<HashSet<_>>();
      prop_assert_eq!(unique.len(), combinations.len());
    }
  }
}
