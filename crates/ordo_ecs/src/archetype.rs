use std::fmt;

use crate::hash::murmur3_x64_128;

/// Order independent identifier of a set of component types.
///
/// The key of a set is the [`combine`](ArchetypeKey::combine) of the keys of
/// its members. Different sets may collide, the key is not a cryptographic
/// digest.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default)]
pub struct ArchetypeKey(u128);

impl ArchetypeKey {
  pub const IDENTITY: ArchetypeKey = ArchetypeKey(0);

  #[inline]
  pub const fn from_raw(raw: u128) -> Self {
    Self(raw)
  }

  #[inline]
  pub const fn raw(&self) -> u128 {
    self.0
  }

  #[inline]
  pub fn of_name(name: &str, seed: u32) -> Self {
    Self(murmur3_x64_128(name.as_bytes(), seed))
  }

  /// Key of a set of type names. Duplicates cancel each other out, callers
  /// have to pass distinct names.
  pub fn of_names<'a>(names: impl IntoIterator<Item = &'a str>, seed: u32) -> Self {
    let mut names = names.into_iter().collect::<Vec<_>>();
    names.sort_unstable();

    names
      .into_iter()
      .fold(Self::IDENTITY, |key, name| key.combine(Self::of_name(name, seed)))
  }

  #[inline]
  pub const fn combine(self, other: ArchetypeKey) -> Self {
    let lo = (self.0 as u64) ^ (other.0 as u64);
    let hi = ((self.0 >> 64) as u64) ^ ((other.0 >> 64) as u64);
    Self(((hi as u128) << 64) | lo as u128)
  }

  #[inline]
  pub const fn is_identity(&self) -> bool {
    self.0 == 0
  }
}

impl fmt::Debug for ArchetypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "ArchetypeKey({:032x})", self.0)
  }
}

impl fmt::Display for ArchetypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{:032x}", self.0)
  }
}
