use std::fmt;

/// Number of completed `update` calls.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Debug, Default)]
pub struct Tick(u64);

impl Tick {
  #[inline]
  pub const fn new(tick: u64) -> Tick {
    Tick(tick)
  }

  #[inline]
  pub const fn get(&self) -> u64 {
    self.0
  }

  #[inline]
  pub(crate) const fn next(&self) -> Tick {
    Tick(self.0.wrapping_add(1))
  }
}

impl fmt::Display for Tick {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
