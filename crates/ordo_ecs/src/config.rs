/// How many passes an update runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
  /// One pass over the execution plan.
  #[default]
  Single,
  /// One pass, then one more for every state queued through
  /// [`UpdateContext::enqueue`](crate::context::UpdateContext::enqueue)
  /// until the queue is empty. Does not terminate if systems keep queueing.
  Recursive,
}

/// Whether inactive entities are passed to systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InactiveHandling {
  #[default]
  Include,
  Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EcsConfig {
  /// Seed of the archetype key hash.
  pub seed: u32,
  /// Used by [`ECS::update`](crate::ECS::update).
  pub strategy: Strategy,
  /// Used by [`ECS::update`](crate::ECS::update).
  pub inactive: InactiveHandling,
}

impl EcsConfig {
  pub fn set_seed(mut self, seed: u32) -> Self {
    self.seed = seed;
    self
  }

  pub fn set_strategy(mut self, strategy: Strategy) -> Self {
    self.strategy = strategy;
    self
  }

  pub fn set_inactive(mut self, inactive: InactiveHandling) -> Self {
    self.inactive = inactive;
    self
  }
}
