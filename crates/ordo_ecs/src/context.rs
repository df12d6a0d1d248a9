use std::{any::Any, collections::VecDeque};

#[cfg(feature = "debug")]
use log::trace;
use rustc_hash::FxHashMap;

use crate::{tick::Tick, EntityId};

/// Set of entity ids iterating in insertion order.
#[derive(Default, Debug, Clone)]
pub struct EntitySet {
  order: Vec<Option<EntityId>>,
  index: FxHashMap<EntityId, usize>,
}

impl EntitySet {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, entity: EntityId) -> bool {
    if self.index.contains_key(&entity) {
      return false;
    }

    self.index.insert(entity, self.order.len());
    self.order.push(Some(entity));
    true
  }

  pub fn remove(&mut self, entity: EntityId) -> bool {
    let Some(i) = self.index.remove(&entity) else {
      return false;
    };
    self.order[i] = None;

    if self.order.len() > 32 && self.index.len() < self.order.len() / 2 {
      self.compact();
    }
    true
  }

  #[inline]
  pub fn contains(&self, entity: EntityId) -> bool {
    self.index.contains_key(&entity)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.index.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
    self.order.iter().flatten().copied()
  }

  pub fn clear(&mut self) {
    self.order.clear();
    self.index.clear();
  }

  fn compact(&mut self) {
    self.order.retain(Option::is_some);
    for (i, entity) in self.order.iter().flatten().enumerate() {
      self.index.insert(*entity, i);
    }
  }
}

/// Per tick state shared by all systems of an update.
///
/// Systems get it by declaring a `&mut UpdateContext` parameter. Entities
/// for which a system returned `false` stay inactive across ticks until a
/// system returns `true` for them again.
#[derive(Default)]
pub struct UpdateContext {
  active: EntitySet,
  inactive: EntitySet,
  queue: VecDeque<Box<dyn Any>>,
  tick: Tick,
}

impl UpdateContext {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub fn tick(&self) -> Tick {
    self.tick
  }

  #[inline]
  pub fn active(&self) -> &EntitySet {
    &self.active
  }

  #[inline]
  pub fn inactive(&self) -> &EntitySet {
    &self.inactive
  }

  #[inline]
  pub fn is_active(&self, entity: EntityId) -> bool {
    self.active.contains(entity)
  }

  #[inline]
  pub fn is_inactive(&self, entity: EntityId) -> bool {
    self.inactive.contains(entity)
  }

  /// Queues a state for another pass when updating with
  /// [`Strategy::Recursive`](crate::config::Strategy::Recursive).
  pub fn enqueue<T: Any>(&mut self, state: T) {
    #[cfg(feature = "debug")]
    trace!("Queueing State {}", std::any::type_name::<T>());

    self.queue.push_back(Box::new(state));
  }

  #[inline]
  pub fn queued(&self) -> usize {
    self.queue.len()
  }

  pub(crate) fn dequeue(&mut self) -> Option<Box<dyn Any>> {
    self.queue.pop_front()
  }

  pub(crate) fn reset(&mut self) {
    self.active.clear();
    self.queue.clear();
  }

  pub(crate) fn activate(&mut self, entity: EntityId) {
    self.active.insert(entity);
    self.inactive.remove(entity);
  }

  pub(crate) fn deactivate(&mut self, entity: EntityId) {
    self.inactive.insert(entity);
    self.active.remove(entity);
  }

  pub(crate) fn forget(&mut self, entity: EntityId) {
    self.active.remove(entity);
    self.inactive.remove(entity);
  }

  pub(crate) fn advance(&mut self) {
    self.tick = self.tick.next();
  }
}
