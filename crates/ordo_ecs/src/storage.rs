#[cfg(feature = "debug")]
use log::trace;
use rustc_hash::FxHashMap;

use crate::{
  archetype::ArchetypeKey,
  combination::subsets,
  components::{Component, ComponentFactory},
  error::EcsError,
  EntityId,
};

pub(crate) type Row = Vec<Box<dyn Component>>;
pub(crate) type RowMap = FxHashMap<EntityId, Row>;

/// Entity and component store.
///
/// Every entity is listed in the bucket of each non-empty subset of its
/// component types, so a lookup by the key of a required type set finds all
/// entities owning at least those types.
#[derive(Default)]
pub struct Storage {
  seed: u32,
  rows: RowMap,
  buckets: FxHashMap<ArchetypeKey, Vec<EntityId>>,
  factories: FxHashMap<&'static str, ComponentFactory>,
  top_id: EntityId,
}

impl Storage {
  pub fn new(seed: u32) -> Self {
    Self {
      seed,
      ..Default::default()
    }
  }

  #[inline]
  pub fn seed(&self) -> u32 {
    self.seed
  }

  /// Switches the archetype key seed and rebuilds every bucket. Rows, ids
  /// and registered factories are kept.
  pub fn reseed(&mut self, seed: u32) {
    if seed == self.seed {
      return;
    }

    self.seed = seed;
    self.buckets.clear();

    let rows = std::mem::take(&mut self.rows);
    let mut ids = rows.keys().copied().collect::<Vec<_>>();
    ids.sort_unstable();
    for id in ids {
      self.index(id, &rows[&id]);
    }
    self.rows = rows;
  }

  #[inline]
  pub fn key_of(&self, names: &[&str]) -> ArchetypeKey {
    ArchetypeKey::of_names(names.iter().copied(), self.seed)
  }

  pub fn create_entity(&mut self, comps: Row) -> Result<EntityId, EcsError> {
    let id = self.top_id;
    let next = id.checked_add(1).ok_or(EcsError::IdsExhausted)?;

    let row = self.prepare_row(comps)?;
    self.index(id, &row);
    self.rows.insert(id, row);
    self.top_id = next;

    #[cfg(feature = "debug")]
    trace!("Created Entity {}", id);

    Ok(id)
  }

  /// Places `comps` under `id`, replacing a live entity with the same id.
  /// The allocator continues after `id`.
  pub fn create_entity_with_id(&mut self, comps: Row, id: EntityId) -> Result<(), EcsError> {
    let row = self.prepare_row(comps)?;

    if let Some(old) = self.rows.remove(&id) {
      self.unindex(id, &old);
    }

    self.index(id, &row);
    self.rows.insert(id, row);
    self.top_id = self.top_id.max(id.saturating_add(1));

    #[cfg(feature = "debug")]
    trace!("Placed Entity {}", id);

    Ok(())
  }

  pub fn remove_entity(&mut self, entity: EntityId) -> Result<Row, EcsError> {
    let row = self
      .rows
      .remove(&entity)
      .ok_or(EcsError::UnknownEntity(entity))?;
    self.unindex(entity, &row);

    #[cfg(feature = "debug")]
    trace!("Removed Entity {}", entity);

    Ok(row)
  }

  pub fn components(&self, entity: EntityId) -> Result<&[Box<dyn Component>], EcsError> {
    self
      .rows
      .get(&entity)
      .map(Vec::as_slice)
      .ok_or(EcsError::UnknownEntity(entity))
  }

  pub fn get_comp<C: Component>(&self, entity: EntityId) -> Result<&C, EcsError> {
    self
      .components(entity)?
      .iter()
      .find_map(|c| c.downcast_ref::<C>())
      .ok_or(EcsError::MissingComponent {
        entity,
        component: C::sname(),
      })
  }

  pub fn get_comp_mut<C: Component>(&mut self, entity: EntityId) -> Result<&mut C, EcsError> {
    self
      .rows
      .get_mut(&entity)
      .ok_or(EcsError::UnknownEntity(entity))?
      .iter_mut()
      .find_map(|c| c.downcast_mut::<C>())
      .ok_or(EcsError::MissingComponent {
        entity,
        component: C::sname(),
      })
  }

  #[inline]
  pub fn has_comp<C: Component>(&self, entity: EntityId) -> bool {
    self
      .rows
      .get(&entity)
      .is_some_and(|row| row.iter().any(|c| c.is::<C>()))
  }

  /// Overwrites the component of the same type. Returns `false` without
  /// changing anything if the entity does not own that type.
  pub fn set_comp(&mut self, entity: EntityId, comp: Box<dyn Component>) -> Result<bool, EcsError> {
    let row = self
      .rows
      .get_mut(&entity)
      .ok_or(EcsError::UnknownEntity(entity))?;

    let Some(slot) = row.iter_mut().find(|c| c.id() == comp.id()) else {
      #[cfg(feature = "debug")]
      trace!("Entity {} has no {}, ignoring set", entity, comp.name());
      return Ok(false);
    };

    *slot = comp;
    Ok(true)
  }

  #[inline]
  pub fn bucket(&self, key: ArchetypeKey) -> Option<&[EntityId]> {
    self.buckets.get(&key).map(Vec::as_slice)
  }

  /// Bucket of `key` together with mutable access to all rows.
  #[inline]
  pub(crate) fn bucket_mut(&mut self, key: ArchetypeKey) -> Option<(&[EntityId], &mut RowMap)> {
    let ids = self.buckets.get(&key)?;
    Some((ids.as_slice(), &mut self.rows))
  }

  /// Live entity ids in ascending order.
  pub fn entities(&self) -> Vec<EntityId> {
    let mut ids = self.rows.keys().copied().collect::<Vec<_>>();
    ids.sort_unstable();
    ids
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.rows.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  #[inline]
  pub fn contains(&self, entity: EntityId) -> bool {
    self.rows.contains_key(&entity)
  }

  pub fn register<C: Component>(&mut self) {
    self.factories.insert(C::sname(), C::create_default);
  }

  pub fn factory(&self, name: &str) -> Option<ComponentFactory> {
    self.factories.get(name).copied()
  }

  fn prepare_row(&mut self, mut comps: Row) -> Result<Row, EcsError> {
    comps.sort_unstable_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));

    if let Some(dupe) = comps.windows(2).find(|w| w[0].id() == w[1].id()) {
      return Err(EcsError::DuplicateComponent(dupe[0].name()));
    }

    for comp in &comps {
      self.factories.entry(comp.name()).or_insert(comp.factory());
    }

    Ok(comps)
  }

  fn subset_keys(&self, row: &Row) -> Vec<ArchetypeKey> {
    let keys = row
      .iter()
      .map(|c| ArchetypeKey::of_name(c.name(), self.seed))
      .collect::<Vec<_>>();

    subsets(&keys)
      .map(|subset| {
        subset
          .into_iter()
          .fold(ArchetypeKey::IDENTITY, |acc, key| acc.combine(*key))
      })
      .collect()
  }

  fn index(&mut self, entity: EntityId, row: &Row) {
    for key in self.subset_keys(row) {
      self.buckets.entry(key).or_default().push(entity);
    }
  }

  fn unindex(&mut self, entity: EntityId, row: &Row) {
    for key in self.subset_keys(row) {
      if let Some(bucket) = self.buckets.get_mut(&key) {
        bucket.retain(|&e| e != entity);
        if bucket.is_empty() {
          self.buckets.remove(&key);
        }
      }
    }
  }
}
