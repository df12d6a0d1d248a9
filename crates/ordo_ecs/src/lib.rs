use std::any::Any;

use components::Component;
use config::{EcsConfig, InactiveHandling, Strategy};
use context::UpdateContext;
use entity::{ComponentSet, IntoEntity};
use error::EcsError;
use log::debug;
use scheduler::{plan::PlanLine, Scheduler, SchedulerBuilder};
use snapshot::Snapshot;
use storage::Storage;
use systems::System;
use tick::Tick;

pub mod archetype;
pub mod combination;
pub mod components;
pub mod config;
pub mod context;
pub mod entity;
pub mod error;
pub mod hash;
pub mod scheduler;
pub mod snapshot;
pub mod storage;
pub mod systems;
pub mod tick;
pub mod value;


pub use ordo_ecs_macros::Component;

pub type EntityId = u32;
pub type ComponentId = std::any::TypeId;

/// Entity container with a fixed set of systems.
///
/// Created through [`ECS::builder`]. Systems can only be added to the
/// builder, so the execution plan never changes after [`ECSBuilder::build`].
pub struct ECS {
  scheduler: Scheduler,
  storage: Storage,
  context: UpdateContext,
  config: EcsConfig,
}

#[derive(Default)]
pub struct ECSBuilder {
  scheduler: SchedulerBuilder,
  storage: Storage,
  config: EcsConfig,
}

impl ECS {
  pub fn builder() -> ECSBuilder {
    ECSBuilder::new()
  }

  /// Runs one update with the configured strategy and inactive handling.
  pub fn update(&mut self) -> Result<(), EcsError> {
    self.update_with(None, self.config.strategy, self.config.inactive)
  }

  pub fn update_with(
    &mut self,
    state: Option<&mut dyn Any>,
    strategy: Strategy,
    inactive: InactiveHandling,
  ) -> Result<(), EcsError> {
    #[cfg(feature = "debug")]
    log::trace!(
      "Update {} ({:?}, {:?})",
      self.context.tick(),
      strategy,
      inactive
    );

    self
      .scheduler
      .run(&mut self.storage, &mut self.context, state, strategy, inactive)
  }

  /// [`update`](ECS::update) with `state` as the ambient state of the first pass.
  pub fn update_with_state<T: Any>(&mut self, state: &mut T) -> Result<(), EcsError> {
    self.update_with(Some(state as &mut dyn Any), self.config.strategy, self.config.inactive)
  }

  pub fn create_entity(&mut self, entity: impl IntoEntity) -> Result<EntityId, EcsError> {
    self.storage.create_entity(entity.into_entity())
  }

  /// Creates an entity with default values of the component types in `C`.
  pub fn create_entity_of<C: ComponentSet>(&mut self) -> Result<EntityId, EcsError> {
    self.storage.create_entity(C::create_defaults())
  }

  pub fn remove_entity(&mut self, entity: EntityId) -> Result<(), EcsError> {
    self.storage.remove_entity(entity)?;
    self.context.forget(entity);
    Ok(())
  }

  /// Overwrites the component of type `C`. `Ok(false)` if the entity has no `C`.
  pub fn set_component<C: Component>(
    &mut self,
    entity: EntityId,
    comp: C,
  ) -> Result<bool, EcsError> {
    self.storage.set_comp(entity, Box::new(comp))
  }

  pub fn get_component<C: Component>(&self, entity: EntityId) -> Result<&C, EcsError> {
    self.storage.get_comp(entity)
  }

  pub fn get_component_mut<C: Component>(
    &mut self,
    entity: EntityId,
  ) -> Result<&mut C, EcsError> {
    self.storage.get_comp_mut(entity)
  }

  /// The component of type `C` or its default if the entity does not have one.
  pub fn get_component_or_default<C: Component + Clone + Default>(
    &self,
    entity: EntityId,
  ) -> Result<C, EcsError> {
    match self.storage.get_comp::<C>(entity) {
      Ok(comp) => Ok(comp.clone()),
      Err(EcsError::MissingComponent { .. }) => Ok(C::default()),
      Err(err) => Err(err),
    }
  }

  pub fn components(&self, entity: EntityId) -> Result<&[Box<dyn Component>], EcsError> {
    self.storage.components(entity)
  }

  pub fn register_component<C: Component>(&mut self) {
    self.storage.register::<C>();
  }

  pub fn dump(&self) -> Snapshot {
    snapshot::dump(&self.storage)
  }

  pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), EcsError> {
    snapshot::restore(&mut self.storage, snapshot)
  }

  #[inline]
  pub fn storage(&self) -> &Storage {
    &self.storage
  }

  #[inline]
  pub fn context(&self) -> &UpdateContext {
    &self.context
  }

  #[inline]
  pub fn tick(&self) -> Tick {
    self.context.tick()
  }

  #[inline]
  pub fn config(&self) -> &EcsConfig {
    &self.config
  }

  #[inline]
  pub fn plan(&self) -> &[PlanLine] {
    self.scheduler.plan()
  }

  /// System names in execution order.
  pub fn order(&self) -> Vec<&'static str> {
    self.scheduler.order()
  }
}

impl ECSBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed of the archetype keys. Entities created so far are re-keyed.
  pub fn seed(mut self, seed: u32) -> Self {
    self.config.seed = seed;
    self.storage.reseed(seed);
    self
  }

  /// Like [`seed`](ECSBuilder::seed), also sets the update defaults.
  pub fn config(mut self, config: EcsConfig) -> Self {
    self.config = config;
    self.storage.reseed(config.seed);
    self
  }

  pub fn add_system<S: System>(&mut self, system: S) -> Result<&mut Self, EcsError> {
    self.scheduler.add_system(system)?;
    Ok(self)
  }

  pub fn create_entity(&mut self, entity: impl IntoEntity) -> Result<EntityId, EcsError> {
    self.storage.create_entity(entity.into_entity())
  }

  pub fn create_entity_of<C: ComponentSet>(&mut self) -> Result<EntityId, EcsError> {
    self.storage.create_entity(C::create_defaults())
  }

  pub fn register_component<C: Component>(&mut self) -> &mut Self {
    self.storage.register::<C>();
    self
  }

  pub fn build(self) -> Result<ECS, EcsError> {
    debug!(
      "Building ECS with {} Systems and {} Entities (seed {})",
      self.scheduler.len(),
      self.storage.len(),
      self.config.seed
    );

    Ok(ECS {
      scheduler: self.scheduler.build(self.config.seed)?,
      storage: self.storage,
      context: UpdateContext::new(),
      config: self.config,
    })
  }
}
