use std::{
  any::{type_name, Any, TypeId},
  panic::{self, AssertUnwindSafe},
};

use graph::Graph;
#[cfg(feature = "debug")]
use log::trace;
use log::{debug, error};

use crate::{
  config::{InactiveHandling, Strategy},
  context::UpdateContext,
  error::EcsError,
  storage::Storage,
  systems::{params::Binding, store, StoredSystem, System},
  ComponentId,
};

mod graph;
pub mod plan;

use plan::PlanLine;

pub struct Scheduler {
  systems: Vec<Box<dyn StoredSystem>>,
  plan: Vec<PlanLine>,
  scratch: Vec<ComponentId>,
}

#[derive(Default)]
pub struct SchedulerBuilder {
  systems: Vec<Box<dyn StoredSystem>>,
}

impl Scheduler {
  /// Runs one update: a pass with `state`, then the queued states when
  /// recursive, then advances the tick.
  pub(crate) fn run(
    &mut self,
    storage: &mut Storage,
    context: &mut UpdateContext,
    state: Option<&mut dyn Any>,
    strategy: Strategy,
    inactive: InactiveHandling,
  ) -> Result<(), EcsError> {
    context.reset();

    self.pass(storage, context, state, inactive)?;

    if strategy == Strategy::Recursive {
      while let Some(mut queued) = context.dequeue() {
        #[cfg(feature = "debug")]
        trace!("Executing queued pass, {} remaining", context.queued());

        self.pass(storage, context, Some(&mut *queued), inactive)?;
      }
    }

    context.advance();
    Ok(())
  }

  fn pass(
    &mut self,
    storage: &mut Storage,
    context: &mut UpdateContext,
    mut state: Option<&mut dyn Any>,
    inactive: InactiveHandling,
  ) -> Result<(), EcsError> {
    let Self {
      systems,
      plan,
      scratch,
    } = self;

    for line in plan.iter() {
      if !line.is_runnable() {
        continue;
      }

      if let Some(expected) = line.state {
        match state.as_deref() {
          Some(state) if Any::type_id(state) == expected => {}
          _ => continue,
        }
      }

      let Some((bucket, rows)) = storage.bucket_mut(line.key) else {
        continue;
      };

      #[cfg(feature = "debug")]
      trace!(
        "Executing {} Shape {} on {} Entities",
        line.name,
        line.shape,
        bucket.len()
      );

      let system = &mut systems[line.system];

      for &entity in bucket {
        if inactive == InactiveHandling::Ignore && context.is_inactive(entity) {
          continue;
        }

        let Some(row) = rows.get_mut(&entity) else {
          continue;
        };

        scratch.clear();
        scratch.extend(row.iter().map(|c| c.id()));

        let binding = Binding::new(row, scratch, context, state.as_deref_mut());

        let result = match panic::catch_unwind(AssertUnwindSafe(|| {
          system.run_shape(line.shape, binding)
        })) {
          Ok(result) => result,
          Err(payload) => {
            error!("System {} panicked on Entity {}", line.name, entity);
            panic::resume_unwind(payload);
          }
        };

        match result {
          Some(Ok(true)) => context.activate(entity),
          Some(Ok(false)) => context.deactivate(entity),
          Some(Err(source)) => {
            error!("System {} failed on Entity {}: {}", line.name, entity, source);
            return Err(EcsError::System {
              system: line.name,
              source,
            });
          }
          None => {
            #[cfg(feature = "debug")]
            trace!("Skipping Entity {}, parameters not bindable", entity);
          }
        }
      }
    }

    Ok(())
  }

  #[inline]
  pub fn plan(&self) -> &[PlanLine] {
    &self.plan
  }

  /// Names of the registered systems in execution order.
  pub fn order(&self) -> Vec<&'static str> {
    let mut order = Vec::new();
    for line in &self.plan {
      if order.last() != Some(&line.name) {
        order.push(line.name);
      }
    }
    order
  }
}

impl SchedulerBuilder {
  pub fn add_system<S: System>(&mut self, system: S) -> Result<(), EcsError> {
    if self.systems.iter().any(|s| s.id() == TypeId::of::<S>()) {
      return Err(EcsError::DuplicateSystem(type_name::<S>()));
    }

    let stored = store(system)?;
    debug!(
      "Registered System {} with {} Shapes",
      stored.name(),
      stored.shapes().len()
    );
    self.systems.push(stored);
    Ok(())
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.systems.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.systems.is_empty()
  }

  pub fn build(self, seed: u32) -> Result<Scheduler, EcsError> {
    debug!("Resolving System Dependencies");
    let graph = Graph::from(self.systems.as_slice());
    let order = graph.sort()?;

    let plan = plan::build(&self.systems, &order, seed);
    debug!(
      "Scheduler initialized with {} Systems and {} Plan Lines",
      self.systems.len(),
      plan.len()
    );

    Ok(Scheduler {
      systems: self.systems,
      plan,
      scratch: Vec::new(),
    })
  }
}
