use std::any::TypeId;

#[cfg(feature = "debug")]
use log::trace;
use log::warn;

use crate::{archetype::ArchetypeKey, systems::StoredSystem};

/// One dispatch entry: a single shape of a single system.
#[derive(Debug, Clone)]
pub struct PlanLine {
  pub system: usize,
  pub shape: usize,
  pub name: &'static str,
  pub key: ArchetypeKey,
  pub params: usize,
  pub state: Option<TypeId>,
}

impl PlanLine {
  /// Lines without a component to match can never select an entity.
  #[inline]
  pub fn is_runnable(&self) -> bool {
    self.params > 0 && !self.key.is_identity()
  }
}

pub(crate) fn build(systems: &[Box<dyn StoredSystem>], order: &[usize], seed: u32) -> Vec<PlanLine> {
  let mut plan = Vec::new();

  for &system in order {
    let stored = &systems[system];

    for (shape, meta) in stored.shapes().into_iter().enumerate() {
      let key = meta.key(seed);
      if key.is_identity() {
        warn!(
          "Shape {} of System {} has no component parameters and will never run",
          shape,
          stored.name()
        );
      }

      #[cfg(feature = "debug")]
      trace!("Plan line {} {}#{} {}", plan.len(), stored.name(), shape, key);

      plan.push(PlanLine {
        system,
        shape,
        name: stored.name(),
        key,
        params: meta.params(),
        state: meta.state().map(|s| s.id),
      });
    }
  }

  plan
}

#[cfg(test)]
mod test {
  use ordo_ecs_macros::Component;

  use super::build;
  use crate::{
    self as ordo_ecs,
    archetype::ArchetypeKey,
    components::Component,
    context::UpdateContext,
    systems::{params::State, store, Dependencies, Shapes, System},
  };

  #[derive(Component, Clone, Default)]
  struct Position(f32);

  #[derive(Component, Clone, Default)]
  struct Velocity(f32);

  struct First;

  impl System for First {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes.add(Self::both).add(Self::nothing);
    }
  }

  impl First {
    fn both(&mut self, _: &mut Position, _: &Velocity) -> bool {
      true
    }

    fn nothing(&mut self, _: &mut UpdateContext) -> bool {
      true
    }
  }

  struct Second;

  impl System for Second {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes.add(Self::stateful);
    }

    fn dependencies(deps: &mut Dependencies) {
      deps.after::<First>();
    }
  }

  impl Second {
    fn stateful(&mut self, _: State<u64>, _: &Position) -> bool {
      true
    }
  }

  #[test]
  fn lines() {
    let systems = vec![store(Second).unwrap(), store(First).unwrap()];
    let plan = build(&systems, &[1, 0], 9);

    assert_eq!(plan.len(), 3);
    assert_eq!((plan[0].system, plan[0].shape), (1, 0));
    assert_eq!((plan[1].system, plan[1].shape), (1, 1));
    assert_eq!((plan[2].system, plan[2].shape), (0, 0));

    assert_eq!(
      plan[0].key,
      ArchetypeKey::of_names([Velocity::sname(), Position::sname()], 9)
    );
    assert!(plan[0].is_runnable());
    assert!(!plan[1].is_runnable());
    assert_eq!(plan[2].params, 2);
    assert_eq!(plan[2].state, Some(std::any::TypeId::of::<u64>()));
    assert_eq!(plan[2].key, ArchetypeKey::of_name(Position::sname(), 9));
  }
}
