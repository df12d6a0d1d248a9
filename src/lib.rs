pub use log;
pub use ordo_ecs as ecs;

pub mod prelude {
  pub use ordo_ecs::{
    config::{EcsConfig, InactiveHandling, Strategy},
    context::UpdateContext,
    error::EcsError,
    systems::{
      params::{State, StateMut},
      Dependencies, Shapes, System,
    },
    Component, EntityId, ECS,
  };
}
