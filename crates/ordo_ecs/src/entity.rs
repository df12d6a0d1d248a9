use ordo_ecs_macros::all_tuples;

use crate::components::Component;

/// Component values an entity is created from.
pub trait IntoEntity {
  fn into_entity(self) -> Vec<Box<dyn Component>>;
}

impl<F0: Component> IntoEntity for F0 {
  #[inline]
  fn into_entity(self) -> Vec<Box<dyn Component>> {
    vec![Box::new(self)]
  }
}

impl IntoEntity for Vec<Box<dyn Component>> {
  #[inline]
  fn into_entity(self) -> Vec<Box<dyn Component>> {
    self
  }
}

macro_rules! impl_into_entity {
  ($($params:ident),*) => {
    #[allow(non_snake_case)]
    impl<$($params : Component),*> IntoEntity for ($($params ,)*) {
      #[inline]
      fn into_entity(self) -> Vec<Box<dyn Component>> {
        let ($($params ,)*) = self;
        vec![$(Box::new($params)),*]
      }
    }
  };
}

all_tuples!(impl_into_entity, 1, 16, F);

/// A set of component types, instantiated with their default values.
pub trait ComponentSet {
  fn create_defaults() -> Vec<Box<dyn Component>>;
}

impl<F0: Component> ComponentSet for F0 {
  #[inline]
  fn create_defaults() -> Vec<Box<dyn Component>> {
    vec![F0::create_default()]
  }
}

macro_rules! impl_component_set {
  ($($params:ident),*) => {
    impl<$($params : Component),*> ComponentSet for ($($params ,)*) {
      #[inline]
      fn create_defaults() -> Vec<Box<dyn Component>> {
        vec![$($params::create_default()),*]
      }
    }
  };
}

all_tuples!(impl_component_set, 1, 16, F);
