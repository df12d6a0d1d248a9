use std::any::Any;

use crate::{error::FieldError, value::Value, ComponentId};

pub type ComponentFactory = fn() -> Box<dyn Component>;

/// A plain data record attached to an entity.
///
/// Use `#[derive(Component)]`, it also generates the field accessors used by
/// [`ECS::dump`](crate::ECS::dump) and [`ECS::restore`](crate::ECS::restore).
/// The type has to be `Clone + Default + 'static`.
pub trait Component: Any {
  fn id(&self) -> ComponentId;
  fn sid() -> ComponentId
  where
    Self: Sized;

  /// Fully qualified type name, source of the archetype key.
  fn name(&self) -> &'static str;
  fn sname() -> &'static str
  where
    Self: Sized;

  /// Field names in declaration order.
  fn fields(&self) -> &'static [&'static str];
  fn get_field(&self, field: &str) -> Option<Value>;
  fn set_field(&mut self, field: &str, value: Value) -> Result<(), FieldError>;

  fn clone_box(&self) -> Box<dyn Component>;
  fn create_default() -> Box<dyn Component>
  where
    Self: Sized;
  /// Constructor of a default value of the same type, used to rebuild
  /// entities from a snapshot.
  fn factory(&self) -> ComponentFactory;

  fn as_any(&self) -> &dyn Any;
  fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Component {
  #[inline]
  pub fn is<C: Component>(&self) -> bool {
    self.id() == C::sid()
  }

  #[inline]
  pub fn downcast_ref<C: Component>(&self) -> Option<&C> {
    self.as_any().downcast_ref()
  }

  #[inline]
  pub fn downcast_mut<C: Component>(&mut self) -> Option<&mut C> {
    self.as_any_mut().downcast_mut()
  }
}

impl Clone for Box<dyn Component> {
  fn clone(&self) -> Self {
    self.clone_box()
  }
}

impl std::fmt::Debug for dyn Component {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut s = f.debug_struct(self.name());
    for field in self.fields() {
      if let Some(value) = self.get_field(field) {
        s.field(field, &value);
      }
    }
    s.finish()
  }
}
