use std::any::{type_name, Any, TypeId};

use crate::{
  archetype::ArchetypeKey, components::Component, error::ShapeError, systems::MAX_COMPONENTS,
  ComponentId,
};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum AccessType {
  Write,
  Read,
}

#[derive(Debug, Clone, Copy)]
pub struct ComponentAccess {
  pub id: ComponentId,
  pub name: &'static str,
  pub access: AccessType,
}

#[derive(Debug, Clone, Copy)]
pub struct StateAccess {
  pub id: TypeId,
  pub name: &'static str,
  pub access: AccessType,
}

/// What a single update entry point binds, collected once at registration.
#[derive(Default, Debug)]
pub struct ShapeMeta {
  comps: Vec<ComponentAccess>,
  state: Option<StateAccess>,
  context: bool,
}

impl ShapeMeta {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_comp<C: Component>(&mut self, access: AccessType) -> Result<(), ShapeError> {
    if self.comps.iter().any(|c| c.id == C::sid()) {
      return Err(ShapeError::DuplicateComponent(C::sname()));
    }

    self.comps.push(ComponentAccess {
      id: C::sid(),
      name: C::sname(),
      access,
    });
    Ok(())
  }

  pub fn add_state<T: Any>(&mut self, access: AccessType) -> Result<(), ShapeError> {
    if self.state.is_some() {
      return Err(ShapeError::DuplicateState(type_name::<T>()));
    }

    self.state = Some(StateAccess {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
      access,
    });
    Ok(())
  }

  pub fn add_context(&mut self) -> Result<(), ShapeError> {
    if self.context {
      return Err(ShapeError::DuplicateContext);
    }

    self.context = true;
    Ok(())
  }

  pub(crate) fn validate(&self) -> Result<(), ShapeError> {
    if self.comps.len() > MAX_COMPONENTS {
      return Err(ShapeError::TooManyComponents(self.comps.len()));
    }
    Ok(())
  }

  #[inline]
  pub fn components(&self) -> &[ComponentAccess] {
    &self.comps
  }

  #[inline]
  pub fn state(&self) -> Option<&StateAccess> {
    self.state.as_ref()
  }

  #[inline]
  pub fn uses_context(&self) -> bool {
    self.context
  }

  /// Number of declared parameters of all kinds.
  pub fn params(&self) -> usize {
    self.comps.len() + self.state.is_some() as usize + self.context as usize
  }

  pub fn key(&self, seed: u32) -> ArchetypeKey {
    ArchetypeKey::of_names(self.comps.iter().map(|c| c.name), seed)
  }
}
