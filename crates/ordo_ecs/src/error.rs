use thiserror::Error;

use crate::EntityId;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum EcsError {
  #[error("Invalid component set: {0} requested more than once")]
  DuplicateComponent(&'static str),
  #[error("Entity ids exhausted")]
  IdsExhausted,
  #[error("Entity {0} not found")]
  UnknownEntity(EntityId),
  #[error("Entity {entity} has no component {component}")]
  MissingComponent {
    entity: EntityId,
    component: &'static str,
  },
  #[error("Unknown component type {0}")]
  UnknownComponent(String),
  #[error("System {0} is already registered")]
  DuplicateSystem(&'static str),
  #[error("Dependency cycle detected between systems: {}", .0.join(", "))]
  DependencyCycle(Vec<&'static str>),
  #[error("System {system} declares an unresolvable shape: {source}")]
  InvalidShape {
    system: &'static str,
    #[source]
    source: ShapeError,
  },
  #[error("System {system} failed: {source}")]
  System {
    system: &'static str,
    #[source]
    source: BoxedError,
  },
  #[error(transparent)]
  Field(#[from] FieldError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
  #[error("component {0} is bound more than once")]
  DuplicateComponent(&'static str),
  #[error("the update context is bound more than once")]
  DuplicateContext,
  #[error("more than one ambient state parameter ({0})")]
  DuplicateState(&'static str),
  #[error("{0} component parameters exceed the limit of {max}", max = crate::systems::MAX_COMPONENTS)]
  TooManyComponents(usize),
}

#[derive(Error, Debug, PartialEq)]
pub enum FieldError {
  #[error("Component {component} has no field {field}")]
  UnknownField {
    component: &'static str,
    field: String,
  },
  #[error("Expected {expected} value, found {found}")]
  TypeMismatch {
    expected: &'static str,
    found: &'static str,
  },
  #[error("Value {value} does not fit into {target}")]
  OutOfRange { value: String, target: &'static str },
  #[error("Field {component}.{field}: {source}")]
  Invalid {
    component: &'static str,
    field: &'static str,
    #[source]
    source: Box<FieldError>,
  },
}

impl FieldError {
  pub fn in_field(self, component: &'static str, field: &'static str) -> Self {
    FieldError::Invalid {
      component,
      field,
      source: Box::new(self),
    }
  }
}
