use std::{
  any::{type_name, TypeId},
  marker::PhantomData,
};

#[cfg(feature = "debug")]
use log::trace;
use ordo_ecs_macros::all_tuples;

use crate::error::{BoxedError, EcsError, ShapeError};

pub mod metadata;
pub mod params;

use metadata::ShapeMeta;
use params::{Binding, ShapeParam};

/// Highest number of component parameters a single shape may declare.
pub const MAX_COMPONENTS: usize = 11;

pub type SystemId = TypeId;

/// A unit of update logic.
///
/// A system declares one or more shapes, methods taking `&mut self` followed
/// by any mix of `&C` / `&mut C` components, at most one
/// `&mut UpdateContext` and at most one [`State`](params::State) /
/// [`StateMut`](params::StateMut). Each shape runs once per entity owning
/// all of its component types and returns whether the entity stays active.
///
/// ```ignore
/// struct Movement;
///
/// impl System for Movement {
///   fn shapes(shapes: &mut Shapes<Self>) {
///     shapes.add(Self::step);
///   }
///
///   fn dependencies(deps: &mut Dependencies) {
///     deps.after::<Gravity>();
///   }
/// }
///
/// impl Movement {
///   fn step(&mut self, pos: &mut Position, vel: &Velocity) -> bool {
///     pos.x += vel.x;
///     true
///   }
/// }
/// ```
pub trait System: 'static {
  fn shapes(shapes: &mut Shapes<Self>)
  where
    Self: Sized;

  fn dependencies(_deps: &mut Dependencies)
  where
    Self: Sized,
  {
  }
}

/// Systems that have to run before the declaring one.
#[derive(Default, Debug)]
pub struct Dependencies {
  after: Vec<(SystemId, &'static str)>,
}

impl Dependencies {
  pub fn after<S: System>(&mut self) -> &mut Self {
    self.after.push((TypeId::of::<S>(), type_name::<S>()));
    self
  }

  #[inline]
  pub fn iter(&self) -> impl Iterator<Item = &(SystemId, &'static str)> {
    self.after.iter()
  }
}

pub struct Shapes<S> {
  shapes: Vec<Box<dyn Shape<S>>>,
  errors: Vec<ShapeError>,
}

impl<S: 'static> Shapes<S> {
  fn new() -> Self {
    Self {
      shapes: Vec::new(),
      errors: Vec::new(),
    }
  }

  pub fn add<M>(&mut self, shape: impl IntoShape<S, M>) -> &mut Self {
    match shape.into_shape() {
      Ok(shape) => self.shapes.push(shape),
      Err(err) => self.errors.push(err),
    }
    self
  }
}

/// Return type of a shape: a plain `bool` or a fallible `Result<bool, E>`.
pub trait ShapeOutput: 'static {
  fn into_result(self) -> Result<bool, BoxedError>;
}

impl ShapeOutput for bool {
  #[inline]
  fn into_result(self) -> Result<bool, BoxedError> {
    Ok(self)
  }
}

impl<E: Into<BoxedError> + 'static> ShapeOutput for Result<bool, E> {
  #[inline]
  fn into_result(self) -> Result<bool, BoxedError> {
    self.map_err(Into::into)
  }
}

pub trait Shape<S> {
  fn meta(&self) -> &ShapeMeta;
  /// `None` if a parameter could not be bound.
  fn run(&mut self, system: &mut S, binding: Binding<'_>) -> Option<Result<bool, BoxedError>>;
}

pub trait IntoShape<S, Marker> {
  fn into_shape(self) -> Result<Box<dyn Shape<S>>, ShapeError>;
}

pub struct FunctionShape<Marker, F> {
  f: F,
  meta: ShapeMeta,
  marker: PhantomData<fn() -> Marker>,
}

macro_rules! impl_shape {
  ($($params:ident),*) => {
    #[allow(unused_variables)]
    #[allow(non_snake_case)]
    impl<S, R, F, $($params : ShapeParam + 'static),*> Shape<S> for FunctionShape<fn($($params),*) -> R, F>
    where
      S: 'static,
      R: ShapeOutput,
      F: 'static,
      for<'a, 'b> &'a mut F:
        FnMut(&mut S, $($params),*) -> R +
        FnMut(&mut S, $(<$params as ShapeParam>::Item<'b>),*) -> R
    {
      fn meta(&self) -> &ShapeMeta {
        &self.meta
      }

      fn run(&mut self, system: &mut S, binding: Binding<'_>) -> Option<Result<bool, BoxedError>> {
        #[allow(clippy::too_many_arguments)]
        fn call_inner<S, R, $($params),*>(
          mut f: impl FnMut(&mut S, $($params),*) -> R,
          system: &mut S,
          $($params: $params),*
        ) -> R {
          f(system, $($params),*)
        }

        $(
          let $params = $params::bind(binding)?;
        )*

        Some(call_inner(&mut self.f, system, $($params),*).into_result())
      }
    }

    #[allow(unused_variables)]
    #[allow(non_snake_case)]
    impl<S, R, F, $($params : ShapeParam + 'static),*> IntoShape<S, fn($($params),*) -> R> for F
    where
      S: 'static,
      R: ShapeOutput,
      F: 'static,
      for<'a, 'b> &'a mut F:
        FnMut(&mut S, $($params),*) -> R +
        FnMut(&mut S, $(<$params as ShapeParam>::Item<'b>),*) -> R
    {
      fn into_shape(self) -> Result<Box<dyn Shape<S>>, ShapeError> {
        #[allow(unused_mut)]
        let mut meta = ShapeMeta::new();

        $(
          $params::check_metadata(&mut meta)?;
        )*
        meta.validate()?;

        Ok(Box::new(FunctionShape {
          f: self,
          meta,
          marker: PhantomData,
        }))
      }
    }
  };
}

all_tuples!(impl_shape, 0, 13, P);

/// Type erased system together with its resolved shapes.
pub(crate) trait StoredSystem {
  fn id(&self) -> SystemId;
  fn name(&self) -> &'static str;
  fn dependencies(&self) -> &Dependencies;
  fn shapes(&self) -> Vec<&ShapeMeta>;
  fn run_shape(&mut self, shape: usize, binding: Binding<'_>) -> Option<Result<bool, BoxedError>>;
}

struct SystemCell<S> {
  system: S,
  shapes: Vec<Box<dyn Shape<S>>>,
  dependencies: Dependencies,
}

impl<S: System> StoredSystem for SystemCell<S> {
  #[inline]
  fn id(&self) -> SystemId {
    TypeId::of::<S>()
  }

  #[inline]
  fn name(&self) -> &'static str {
    type_name::<S>()
  }

  #[inline]
  fn dependencies(&self) -> &Dependencies {
    &self.dependencies
  }

  fn shapes(&self) -> Vec<&ShapeMeta> {
    self.shapes.iter().map(|s| s.meta()).collect()
  }

  #[inline]
  fn run_shape(&mut self, shape: usize, binding: Binding<'_>) -> Option<Result<bool, BoxedError>> {
    #[cfg(feature = "debug")]
    trace!("Executing System {} Shape {}", type_name::<S>(), shape);

    self.shapes.get_mut(shape)?.run(&mut self.system, binding)
  }
}

pub(crate) fn store<S: System>(system: S) -> Result<Box<dyn StoredSystem>, EcsError> {
  let mut shapes = Shapes::new();
  S::shapes(&mut shapes);

  if let Some(source) = shapes.errors.into_iter().next() {
    return Err(EcsError::InvalidShape {
      system: type_name::<S>(),
      source,
    });
  }

  let mut dependencies = Dependencies::default();
  S::dependencies(&mut dependencies);

  Ok(Box::new(SystemCell {
    system,
    shapes: shapes.shapes,
    dependencies,
  }))
}

#[cfg(test)]
mod test {
  use ordo_ecs_macros::Component;

  use super::{
    params::{State, StateMut},
    store, Dependencies, Shapes, System, MAX_COMPONENTS,
  };
  use crate::{self as ordo_ecs, context::UpdateContext, error::EcsError, error::ShapeError};

  #[derive(Component, Clone, Default)]
  struct A(u32);

  #[derive(Component, Clone, Default)]
  struct B(u32);

  struct Valid;

  impl System for Valid {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes
        .add(Self::one)
        .add(Self::two)
        .add(Self::three);
    }

    fn dependencies(deps: &mut Dependencies) {
      deps.after::<Other>();
    }
  }

  impl Valid {
    fn one(&mut self, _: &A) -> bool {
      true
    }

    fn two(&mut self, _: &mut A, _: &B) -> Result<bool, std::io::Error> {
      Ok(false)
    }

    fn three(&mut self, _: &mut UpdateContext, _: State<u8>, _: &A) -> bool {
      true
    }
  }

  struct Other;

  impl System for Other {
    fn shapes(_: &mut Shapes<Self>) {}
  }

  #[test]
  fn shapes() {
    let system = store(Valid).unwrap();
    let shapes = system.shapes();

    assert_eq!(shapes.len(), 3);
    assert_eq!(shapes[0].params(), 1);
    assert_eq!(shapes[1].components().len(), 2);
    assert_eq!(shapes[2].params(), 3);
    assert!(shapes[2].uses_context());
    assert!(shapes[2].state().is_some());
    assert_eq!(system.dependencies().iter().count(), 1);
    assert!(system.name().ends_with("Valid"));
  }

  struct DoubleComponent;

  impl System for DoubleComponent {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes.add(Self::run);
    }
  }

  impl DoubleComponent {
    fn run(&mut self, _: &mut A, _: &A) -> bool {
      true
    }
  }

  struct DoubleContext;

  impl System for DoubleContext {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes.add(Self::run);
    }
  }

  impl DoubleContext {
    fn run(&mut self, _: &mut UpdateContext, _: &mut UpdateContext) -> bool {
      true
    }
  }

  struct DoubleState;

  impl System for DoubleState {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes.add(Self::run);
    }
  }

  impl DoubleState {
    fn run(&mut self, _: State<u8>, _: StateMut<u16>) -> bool {
      true
    }
  }

  macro_rules! components {
    ($($name:ident),*) => {
      $(
        #[derive(Component, Clone, Default)]
        struct $name;
      )*
    };
  }

  components!(C0, C1, C2, C3, C4, C5, C6, C7, C8, C9, C10, C11);

  struct Eleven;

  impl System for Eleven {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes.add(Self::run);
    }
  }

  impl Eleven {
    #[allow(clippy::too_many_arguments)]
    fn run(
      &mut self,
      _: &C0,
      _: &C1,
      _: &C2,
      _: &C3,
      _: &C4,
      _: &C5,
      _: &C6,
      _: &C7,
      _: &C8,
      _: &C9,
      _: &mut C10,
      _: &mut UpdateContext,
    ) -> bool {
      true
    }
  }

  struct Twelve;

  impl System for Twelve {
    fn shapes(shapes: &mut Shapes<Self>) {
      shapes.add(Self::run);
    }
  }

  impl Twelve {
    #[allow(clippy::too_many_arguments)]
    fn run(
      &mut self,
      _: &C0,
      _: &C1,
      _: &C2,
      _: &C3,
      _: &C4,
      _: &C5,
      _: &C6,
      _: &C7,
      _: &C8,
      _: &C9,
      _: &C10,
      _: &mut C11,
    ) -> bool {
      true
    }
  }

  #[test]
  fn component_limit() {
    let eleven = store(Eleven).unwrap();
    assert_eq!(eleven.shapes()[0].components().len(), MAX_COMPONENTS);

    assert!(matches!(
      store(Twelve),
      Err(EcsError::InvalidShape {
        source: ShapeError::TooManyComponents(12),
        ..
      })
    ));
  }

  #[test]
  fn invalid_shapes() {
    assert!(matches!(
      store(DoubleComponent),
      Err(EcsError::InvalidShape {
        source: ShapeError::DuplicateComponent(_),
        ..
      })
    ));
    assert!(matches!(
      store(DoubleContext),
      Err(EcsError::InvalidShape {
        source: ShapeError::DuplicateContext,
        ..
      })
    ));
    assert!(matches!(
      store(DoubleState),
      Err(EcsError::InvalidShape {
        source: ShapeError::DuplicateState(_),
        ..
      })
    ));
  }
}
