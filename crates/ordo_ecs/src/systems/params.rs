use std::{
  any::Any,
  marker::PhantomData,
  ops::{Deref, DerefMut},
};

use crate::{
  components::Component,
  context::UpdateContext,
  error::ShapeError,
  systems::metadata::{AccessType, ShapeMeta},
  ComponentId,
};

/// Everything one invocation of an update entry point can bind to.
///
/// Holds raw pointers so that several parameters can borrow disjoint parts
/// of it at once. [`ShapeMeta`] validation guarantees that no component, the
/// context or the state is handed out twice.
#[derive(Clone, Copy)]
pub struct Binding<'w> {
  row: *mut Box<dyn Component>,
  ids: &'w [ComponentId],
  context: *mut UpdateContext,
  state: Option<*mut dyn Any>,
  marker: PhantomData<&'w mut UpdateContext>,
}

impl<'w> Binding<'w> {
  /// `ids` has to hold the type ids of `row`, in order.
  pub(crate) fn new(
    row: &'w mut [Box<dyn Component>],
    ids: &'w [ComponentId],
    context: &'w mut UpdateContext,
    state: Option<&'w mut dyn Any>,
  ) -> Self {
    debug_assert_eq!(row.len(), ids.len());

    Self {
      row: row.as_mut_ptr(),
      ids,
      context,
      state: state.map(|s| s as *mut dyn Any),
      marker: PhantomData,
    }
  }

  /// # Safety
  /// No other reference to the `C` of this row may be alive.
  unsafe fn component_mut<C: Component>(&self) -> Option<&'w mut C> {
    // the type ids are a copy, the row itself is only touched at the column
    // that is handed out
    let column = self.ids.iter().position(|&id| id == C::sid())?;
    let slot = &mut *self.row.add(column);
    slot.downcast_mut::<C>()
  }

  /// # Safety
  /// The context may not be borrowed elsewhere.
  unsafe fn context(&self) -> &'w mut UpdateContext {
    &mut *self.context
  }

  /// # Safety
  /// The state may not be borrowed elsewhere.
  unsafe fn state_mut<T: Any>(&self) -> Option<&'w mut T> {
    let state = &mut *self.state?;
    state.downcast_mut::<T>()
  }
}

/// A parameter of an update entry point.
///
/// `None` from [`bind`](ShapeParam::bind) means the parameter cannot be
/// bound for this entity or pass, and the invocation is skipped.
pub trait ShapeParam {
  type Item<'w>;

  fn bind(binding: Binding<'_>) -> Option<Self::Item<'_>>;
  fn check_metadata(meta: &mut ShapeMeta) -> Result<(), ShapeError>;
}

impl<C: Component> ShapeParam for &C {
  type Item<'w> = &'w C;

  #[inline]
  fn bind(binding: Binding<'_>) -> Option<Self::Item<'_>> {
    // SAFETY: check_metadata rejects shapes naming C twice
    unsafe { binding.component_mut::<C>() }.map(|c| &*c)
  }

  #[inline]
  fn check_metadata(meta: &mut ShapeMeta) -> Result<(), ShapeError> {
    meta.add_comp::<C>(AccessType::Read)
  }
}

impl<C: Component> ShapeParam for &mut C {
  type Item<'w> = &'w mut C;

  #[inline]
  fn bind(binding: Binding<'_>) -> Option<Self::Item<'_>> {
    // SAFETY: check_metadata rejects shapes naming C twice
    unsafe { binding.component_mut::<C>() }
  }

  #[inline]
  fn check_metadata(meta: &mut ShapeMeta) -> Result<(), ShapeError> {
    meta.add_comp::<C>(AccessType::Write)
  }
}

impl ShapeParam for &mut UpdateContext {
  type Item<'w> = &'w mut UpdateContext;

  #[inline]
  fn bind(binding: Binding<'_>) -> Option<Self::Item<'_>> {
    // SAFETY: check_metadata rejects a second context parameter
    Some(unsafe { binding.context() })
  }

  #[inline]
  fn check_metadata(meta: &mut ShapeMeta) -> Result<(), ShapeError> {
    meta.add_context()
  }
}

/// The ambient state of the current pass, read only.
///
/// A shape with a `State<T>` parameter only runs in passes whose state is a
/// `T`.
pub struct State<'a, T: 'static> {
  value: &'a T,
}

impl<T: 'static> Deref for State<'_, T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    self.value
  }
}

impl<T: 'static> ShapeParam for State<'_, T> {
  type Item<'w> = State<'w, T>;

  #[inline]
  fn bind(binding: Binding<'_>) -> Option<Self::Item<'_>> {
    // SAFETY: check_metadata rejects a second state parameter
    let value = unsafe { binding.state_mut::<T>() }?;
    Some(State { value })
  }

  #[inline]
  fn check_metadata(meta: &mut ShapeMeta) -> Result<(), ShapeError> {
    meta.add_state::<T>(AccessType::Read)
  }
}

/// The ambient state of the current pass, writable.
pub struct StateMut<'a, T: 'static> {
  value: &'a mut T,
}

impl<T: 'static> Deref for StateMut<'_, T> {
  type Target = T;

  fn deref(&self) -> &Self::Target {
    self.value
  }
}

impl<T: 'static> DerefMut for StateMut<'_, T> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    self.value
  }
}

impl<T: 'static> ShapeParam for StateMut<'_, T> {
  type Item<'w> = StateMut<'w, T>;

  #[inline]
  fn bind(binding: Binding<'_>) -> Option<Self::Item<'_>> {
    // SAFETY: check_metadata rejects a second state parameter
    let value = unsafe { binding.state_mut::<T>() }?;
    Some(StateMut { value })
  }

  #[inline]
  fn check_metadata(meta: &mut ShapeMeta) -> Result<(), ShapeError> {
    meta.add_state::<T>(AccessType::Write)
  }
}
