//! Field-level copies of entity state.

use std::collections::BTreeMap;

use crate::{
  components::Component,
  error::{EcsError, FieldError},
  storage::Storage,
  value::Value,
  EntityId,
};

/// Field name to value.
pub type FieldMap = BTreeMap<String, Value>;
/// Component type name to its fields.
pub type EntitySnapshot = BTreeMap<String, FieldMap>;
pub type Snapshot = BTreeMap<EntityId, EntitySnapshot>;

pub fn dump_component(comp: &dyn Component) -> FieldMap {
  comp
    .fields()
    .iter()
    .filter_map(|&field| Some((field.to_string(), comp.get_field(field)?)))
    .collect()
}

pub fn dump_entity(storage: &Storage, entity: EntityId) -> Result<EntitySnapshot, EcsError> {
  Ok(
    storage
      .components(entity)?
      .iter()
      .map(|c| (c.name().to_string(), dump_component(&**c)))
      .collect(),
  )
}

pub fn dump(storage: &Storage) -> Snapshot {
  storage
    .entities()
    .into_iter()
    .filter_map(|e| Some((e, dump_entity(storage, e).ok()?)))
    .collect()
}

fn build_component(storage: &Storage, name: &str, fields: &FieldMap) -> Result<Box<dyn Component>, EcsError> {
  let factory = storage
    .factory(name)
    .ok_or_else(|| EcsError::UnknownComponent(name.to_string()))?;

  let mut comp = factory();
  for (field, value) in fields {
    let known = comp
      .fields()
      .iter()
      .find(|&&f| f == field.as_str())
      .copied()
      .ok_or_else(|| FieldError::UnknownField {
        component: comp.name(),
        field: field.clone(),
      })?;
    comp.set_field(known, value.clone())?;
  }

  Ok(comp)
}

/// Rebuilds every listed entity under its id. Nothing is written unless all
/// entities of `snapshot` could be built.
pub fn restore(storage: &mut Storage, snapshot: &Snapshot) -> Result<(), EcsError> {
  let mut rows = Vec::with_capacity(snapshot.len());

  for (&entity, comps) in snapshot {
    let row = comps
      .iter()
      .map(|(name, fields)| build_component(storage, name, fields))
      .collect::<Result<Vec<_>, _>>()?;
    rows.push((entity, row));
  }

  for (entity, row) in rows {
    storage.create_entity_with_id(row, entity)?;
  }

  Ok(())
}

#[cfg(test)]
mod test {
  use ordo_ecs_macros::Component;

  use super::{dump, restore, FieldMap};
  use crate::{
    self as ordo_ecs, components::Component, error::EcsError, error::FieldError, storage::Storage,
    value::Value,
  };

  #[derive(Component, Clone, Default, Debug, PartialEq)]
  struct Health {
    current: u32,
    max: u32,
  }

  #[derive(Component, Clone, Default, Debug, PartialEq)]
  struct Name(String);

  #[derive(Component, Clone, Default)]
  struct Marker;

  fn storage() -> Storage {
    let mut storage = Storage::new(0);
    storage
      .create_entity(vec![
        Box::new(Health { current: 3, max: 10 }),
        Box::new(Name("orc".into())),
      ])
      .unwrap();
    storage.create_entity(vec![Box::new(Marker)]).unwrap();
    storage
  }

  #[test]
  fn dump_fields() {
    let storage = storage();
    let snapshot = dump(&storage);

    assert_eq!(snapshot.len(), 2);
    let health = &snapshot[&0][Health::sname()];
    assert_eq!(health["current"], Value::UInt(3));
    assert_eq!(health["max"], Value::UInt(10));
    assert_eq!(
      snapshot[&0][Name::sname()]["0"],
      Value::String("orc".into())
    );
    assert!(snapshot[&1][Marker::sname()].is_empty());
  }

  #[test]
  fn dump_does_not_alias() {
    let mut storage = storage();
    let snapshot = dump(&storage);

    storage.get_comp_mut::<Health>(0).unwrap().current = 7;
    assert_eq!(snapshot[&0][Health::sname()]["current"], Value::UInt(3));
  }

  #[test]
  fn restore_round_trip() {
    let mut storage = storage();
    let snapshot = dump(&storage);

    storage.get_comp_mut::<Health>(0).unwrap().current = 1;
    restore(&mut storage, &snapshot).unwrap();

    assert_eq!(dump(&storage), snapshot);
    assert_eq!(storage.get_comp::<Health>(0).unwrap().current, 3);
  }

  #[test]
  fn restore_partial_fields() {
    let mut storage = storage();
    let mut snapshot = dump(&storage);
    let mut fields = FieldMap::new();
    fields.insert("max".into(), Value::UInt(4));
    snapshot
      .get_mut(&0)
      .unwrap()
      .insert(Health::sname().to_string(), fields);

    restore(&mut storage, &snapshot).unwrap();
    assert_eq!(
      storage.get_comp::<Health>(0).unwrap(),
      &Health { current: 0, max: 4 }
    );
  }

  #[test]
  fn restore_errors() {
    let mut storage = storage();

    let mut snapshot = dump(&storage);
    snapshot
      .get_mut(&1)
      .unwrap()
      .insert("nowhere::Unknown".into(), FieldMap::new());
    assert!(matches!(
      restore(&mut storage, &snapshot),
      Err(EcsError::UnknownComponent(name)) if name == "nowhere::Unknown"
    ));

    let mut snapshot = dump(&storage);
    snapshot
      .get_mut(&0)
      .unwrap()
      .get_mut(Health::sname())
      .unwrap()
      .insert("current".into(), Value::String("full".into()));
    assert!(matches!(
      restore(&mut storage, &snapshot),
      Err(EcsError::Field(FieldError::Invalid { .. }))
    ));

    assert_eq!(storage.get_comp::<Health>(0).unwrap().current, 3);
  }
}
