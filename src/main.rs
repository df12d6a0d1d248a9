use log::info;
use ordo::prelude::*;

#[derive(Component, Clone, Default, Debug)]
struct Position {
  x: f32,
  y: f32,
}

#[derive(Component, Clone, Default, Debug)]
struct Velocity {
  x: f32,
  y: f32,
}

#[derive(Component, Clone, Default, Debug)]
struct Fuel(u32);

struct Gravity(f32);

struct Thrust;

impl System for Thrust {
  fn shapes(shapes: &mut Shapes<Self>) {
    shapes.add(Self::burn);
  }
}

impl Thrust {
  fn burn(&mut self, fuel: &mut Fuel, vel: &mut Velocity) -> bool {
    if fuel.0 == 0 {
      return false;
    }
    fuel.0 -= 1;
    vel.y += 1.5;
    true
  }
}

struct Movement;

impl System for Movement {
  fn shapes(shapes: &mut Shapes<Self>) {
    shapes.add(Self::step).add(Self::fall);
  }

  fn dependencies(deps: &mut Dependencies) {
    deps.after::<Thrust>();
  }
}

impl Movement {
  fn step(&mut self, pos: &mut Position, vel: &Velocity) -> bool {
    pos.x += vel.x;
    pos.y += vel.y;
    true
  }

  fn fall(&mut self, gravity: State<Gravity>, vel: &mut Velocity) -> bool {
    vel.y -= gravity.0;
    true
  }
}

fn main() -> Result<(), EcsError> {
  #[cfg(feature = "debug")]
  env_logger::init();

  let mut builder = ECS::builder().config(EcsConfig::default().set_seed(7));
  builder.add_system(Movement)?.add_system(Thrust)?;

  let rocket = builder.create_entity((
    Position::default(),
    Velocity { x: 0.5, y: 0.0 },
    Fuel(3),
  ))?;
  let rock = builder.create_entity((Position { x: 10.0, y: 5.0 }, Velocity::default()))?;

  let mut ecs = builder.build()?;
  info!("Execution order: {:?}", ecs.order());

  let mut gravity = Gravity(1.0);
  for _ in 0..5 {
    ecs.update_with_state(&mut gravity)?;
    info!(
      "Tick {}: rocket {:?} rock {:?} active {} inactive {}",
      ecs.tick(),
      ecs.get_component::<Position>(rocket)?,
      ecs.get_component::<Position>(rock)?,
      ecs.context().active().len(),
      ecs.context().inactive().len()
    );
  }

  let snapshot = ecs.dump();
  info!("Snapshot: {:?}", snapshot);
  ecs.restore(&snapshot)?;

  Ok(())
}
