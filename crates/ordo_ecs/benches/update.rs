use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ordo_ecs::{
  config::{InactiveHandling, Strategy},
  systems::{Shapes, System},
  Component, ECS,
};

struct Movement;

impl System for Movement {
  fn shapes(shapes: &mut Shapes<Self>) {
    shapes.add(Self::step);
  }
}

impl Movement {
  fn step(&mut self, pos: &mut Position, vel: &Velocity) -> bool {
    pos.x += vel.x;
    black_box(pos);
    true
  }
}

fn update_benchmark(c: &mut Criterion) {
  for i in [1, 1000, 100_000] {
    let mut ecs = ECS::builder();
    ecs.add_system(Movement).unwrap();

    for _ in 0..i {
      ecs
        .create_entity((Position { x: 0.0 }, Velocity { x: 1.0 }))
        .unwrap();
      ecs.create_entity(Position { x: 0.0 }).unwrap();
    }

    let mut ecs = ecs.build().unwrap();

    c.bench_function(&format!("update {}", i), |b| {
      b.iter(|| ecs.update().unwrap())
    });

    c.bench_function(&format!("update ignore {}", i), |b| {
      b.iter(|| {
        ecs
          .update_with(None, Strategy::Single, InactiveHandling::Ignore)
          .unwrap()
      })
    });
  }
}

criterion_group!(update, update_benchmark);
criterion_main!(update);

#[derive(Component, Clone, Default)]
struct Position {
  x: f32,
}

#[derive(Component, Clone, Default)]
struct Velocity {
  x: f32,
}
