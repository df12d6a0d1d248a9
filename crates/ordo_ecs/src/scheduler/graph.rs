use std::collections::BTreeSet;

use log::warn;

use crate::{error::EcsError, systems::StoredSystem};

// edges[i][j]: i has to run before j
//       j
//   - 0 1 2
//   0 0 1 1
// i 1 0 0 1
//   2 0 0 0
#[derive(Debug)]
pub struct Graph {
  edges: Vec<Vec<bool>>,
  names: Vec<&'static str>,
}

impl Graph {
  /// Orders the vertices so every edge points forward.
  ///
  /// Among vertices that are ready at the same time the one registered first
  /// wins. Edges left over once no vertex is ready form a cycle.
  pub fn sort(&self) -> Result<Vec<usize>, EcsError> {
    let vertices = self.edges.len();
    let mut edges = self.edges.clone();

    let mut incoming = (0..vertices)
      .map(|j| edges.iter().filter(|row| row[j]).count())
      .collect::<Vec<_>>();
    let mut ready = (0..vertices)
      .filter(|&v| incoming[v] == 0)
      .collect::<BTreeSet<_>>();
    let mut order = Vec::with_capacity(vertices);

    while let Some(v) = ready.pop_first() {
      order.push(v);

      for j in 0..vertices {
        if edges[v][j] {
          edges[v][j] = false;
          incoming[j] -= 1;
          if incoming[j] == 0 {
            ready.insert(j);
          }
        }
      }
    }

    if order.len() < vertices {
      let names = (0..vertices)
        .filter(|&v| incoming[v] > 0)
        .map(|v| self.names[v])
        .collect();
      return Err(EcsError::DependencyCycle(names));
    }

    Ok(order)
  }

  #[cfg(test)]
  fn neighbors(&self, node_idx: usize) -> Vec<usize> {
    self.edges[node_idx]
      .iter()
      .enumerate()
      .filter(|(_, e)| **e)
      .map(|(i, _)| i)
      .collect()
  }
}

impl From<&[Box<dyn StoredSystem>]> for Graph {
  fn from(value: &[Box<dyn StoredSystem>]) -> Self {
    let mut edges = vec![vec![false; value.len()]; value.len()];

    for (j, system) in value.iter().enumerate() {
      for (id, name) in system.dependencies().iter() {
        match value.iter().position(|s| s.id() == *id) {
          Some(i) => edges[i][j] = true,
          None => warn!(
            "System {} depends on unregistered system {}, ignoring",
            system.name(),
            name
          ),
        }
      }
    }

    Self {
      edges,
      names: value.iter().map(|s| s.name()).collect(),
    }
  }
}
