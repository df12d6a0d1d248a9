extern crate proc_macro;

use std::{env, path::PathBuf};

use proc_macro::TokenStream;
use toml_edit::{DocumentMut, Item};

/// The `Cargo.toml` of the crate a derive is expanded in.
///
/// Lets generated code name `ordo_ecs` directly or through the `ordo`
/// facade, depending on what the user depends on.
pub struct Manifest {
  doc: DocumentMut,
}

impl Default for Manifest {
  fn default() -> Self {
    let path = env::var_os("CARGO_MANIFEST_DIR")
      .map(PathBuf::from)
      .map(|mut path| {
        path.push("Cargo.toml");
        path
      })
      .expect("CARGO_MANIFEST_DIR not defined.");

    let manifest = std::fs::read_to_string(&path)
      .unwrap_or_else(|_| panic!("Unable to read Cargo.toml: {}", path.display()));

    Self {
      doc: manifest
        .parse::<DocumentMut>()
        .unwrap_or_else(|_| panic!("Failed to parse Cargo.toml: {}", path.display())),
    }
  }
}

const ORDO: &str = "ordo";

impl Manifest {
  /// Path of `name`, falling back to `name` itself when neither it nor the
  /// facade is a (dev-)dependency, which is the case inside the crate itself.
  pub fn get_path(&self, name: &str) -> syn::Path {
    self.try_get_path(name).unwrap_or_else(|| parse_str(name))
  }

  pub fn try_get_path(&self, name: &str) -> Option<syn::Path> {
    fn dep_package(dep: &Item) -> Option<&str> {
      if dep.as_str().is_some() {
        None
      } else {
        dep.get("package").and_then(|name| name.as_str())
      }
    }

    let find = |deps: &Item| {
      if let Some(dep) = deps.get(name) {
        return Some(parse_str(dep_package(dep).unwrap_or(name)));
      }

      let facade = dep_package(deps.get(ORDO)?).unwrap_or(ORDO);
      let mut path = parse_str::<syn::Path>(&facade.replace('-', "_"));
      if let Some(module) = name.strip_prefix("ordo_") {
        path.segments.push(parse_str(module));
      }
      Some(path)
    };

    let dependencies = self.doc.get("dependencies");
    let dev_dependencies = self.doc.get("dev-dependencies");

    dependencies
      .and_then(find)
      .or_else(|| dev_dependencies.and_then(find))
  }
}

fn try_parse_str<T: syn::parse::Parse>(path: &str) -> Option<T> {
  syn::parse(path.parse::<TokenStream>().ok()?).ok()
}

fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
  try_parse_str(path).unwrap_or_else(|| panic!("Invalid path: {path}"))
}
