#[cfg(test)]
mod test {
  use ordo_ecs_macros::all_tuples;

  #[test]
  fn all_tuples() {
    trait Names {
      fn names(self) -> Vec<String>;
    }

    trait Name {
      fn name() -> String;
    }

    impl Name for usize {
      fn name() -> String {
        "usize".into()
      }
    }

    impl Name for isize {
      fn name() -> String {
        "isize".into()
      }
    }

    macro_rules! names_macro {
      ($($p:ident),*) => {
        impl<$($p : Name),*> Names for ($($p ,)*) {
          fn names(self) -> Vec<String> {
            vec![$($p::name()),*]
          }
        }
      };
    }

    all_tuples!(names_macro, 0, 2, P);

    assert_eq!((0usize, 1isize).names(), vec!["usize", "isize"]);
    assert_eq!((1isize,).names(), vec!["isize"]);
    assert!(().names().is_empty());
  }
}
