use ordo_macro_utils::Manifest;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
  parse::Parse, parse_macro_input, token::Comma, Fields, Ident, Index, ItemStruct, LitInt, Member,
};

pub(crate) fn ordo_ecs_path() -> syn::Path {
  Manifest::default().get_path("ordo_ecs")
}

/// Implements `Component` together with its field accessors.
///
/// Named fields are addressed by name, tuple fields by position (`"0"`,
/// `"1"`, ..). Every field type has to implement `FieldValue` and the struct
/// itself `Clone + Default`.
#[proc_macro_derive(Component)]
pub fn component(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as ItemStruct);

  let ecs_path = ordo_ecs_path();

  let name = &input.ident;
  let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

  let members = match &input.fields {
    Fields::Named(fields) => fields
      .named
      .iter()
      .filter_map(|f| f.ident.clone())
      .map(Member::Named)
      .collect::<Vec<_>>(),
    Fields::Unnamed(fields) => (0..fields.unnamed.len())
      .map(|i| Member::Unnamed(Index::from(i)))
      .collect(),
    Fields::Unit => Vec::new(),
  };
  let names = members
    .iter()
    .map(|m| match m {
      Member::Named(ident) => ident.to_string(),
      Member::Unnamed(index) => index.index.to_string(),
    })
    .collect::<Vec<_>>();

  quote! {
    impl #impl_generics #ecs_path::components::Component for #name #type_generics #where_clause {
      fn id(&self) -> #ecs_path::ComponentId {
        ::std::any::TypeId::of::<Self>()
      }

      fn sid() -> #ecs_path::ComponentId {
        ::std::any::TypeId::of::<Self>()
      }

      fn name(&self) -> &'static str {
        ::std::any::type_name::<Self>()
      }

      fn sname() -> &'static str {
        ::std::any::type_name::<Self>()
      }

      fn fields(&self) -> &'static [&'static str] {
        &[#(#names),*]
      }

      fn get_field(&self, field: &str) -> ::std::option::Option<#ecs_path::value::Value> {
        match field {
          #(
            #names => ::std::option::Option::Some(
              #ecs_path::value::FieldValue::to_value(&self.#members)
            ),
          )*
          _ => ::std::option::Option::None,
        }
      }

      #[allow(unused_variables)]
      fn set_field(
        &mut self,
        field: &str,
        value: #ecs_path::value::Value,
      ) -> ::std::result::Result<(), #ecs_path::error::FieldError> {
        match field {
          #(
            #names => {
              self.#members = #ecs_path::value::FieldValue::from_value(value)
                .map_err(|e| e.in_field(::std::any::type_name::<Self>(), #names))?;
              ::std::result::Result::Ok(())
            }
          )*
          _ => ::std::result::Result::Err(#ecs_path::error::FieldError::UnknownField {
            component: ::std::any::type_name::<Self>(),
            field: field.to_string(),
          }),
        }
      }

      fn clone_box(&self) -> ::std::boxed::Box<dyn #ecs_path::components::Component> {
        ::std::boxed::Box::new(::std::clone::Clone::clone(self))
      }

      fn create_default() -> ::std::boxed::Box<dyn #ecs_path::components::Component> {
        ::std::boxed::Box::new(<Self as ::std::default::Default>::default())
      }

      fn factory(&self) -> #ecs_path::components::ComponentFactory {
        <Self as #ecs_path::components::Component>::create_default
      }

      fn as_any(&self) -> &dyn ::std::any::Any {
        self
      }

      fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
        self
      }
    }
  }
  .into()
}

struct AllTuples {
  macro_ident: Ident,
  start: usize,
  end: usize,
  idents: Vec<Ident>,
}

impl Parse for AllTuples {
  fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
    let macro_ident = input.parse::<Ident>()?;
    input.parse::<Comma>()?;
    let start = input.parse::<LitInt>()?.base10_parse()?;
    input.parse::<Comma>()?;
    let end = input.parse::<LitInt>()?.base10_parse()?;
    input.parse::<Comma>()?;
    let mut idents = vec![input.parse::<Ident>()?];
    while input.parse::<Comma>().is_ok() {
      idents.push(input.parse::<Ident>()?);
    }

    if start > end {
      return Err(syn::Error::new(
        macro_ident.span(),
        "all_tuples: start must not be greater than end",
      ));
    }

    Ok(AllTuples {
      macro_ident,
      start,
      end,
      idents,
    })
  }
}

/// Invokes `macro_ident!` once for every arity from `start` to `end`
/// (inclusive) with the identifiers `P0, P1, ..` of that arity.
#[proc_macro]
pub fn all_tuples(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as AllTuples);
  let ident_tuples = (0..input.end)
    .map(|i| {
      let idents = input
        .idents
        .iter()
        .map(|ident| format_ident!("{}{}", ident, i));
      to_ident_tuple(idents, input.idents.len())
    })
    .collect::<Vec<_>>();

  let macro_ident = &input.macro_ident;
  let invocations = (input.start..=input.end).map(|i| {
    let ident_tuples = &ident_tuples[..i];
    quote! {
      #macro_ident!(#(#ident_tuples),*);
    }
  });

  TokenStream::from(quote! {
    #(
      #invocations
    )*
  })
}

fn to_ident_tuple(idents: impl Iterator<Item = Ident>, len: usize) -> TokenStream2 {
  if len < 2 {
    quote! { #(#idents)* }
  } else {
    quote! { (#(#idents),*) }
  }
}
