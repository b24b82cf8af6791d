//! `#[derive(Nest)]`: registers a user type as a leaf of nested shapes.
//!
//! The generated impl is empty; it opts the type into
//! `multidim_core::Nest`, whose supertraits require `Default` and
//! `'static`. Type parameters receive a `'static` bound and the impl is
//! gated on `Self: Default`, so generic leaves work whenever their
//! parameters allow it.

use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, parse_macro_input, parse_quote};

/// Implement `multidim_core::Nest` for a struct or enum.
///
/// ```
/// use multidim_core::{Initializer, build};
/// use multidim_derive::Nest;
///
/// #[derive(Clone, Debug, Default, PartialEq, Nest)]
/// struct Cell {
///     alive: bool,
/// }
///
/// let board: Vec<Vec<Cell>> =
///     build(Initializer::indexed(|c| Cell { alive: c[0] == c[1] }), &[3, 3]).unwrap();
/// assert!(board[1][1].alive);
/// assert!(!board[0][2].alive);
/// ```
#[proc_macro_derive(Nest)]
pub fn derive_nest(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    if let Data::Union(_) = &input.data {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(Nest)] supports only structs and enums",
        ));
    }
    if let Some(lt) = input.generics.lifetimes().next() {
        return Err(syn::Error::new(
            lt.lifetime.ident.span(),
            "#[derive(Nest)] requires a 'static type; lifetime parameters are not supported",
        ));
    }

    let ident = &input.ident;
    let (_, ty_generics, _) = input.generics.split_for_impl();
    let self_ty = quote! { #ident #ty_generics };

    let mut generics = input.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }
    generics
        .make_where_clause()
        .predicates
        .push(parse_quote!(#self_ty: ::core::default::Default));
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::multidim_core::Nest for #self_ty #where_clause {}
    })
}
