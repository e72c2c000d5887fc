//! Contains a derive macro for [`TryFromRow`] which converts from a postgres Row
//!
//! [`TryFromRow`]: https://docs.rs/pg_schema_dump_core/0.1.0/pg_schema_dump_core/trait.TryFromRow.html

extern crate proc_macro;

use proc_macro2::{
	TokenStream,
};

use quote::quote;

use syn::{
	parse_macro_input,
	spanned::Spanned,
	DeriveInput,
};

#[proc_macro_derive(TryFromRow)]
/// A derive macro for [`TryFromRow`] which converts from a postgres Row
///
/// Field `i` of the struct is read from column `i` of the row, so the field order has to match the select list of the query. Only structs with named fields are supported
///
/// [`TryFromRow`]: https://docs.rs/pg_schema_dump_core/0.1.0/pg_schema_dump_core/trait.TryFromRow.html
pub fn try_from_postgres_row(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	// get the name of the type we want to implement the trait for
	let name = &input.ident;
	let generics = &input.generics;
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	let fields = match &input.data {
		syn::Data::Struct(syn::DataStruct { fields: syn::Fields::Named(named), .. }) => &named.named,
		_ => {
			return syn::Error::new(input.span(), "TryFromRow needs a struct with named fields")
				.to_compile_error()
				.into();
		},
	};

	let from_row_code : TokenStream = fields
		.iter()
		.filter_map(|v| v.ident.as_ref())
		.enumerate()
		.map(|(i,v)| {
			quote!{ #v : row.try_get(#i)?, }
		}).collect();

	let expanded = quote! {
		impl #impl_generics TryFromRow for #name #ty_generics #where_clause {
			fn from_row(row: &Row) -> ::core::result::Result<Self, SqlError> {
				Ok(Self { #from_row_code })
			}
		}
	};

	expanded.into()
}
