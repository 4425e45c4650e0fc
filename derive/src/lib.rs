extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, GenericParam, Generics,
    Ident, Index, Member,
};

/// Field attributes parsed from `#[pynto(...)]` annotations
///
/// # Fields
///
/// * `skip` - The field is not encoded and is set to `Default::default()` on decode
/// * `default` - The field is set to `Default::default()` when the decoded tuple ends before it
#[derive(Debug, Clone, Default)]
struct FieldAttributes {
    skip: bool,
    default: bool,
}

/// Extract and parse `#[pynto(...)]` attribute values from field attributes
///
/// # Supported Attributes
///
/// * `#[pynto(skip)]` - Do not encode this field
/// * `#[pynto(default)]` - Allow this field to be missing from the end of the tuple
///
/// Multiple attributes can be combined: `#[pynto(skip, default)]`
fn get_field_attributes(attrs: &[Attribute]) -> syn::Result<FieldAttributes> {
    let mut parsed = FieldAttributes::default();
    for attr in attrs {
        if !attr.path().is_ident("pynto") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else if meta.path.is_ident("default") {
                parsed.default = true;
                Ok(())
            } else {
                Err(meta.error("unknown pynto attribute; expected `skip` or `default`"))
            }
        })?;
    }
    Ok(parsed)
}

/// A struct field together with the member expression used to access it.
struct FieldInfo {
    member: Member,
    ty: syn::Type,
    attrs: FieldAttributes,
}

/// Collect the fields of a struct in declaration order.
///
/// Enums and unions are rejected: only structs map onto a tuple.
fn collect_fields(input: &DeriveInput) -> syn::Result<(&Fields, Vec<FieldInfo>)> {
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        Data::Enum(e) => {
            return Err(syn::Error::new_spanned(
                e.enum_token,
                "pynto derives support structs only",
            ))
        }
        Data::Union(u) => {
            return Err(syn::Error::new_spanned(
                u.union_token,
                "pynto derives support structs only",
            ))
        }
    };

    let mut infos = Vec::new();
    match fields {
        Fields::Named(named) => {
            for f in &named.named {
                let ident = f.ident.clone().ok_or_else(|| {
                    syn::Error::new_spanned(f, "named field without an identifier")
                })?;
                infos.push(FieldInfo {
                    member: Member::Named(ident),
                    ty: f.ty.clone(),
                    attrs: get_field_attributes(&f.attrs)?,
                });
            }
        }
        Fields::Unnamed(unnamed) => {
            for (i, f) in unnamed.unnamed.iter().enumerate() {
                infos.push(FieldInfo {
                    member: Member::Unnamed(Index::from(i)),
                    ty: f.ty.clone(),
                    attrs: get_field_attributes(&f.attrs)?,
                });
            }
        }
        Fields::Unit => {}
    }
    Ok((fields, infos))
}

/// Add `bound` to every type parameter of the struct.
fn add_trait_bounds(mut generics: Generics, bound: syn::TypeParamBound) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(type_param) = param {
            type_param.bounds.push(bound.clone());
        }
    }
    generics
}

/// Build the `Self { .. }`, `Self(..)` or `Self` expression from per-field initializers.
fn construct(fields: &Fields, inits: &[TokenStream2]) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().map(|f| &f.ident);
            quote! { Self { #( #idents: #inits, )* } }
        }
        Fields::Unnamed(_) => quote! { Self( #( #inits, )* ) },
        Fields::Unit => quote! { Self },
    }
}

/// Derive macro for implementing the `Encoder` trait
///
/// The struct is written as a tuple of its fields in declaration order.
/// Fields marked `#[pynto(skip)]` are left out.
///
/// # Examples
///
/// ```rust,ignore
/// #[derive(Encode)]
/// struct MyStruct {
///     id: u32,
///     #[pynto(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Encode, attributes(pynto))]
pub fn derive_encode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let (_, fields) = match collect_fields(&input) {
        Ok(collected) => collected,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = &input.ident;
    let generics = add_trait_bounds(input.generics.clone(), parse_quote!(::pynto::Encoder));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let members: Vec<&Member> = fields
        .iter()
        .filter(|f| !f.attrs.skip)
        .map(|f| &f.member)
        .collect();
    let count = members.len();

    quote! {
        impl #impl_generics ::pynto::Encoder for #name #ty_generics #where_clause {
            fn encode(&self, writer: &mut ::pynto::bytes::BytesMut) -> ::pynto::Result<()> {
                ::pynto::core::write_array_header(#count, writer)?;
                #(
                    ::pynto::Encoder::encode(&self.#members, writer)?;
                )*
                ::core::result::Result::Ok(())
            }
        }
    }
    .into()
}

/// Derive macro for implementing the `Decoder` trait
///
/// Reads a tuple and assigns its elements to the non-skipped fields in declaration
/// order. A tuple with more elements than encoded fields, or with fewer elements than
/// the last field not marked `#[pynto(default)]`, is rejected with
/// `StructDecodeError::FieldCountMismatch`.
///
/// `#[pynto(default)]` fields must form a trailing run; a required field after one
/// is a compile error.
#[proc_macro_derive(Decode, attributes(pynto))]
pub fn derive_decode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let (struct_fields, fields) = match collect_fields(&input) {
        Ok(collected) => collected,
        Err(e) => return e.to_compile_error().into(),
    };

    let name = &input.ident;
    let name_str = name.to_string();
    let generics = add_trait_bounds(input.generics.clone(), parse_quote!(::pynto::Decoder));
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let len_ident = Ident::new("__pynto_len", Span::call_site());
    let mut position = 0usize;
    let mut required = 0usize;
    let mut first_default: Option<&Member> = None;
    let mut inits = Vec::with_capacity(fields.len());
    for field in &fields {
        let ty = &field.ty;
        if field.attrs.skip {
            inits.push(quote! { ::core::default::Default::default() });
            continue;
        }
        let decode = quote! { <#ty as ::pynto::Decoder>::decode(reader)? };
        if field.attrs.default {
            first_default.get_or_insert(&field.member);
            inits.push(quote! {
                if #len_ident > #position {
                    #decode
                } else {
                    ::core::default::Default::default()
                }
            });
        } else {
            // Defaults only apply to a trailing run of fields.
            if let Some(member) = first_default {
                return syn::Error::new_spanned(
                    member,
                    "`#[pynto(default)]` fields must come after every required field",
                )
                .to_compile_error()
                .into();
            }
            inits.push(decode);
            required = position + 1;
        }
        position += 1;
    }
    let count = position;
    let body = construct(struct_fields, &inits);
    let too_short = if required > 0 {
        quote! { #len_ident < #required || }
    } else {
        quote! {}
    };

    quote! {
        impl #impl_generics ::pynto::Decoder for #name #ty_generics #where_clause {
            fn decode<__B: ::pynto::bytes::Buf>(reader: &mut __B) -> ::pynto::Result<Self> {
                let tag = ::pynto::core::read_tag(reader)?;
                let #len_ident = ::pynto::core::read_array_len(tag, reader)?;
                if #too_short #len_ident > #count {
                    return ::core::result::Result::Err(::pynto::StructDecodeError::FieldCountMismatch {
                        struct_name: #name_str,
                        expected: #count,
                        actual: #len_ident,
                    }
                    .into());
                }
                ::core::result::Result::Ok(#body)
            }
        }
    }
    .into()
}
