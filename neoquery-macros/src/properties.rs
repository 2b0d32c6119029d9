use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, ExprLit, Fields, Lit};

fn get_label(ast: &DeriveInput) -> Option<String> {
    let mut label = None;
    for attr in &ast.attrs {
        if attr.path().is_ident("neoquery") {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("label") {
                    let value = meta.value()?;
                    let expr: Expr = value.parse()?;
                    if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = expr {
                        label = Some(s.value());
                    }
                }
                Ok(())
            });
        }
    }
    label
}

struct FieldInfo {
    ident: syn::Ident,
    prop_key: String,
    skip: bool,
}

fn parse_field(f: &syn::Field) -> Option<FieldInfo> {
    let ident = f.ident.clone()?;
    let mut prop_key = ident.to_string();
    let mut skip = false;

    for attr in &f.attrs {
        if attr.path().is_ident("neoquery") {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                } else if meta.path.is_ident("prop") {
                    let value = meta.value()?;
                    let expr: Expr = value.parse()?;
                    if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = expr {
                        prop_key = s.value();
                    }
                }
                Ok(())
            });
        }
    }

    Some(FieldInfo { ident, prop_key, skip })
}

pub fn expand(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = match &ast.data {
        Data::Struct(s) => match &s.fields {
            Fields::Named(named) => named.named.iter().filter_map(parse_field).collect::<Vec<_>>(),
            _ => {
                return syn::Error::new_spanned(&ast, "Properties only supports structs with named fields")
                    .to_compile_error()
                    .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&ast, "Properties only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let pushes = fields.iter().filter(|f| !f.skip).map(|f| {
        let ident = &f.ident;
        let key = &f.prop_key;
        quote! {
            props.push((#key.to_string(), neoquery_core::Arg::from(self.#ident)));
        }
    });

    let label = match get_label(&ast) {
        Some(l) => quote! { ::std::option::Option::Some(#l) },
        None => quote! { ::std::option::Option::None },
    };

    let expanded = quote! {
        impl #impl_generics neoquery_core::traits::Properties for #name #ty_generics #where_clause {
            const LABEL: ::std::option::Option<&'static str> = #label;

            fn into_properties(self) -> ::std::vec::Vec<(::std::string::String, neoquery_core::Arg)> {
                let mut props = ::std::vec::Vec::new();
                #(#pushes)*
                props
            }
        }

        impl #impl_generics ::std::convert::From<#name #ty_generics> for neoquery_core::Arg #where_clause {
            fn from(value: #name #ty_generics) -> Self {
                neoquery_core::traits::Properties::into_arg(value)
            }
        }
    };

    expanded.into()
}
