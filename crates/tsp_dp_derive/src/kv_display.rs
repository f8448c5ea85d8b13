use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

/// How a field value is rendered after its key.
enum KvFormat {
    Display,
    Len,
    Opt,
}

impl KvFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "display" => Some(Self::Display),
            "len" => Some(Self::Len),
            "opt" => Some(Self::Opt),
            _ => None,
        }
    }
}

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let mut keys: Vec<String> = Vec::new();
    let mut vals = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let mut key = field_ident.to_string();
        let mut format = KvFormat::Display;

        for attr in &field.attrs {
            if !attr.path().is_ident("kv") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                let lit: LitStr = meta.value()?.parse()?;
                if meta.path.is_ident("name") {
                    key = lit.value();
                    return Ok(());
                }
                if meta.path.is_ident("fmt") {
                    format = KvFormat::parse(&lit.value()).ok_or_else(|| {
                        meta.error(format!("unsupported kv fmt mode: {}", lit.value()))
                    })?;
                    return Ok(());
                }
                Err(meta.error("unsupported kv attribute; expected name/fmt"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        keys.push(key);
        vals.push(match format {
            KvFormat::Display => quote! { &self.#field_ident },
            KvFormat::Len => quote! { &self.#field_ident.len() },
            KvFormat::Opt => quote! {
                &self
                    .#field_ident
                    .as_ref()
                    .map_or_else(|| String::from("-"), |v| v.to_string())
            },
        });
    }

    let longest = keys.iter().map(String::len).max().unwrap_or(0);
    let lines: Vec<String> = keys
        .iter()
        .map(|key| format!("\t{key:<longest$} = {{}}"))
        .collect();
    let format_lit = LitStr::new(&format!("\n{}", lines.join("\n")), Span::call_site());

    let expanded = quote! {
        impl std::fmt::Display for #struct_ident {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, #format_lit, #(#vals),*)
            }
        }
    };

    TokenStream::from(expanded)
}
