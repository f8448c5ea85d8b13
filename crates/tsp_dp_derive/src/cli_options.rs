use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path, parse_macro_input, spanned::Spanned};

use crate::utils;

/// Parsed `#[cli(...)]` settings for one field.
#[derive(Default)]
struct CliField {
    long: Option<String>,
    parse_with: Option<Path>,
    value: Option<String>,
    flag: bool,
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::new();
    let mut flag_names = Vec::new();
    let mut usage_rows: Vec<(String, String)> = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut cli = CliField::default();
        for attr in &field.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    cli.long = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    cli.parse_with = Some(syn::parse_str(&lit.value())?);
                    return Ok(());
                }
                if meta.path.is_ident("value") {
                    let lit: LitStr = meta.value()?.parse()?;
                    cli.value = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("flag") {
                    cli.flag = true;
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/parse_with/value/flag"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        let Some(long_name) = cli.long else {
            continue;
        };
        let doc = utils::doc_summary(&field.attrs).unwrap_or_default();

        if cli.flag {
            if !utils::is_bool(&field.ty) {
                return syn::Error::new(field.ty.span(), "cli flags must be `bool` fields")
                    .to_compile_error()
                    .into();
            }

            let negated = format!("no-{long_name}");
            let long_lit = LitStr::new(&long_name, Span::call_site());
            let negated_lit = LitStr::new(&negated, Span::call_site());

            arms.push(quote! {
                #long_lit => {
                    self.#field_ident = match value {
                        Some(raw) => Self::parse_cli_flag(name, &raw)?,
                        None => true,
                    };
                    Ok(true)
                }
            });
            arms.push(quote! {
                #negated_lit => {
                    if value.is_some() {
                        return Err(crate::Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    self.#field_ident = false;
                    Ok(true)
                }
            });

            usage_rows.push((format!("--{long_name}[=<bool>]"), doc));
            usage_rows.push((format!("--{negated}"), String::new()));
            flag_names.push(long_lit);
            flag_names.push(negated_lit);
            continue;
        }

        let placeholder = cli
            .value
            .unwrap_or_else(|| utils::value_placeholder(&field.ty));
        usage_rows.push((format!("--{long_name} {placeholder}"), doc));

        let long_lit = LitStr::new(&long_name, Span::call_site());
        let parse_expr = utils::build_cli_parse_expr(&field.ty, cli.parse_with.as_ref());
        arms.push(quote! {
            #long_lit => {
                let raw = value.ok_or_else(|| {
                    crate::Error::invalid_input(format!("Missing value for --{name}"))
                })?;
                self.#field_ident = #parse_expr;
                Ok(true)
            }
        });
    }

    let width = usage_rows
        .iter()
        .map(|(left, _)| left.len())
        .max()
        .unwrap_or(0);
    let usage = usage_rows
        .iter()
        .map(|(left, doc)| format!("  {left:<width$}  {doc}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    let usage_lit = LitStr::new(&usage, Span::call_site());

    let expanded = quote! {
        impl #struct_ident {
            const CLI_FLAGS: &'static [&'static str] = &[#(#flag_names),*];

            /// Generated option table, one `--name <value>  description` row per option.
            pub fn options_usage() -> &'static str {
                #usage_lit
            }

            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }
                if Self::CLI_FLAGS.contains(&raw_name) {
                    return (raw_name.to_string(), None);
                }

                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            #[allow(dead_code)]
            fn parse_cli_flag(name: &str, raw: &str) -> crate::Result<bool> {
                match raw.to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid boolean for --{name}: {raw} (expected true/false)"
                    ))),
                }
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }
        }
    };

    TokenStream::from(expanded)
}
