use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, LitStr, ReturnType, parse_macro_input};

/// Wraps a function body so its wall time is logged as `<label>: elapsed_s=<secs>`.
/// The caller crate must depend on `log`.
pub fn timer_inner(attr: TokenStream, item: TokenStream) -> TokenStream {
    let label = parse_macro_input!(attr as LitStr);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(item as ItemFn);

    if sig.asyncness.is_some() {
        return syn::Error::new_spanned(&sig, "timer does not support async functions")
            .to_compile_error()
            .into();
    }

    let output = match &sig.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    let expanded = quote! {
        #(#attrs)*
        #vis #sig {
            let timer_start = std::time::Instant::now();
            let timer_result = (move || -> #output #block)();
            log::debug!(
                "{}: elapsed_s={:.3}",
                #label,
                timer_start.elapsed().as_secs_f64()
            );
            timer_result
        }
    };

    TokenStream::from(expanded)
}
