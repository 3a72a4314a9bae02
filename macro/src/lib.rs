use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{parse_macro_input, spanned::Spanned, ItemFn};

/// Rejects signatures the generated `block_on` wrapper cannot host.
fn check_signature(input: &ItemFn, macro_name: &str) -> Option<TokenStream> {
    if input.sig.asyncness.is_none() {
        return Some(
            quote_spanned! { input.sig.fn_token.span()=>
                compile_error!("fn must be `async fn`");
            }
            .into(),
        );
    }

    if !input.sig.inputs.is_empty() {
        let message = format!("arguments to #[cursor_iter::{macro_name}] functions are not supported");
        return Some(
            quote_spanned! { input.sig.inputs.span()=>
                compile_error!(#message);
            }
            .into(),
        );
    }

    None
}

/// Runs an `async fn main` to completion on the `cursor_iter` runtime.
///
/// ```ignore
/// #[cursor_iter::main]
/// async fn main() {
///     let mut sequence = cursor_iter::Sequence::new(cursor);
///     let mut iter = sequence.iter().unwrap();
///     while let Some(chunk) = iter.next().await { /* ... */ }
/// }
/// ```
#[proc_macro_attribute]
pub fn attr_macro_main(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    if let Some(error) = check_signature(&input, "main") {
        return error;
    }

    if input.sig.ident != "main" {
        return quote_spanned! { input.sig.ident.span()=>
            compile_error!("only `async fn main` can be used for #[cursor_iter::main]");
        }
        .into();
    }

    let attrs = input.attrs;
    let output = input.sig.output;
    let block = input.block;
    quote! {
        pub fn main() #output {

            #(#attrs)*
            async fn __run() #output {
                #block
            }

            ::cursor_iter::runtime::block_on(async {
                __run().await
            })
        }
    }
    .into()
}

/// Turns an `async fn` into a `#[test]` driven by `cursor_iter::runtime::block_on`.
#[proc_macro_attribute]
pub fn attr_macro_test(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);

    if let Some(error) = check_signature(&input, "test") {
        return error;
    }

    let name = input.sig.ident;
    let attrs = input.attrs;
    let output = input.sig.output;
    let block = input.block;
    quote! {
        #[test]
        pub fn #name() #output {

            #(#attrs)*
            async fn __run() #output {
                #block
            }

            ::cursor_iter::runtime::block_on(async {
                __run().await
            })
        }
    }
    .into()
}
