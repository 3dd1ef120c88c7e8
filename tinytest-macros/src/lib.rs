//! Procedural macros for the tinytest harness
//!
//! This crate provides the `#[def_test]` attribute macro for marking test functions.
//! Tests are collected in a link-time registry and picked up by
//! `tinytest::Runner::instance()`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Expr, ExprLit, ItemFn, Lit, MetaNameValue, ReturnType, Token, ext::IdentExt,
    parse_macro_input, punctuated::Punctuated,
};

/// Marks a function as a unit test.
///
/// # Example
///
/// ```rust,ignore
/// use tinytest::{check_eq, def_test};
///
/// #[def_test]
/// fn test_addition() {
///     let a = 2 + 2;
///     check_eq!(4, a);
/// }
/// ```
///
/// The function must take no arguments and return `()`. A failed check does
/// not return early, so the whole body always runs.
///
/// # Ordering
/// Cases are collected in a link-time slice, so their run order is the
/// order the linker laid them out, which need not match source order. Only
/// cases added with explicit `Runner::add` calls run in a guaranteed order.
///
/// # Attributes
/// - `#[def_test]` - test in the default suite (`tinytest::suite_name()`)
/// - `#[def_test(suite = "name")]` - test in the named suite
#[proc_macro_attribute]
pub fn def_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr with Punctuated::<MetaNameValue, Token![,]>::parse_terminated);
    let input = parse_macro_input!(item as ItemFn);

    expand(args, input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(args: Punctuated<MetaNameValue, Token![,]>, input: ItemFn) -> syn::Result<TokenStream2> {
    let mut suite = None;
    for arg in args {
        if !arg.path.is_ident("suite") {
            return Err(syn::Error::new_spanned(
                &arg.path,
                "unknown def_test attribute, expected `suite`",
            ));
        }
        match &arg.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(name),
                ..
            }) => suite = Some(name.value()),
            other => {
                return Err(syn::Error::new_spanned(other, "expected a string literal"));
            }
        }
    }

    let sig = &input.sig;
    if sig.asyncness.is_some() {
        return Err(syn::Error::new_spanned(sig.fn_token, "test functions cannot be async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&sig.generics, "test functions cannot be generic"));
    }
    if !sig.inputs.is_empty() {
        return Err(syn::Error::new_spanned(&sig.inputs, "test functions take no arguments"));
    }
    if !matches!(sig.output, ReturnType::Default) {
        return Err(syn::Error::new_spanned(&sig.output, "test functions must return `()`"));
    }

    let fn_name = &sig.ident;
    let fn_name_str = fn_name.unraw().to_string();
    let fn_attrs = &input.attrs;
    let fn_vis = &input.vis;
    let fn_stmts = &input.block.stmts;

    let suite = match suite {
        Some(name) => quote!(#name),
        None => quote!(::tinytest::suite_name()),
    };

    let upper = fn_name_str.to_uppercase();
    let body_name = format_ident!("__TINYTEST_BODY_{}", upper);
    let case_name = format_ident!("__TINYTEST_CASE_{}", upper);
    let entry_name = format_ident!("__TINYTEST_ENTRY_{}", upper);

    // The suite and name consts are what `check_info!` picks up inside the body.
    Ok(quote! {
        #(#fn_attrs)*
        #fn_vis fn #fn_name() {
            #[allow(dead_code)]
            const __TINYTEST_SUITE: &str = #suite;
            #[allow(dead_code)]
            const __TINYTEST_NAME: &str = #fn_name_str;

            #(#fn_stmts)*
        }

        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        static #body_name: fn() = #fn_name;

        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        static #case_name: ::tinytest::TestCase =
            ::tinytest::TestCase::new(#fn_name_str, #suite, module_path!(), &#body_name);

        #[::tinytest::__private::linkme::distributed_slice(::tinytest::__private::TEST_REGISTRY)]
        #[linkme(crate = ::tinytest::__private::linkme)]
        #[doc(hidden)]
        #[allow(non_upper_case_globals)]
        static #entry_name: &::tinytest::TestCase = &#case_name;
    })
}
