//! Attribute macros for bizext.
//!
//! `#[extension(...)]` marks an `impl Extension<Capability> for Type` block
//! for distributed registration. The impl is kept as written, and a
//! `CollectedExtension` is submitted to `inventory`; calling
//! `ExtensionRegister::register_collected()` at startup installs a
//! `Type::default()` under every declared scenario.

use proc_macro::TokenStream;
use quote::quote;
use syn::{GenericArgument, ItemImpl, PathArguments, Type, parse_macro_input};

mod args;

/// Registers an extension implementation for collection at startup.
///
/// # Arguments
///
/// - `biz_id` / `use_case` / `scenario`: a string, or a list of strings
///   (`biz_id = ["tmall", "taobao"]`). Omitted levels use the defaults.
///   The implementation is registered under every combination.
/// - `order`: integer, lower runs first. Defaults to the lowest precedence.
///
/// The implementing type must implement `Default`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Default)]
/// struct SayA;
///
/// #[bizext::extension(biz_id = "test", use_case = "greet", order = 0)]
/// impl Extension<Say> for SayA {
///     fn exec(&self, ctx: &str) -> Result<String, BoxError> {
///         Ok(format!("A:{ctx}"))
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn extension(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as args::ExtensionArgs);
    let input = parse_macro_input!(item as ItemImpl);

    match expand_extension(&args, &input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_extension(
    args: &args::ExtensionArgs,
    input: &ItemImpl,
) -> syn::Result<proc_macro2::TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[extension] cannot collect generic implementations; register them explicitly",
        ));
    }

    let capability = capability_of(input)?;
    let self_ty = &input.self_ty;
    let biz_ids = &args.biz_ids;
    let use_cases = &args.use_cases;
    let scenarios = &args.scenarios;
    let order = args.order.unwrap_or(i32::MAX);

    Ok(quote! {
        #input

        ::bizext::inventory::submit! {
            ::bizext::CollectedExtension::new(
                <#capability as ::bizext::Capability>::ID,
                ::core::stringify!(#self_ty),
                &[#(#biz_ids),*],
                &[#(#use_cases),*],
                &[#(#scenarios),*],
                #order,
                ::bizext::install_default::<#capability, #self_ty>,
            )
        }
    })
}

/// Extracts `C` from `impl Extension<C> for T`.
fn capability_of(input: &ItemImpl) -> syn::Result<Type> {
    let Some((_, path, _)) = &input.trait_ else {
        return Err(syn::Error::new_spanned(
            &input.self_ty,
            "#[extension] must be placed on `impl Extension<Capability> for Type`",
        ));
    };

    let Some(last) = path.segments.last() else {
        return Err(syn::Error::new_spanned(path, "expected `Extension<Capability>`"));
    };
    if last.ident != "Extension" {
        return Err(syn::Error::new_spanned(
            &last.ident,
            "#[extension] only applies to `Extension<Capability>` impls",
        ));
    }

    match &last.arguments {
        PathArguments::AngleBracketed(generics) if generics.args.len() == 1 => {
            match generics.args.first() {
                Some(GenericArgument::Type(ty)) => Ok(ty.clone()),
                _ => Err(syn::Error::new_spanned(
                    generics,
                    "expected a capability type argument",
                )),
            }
        }
        other => Err(syn::Error::new_spanned(
            other,
            "expected exactly one capability type: `Extension<Capability>`",
        )),
    }
}
