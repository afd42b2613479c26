//! Procedural macros for `tasklane`.
//!
//! Use them through the re-exports in the `tasklane` crate.

mod input;
mod utils;

use input::{EventVariant, EventsInput};

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::parse_macro_input;

/// Declares an event set.
///
/// ```rust,ignore
/// tasklane::events! {
///     #[derive(Debug)]
///     pub enum AppEvent {
///         Ping(i32, i32),
///         Tick,
///     }
/// }
/// ```
///
/// expands to:
/// - the enum, with a reserved `Stop` variant prepended,
/// - one `<NAME>_TAG` constant per variant (`STOP_TAG` is tag 0, the
///   declared variants follow in order),
/// - an `impl tasklane::Event`,
/// - a handler trait `<Enum>Handler` with one `on_<name>` method per
///   variant, receiving the parameters by reference and returning `false`
///   by default,
/// - `<Enum>::dispatch(&self, &handler)`, which calls the matching
///   handler method.
#[proc_macro]
pub fn events(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as EventsInput);

    expand(&input).into()
}

fn expand(input: &EventsInput) -> TokenStream2 {
    let EventsInput {
        attrs,
        vis,
        ident,
        variants,
    } = input;

    let handler = format_ident!("{}Handler", ident);

    let decls = variants.iter().map(|v| {
        let attrs = &v.attrs;
        let name = &v.ident;
        match &v.fields {
            None => quote! { #(#attrs)* #name },
            Some(types) => quote! { #(#attrs)* #name(#(#types),*) },
        }
    });

    let tag_consts = variants.iter().map(|v| {
        let tag_const = &v.tag_const;
        let tag = v.tag;
        let doc = format!("Tag of [`{}::{}`].", ident, v.ident);
        quote! {
            #[doc = #doc]
            #vis const #tag_const: ::tasklane::Tag = ::tasklane::Tag::new(#tag);
        }
    });

    let tag_arms = variants.iter().map(|v| {
        let pattern = wildcard_pattern(ident, v);
        let tag_const = &v.tag_const;
        quote! { #pattern => Self::#tag_const, }
    });

    let name_arms = variants.iter().map(|v| {
        let pattern = wildcard_pattern(ident, v);
        let name = v.ident.to_string();
        quote! { #pattern => #name, }
    });

    let dispatch_arms = variants.iter().map(|v| {
        let name = &v.ident;
        let method = &v.method;
        match &v.fields {
            None => quote! { #ident::#name => handler.#method(), },
            Some(types) => {
                let bindings: Vec<_> = (0..types.len())
                    .map(|i| format_ident!("__arg{}", i))
                    .collect();
                quote! { #ident::#name(#(#bindings),*) => handler.#method(#(#bindings),*), }
            }
        }
    });

    let handler_methods = variants.iter().map(|v| {
        let method = &v.method;
        let doc = format!(
            "Called for [`{}::{}`]. Returns `true` if handled.",
            ident, v.ident
        );
        let params = v.fields.iter().flatten().enumerate().map(|(i, ty)| {
            let arg = format_ident!("_arg{}", i);
            quote! { #arg: &#ty }
        });
        quote! {
            #[doc = #doc]
            #[allow(clippy::ptr_arg)]
            fn #method(&self, #(#params),*) -> bool {
                false
            }
        }
    });

    let handler_doc = format!(
        "Typed handler for [`{ident}`] events.\n\n\
         Override the methods for the events you care about and forward \
         from `Observer::on_event` with [`{ident}::dispatch`]."
    );

    quote! {
        #(#attrs)*
        #vis enum #ident {
            /// Reserved stop event.
            Stop,
            #(#decls,)*
        }

        impl #ident {
            /// Tag of [`Self::Stop`].
            #vis const STOP_TAG: ::tasklane::Tag = ::tasklane::Tag::STOP;
            #(#tag_consts)*

            /// Calls the `handler` method matching this event and returns
            /// its result.
            #vis fn dispatch<H: #handler + ?Sized>(&self, handler: &H) -> bool {
                match self {
                    #ident::Stop => handler.on_stop(),
                    #(#dispatch_arms)*
                }
            }
        }

        impl ::tasklane::Event for #ident {
            fn tag(&self) -> ::tasklane::Tag {
                match self {
                    #ident::Stop => Self::STOP_TAG,
                    #(#tag_arms)*
                }
            }

            fn name(&self) -> &'static str {
                match self {
                    #ident::Stop => "Stop",
                    #(#name_arms)*
                }
            }

            fn stop() -> Self {
                #ident::Stop
            }
        }

        #[doc = #handler_doc]
        #vis trait #handler {
            /// Called for the reserved stop event. Returns `true` if handled.
            fn on_stop(&self) -> bool {
                false
            }

            #(#handler_methods)*
        }
    }
}

/// `Enum::Variant` or `Enum::Variant(..)`.
fn wildcard_pattern(ident: &syn::Ident, variant: &EventVariant) -> TokenStream2 {
    let name = &variant.ident;
    match variant.fields {
        None => quote! { #ident::#name },
        Some(_) => quote! { #ident::#name(..) },
    }
}
