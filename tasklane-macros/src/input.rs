use crate::utils::{screaming_case, snake_case};

use proc_macro2::Span;
use std::collections::HashSet;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Error, Fields, Ident, ItemEnum, Result, Type, Visibility};

/// A parsed `events! { ... }` invocation.
pub(crate) struct EventsInput {
    pub(crate) attrs: Vec<Attribute>,
    pub(crate) vis: Visibility,
    pub(crate) ident: Ident,
    pub(crate) variants: Vec<EventVariant>,
}

/// One user-declared event type.
pub(crate) struct EventVariant {
    pub(crate) attrs: Vec<Attribute>,
    pub(crate) ident: Ident,
    /// Parameter types; `None` for a unit variant.
    pub(crate) fields: Option<Vec<Type>>,
    /// `on_<snake>` handler method name.
    pub(crate) method: Ident,
    /// `<SCREAMING>_TAG` constant name.
    pub(crate) tag_const: Ident,
    /// Tag value, counting from 1.
    pub(crate) tag: u32,
}

impl Parse for EventsInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let item: ItemEnum = input.parse()?;

        if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
            return Err(Error::new_spanned(
                &item.generics,
                "events! does not support generic event sets",
            ));
        }

        let mut seen = HashSet::new();
        let mut variants = Vec::with_capacity(item.variants.len());

        for (index, variant) in item.variants.into_iter().enumerate() {
            if let Some((_, discriminant)) = &variant.discriminant {
                return Err(Error::new_spanned(
                    discriminant,
                    "event tags are assigned in declaration order; remove the discriminant",
                ));
            }

            let fields = match variant.fields {
                Fields::Unit => None,
                Fields::Unnamed(unnamed) => {
                    Some(unnamed.unnamed.into_iter().map(|f| f.ty).collect())
                }
                Fields::Named(named) => {
                    return Err(Error::new_spanned(
                        named,
                        "event parameters must be a tuple, e.g. `Ping(i32, String)`",
                    ));
                }
            };

            let name = variant.ident.to_string();
            let snake = snake_case(&name);

            if snake == "stop" {
                return Err(Error::new_spanned(
                    &variant.ident,
                    "the `Stop` event is reserved and added automatically",
                ));
            }

            if !seen.insert(snake.clone()) {
                return Err(Error::new_spanned(
                    &variant.ident,
                    format!("another event already maps to `on_{snake}`"),
                ));
            }

            let tag = u32::try_from(index + 1)
                .map_err(|_| Error::new_spanned(&variant.ident, "too many events"))?;

            variants.push(EventVariant {
                attrs: variant.attrs,
                method: Ident::new(&format!("on_{snake}"), Span::call_site()),
                tag_const: Ident::new(
                    &format!("{}_TAG", screaming_case(&name)),
                    Span::call_site(),
                ),
                ident: variant.ident,
                fields,
                tag,
            });
        }

        Ok(Self {
            attrs: item.attrs,
            vis: item.vis,
            ident: item.ident,
            variants,
        })
    }
}
