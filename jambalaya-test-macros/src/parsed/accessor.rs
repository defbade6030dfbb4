#[allow(unused_imports)]
use super::*;

use super::field::unraw;

/// Where a computed accessor shows up.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessorKind {
    /// Bean-style property: visible in both modes.
    Property,
    /// Declared method: visible only in scan-all mode.
    Method,
}

/// A getter declared on the container, e.g. `#[inspect(property(total, fallible))]`.
pub(crate) struct ComputedAccessor {
    pub kind: AccessorKind,
    method: Ident,
    name: String,
    fallible: bool,
}

impl ComputedAccessor {
    pub(crate) fn parse(meta: &ParseNestedMeta, kind: AccessorKind) -> Result<Self> {
        let mut method: Option<Ident> = None;
        let mut rename = None;
        let mut fallible = false;

        meta.parse_nested_meta(|item| {
            if item.path.is_ident("fallible") {
                fallible = true;
                Ok(())
            } else if item.path.is_ident("rename") {
                parse_rename(&item, &mut rename)
            } else if let Some(ident) = item.path.get_ident() {
                if method.is_some() {
                    return Err(item.error("expected a single method name"));
                }
                method = Some(ident.clone());
                Ok(())
            } else {
                Err(item.error("expected a method name"))
            }
        })?;

        let method = method.ok_or_else(|| meta.error("missing method name"))?;
        let name = rename.unwrap_or_else(|| unraw(&method));
        Ok(Self {
            kind,
            method,
            name,
            fallible,
        })
    }

    pub(crate) fn accessor_tokens(&self) -> TokenStream2 {
        let method = &self.method;
        let name = LitStr::new(&self.name, Span::call_site());
        let invoke = if self.fallible {
            quote! {
                self.#method()
                    .map(::jambalaya_test::Value::owned)
                    .map_err(::jambalaya_test::AccessorError::from_display)
            }
        } else {
            quote! {
                ::core::result::Result::Ok(::jambalaya_test::Value::owned(self.#method()))
            }
        };
        quote! {
            ::jambalaya_test::Accessor::method(#name, move || #invoke)
        }
    }
}
