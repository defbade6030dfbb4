#[allow(unused_imports)]
use super::*;

pub(crate) struct ParsedField {
    ident: Ident,
    name: String,
    skip: bool,
}

impl ParsedField {
    pub(crate) fn from_field(field: &syn::Field) -> Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "Inspect requires named fields"))?;
        let mut rename = None;
        let mut skip = false;

        for attr in field.attrs.iter().filter(|attr| is_inspect_attr(attr)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    parse_rename(&meta, &mut rename)
                } else {
                    Err(meta.error("unknown inspect field attribute, expected `skip` or `rename`"))
                }
            })?;
        }

        let name = rename.unwrap_or_else(|| unraw(&ident));
        Ok(Self { ident, name, skip })
    }

    pub(crate) fn is_skipped(&self) -> bool {
        self.skip
    }

    pub(crate) fn accessor_tokens(&self) -> TokenStream2 {
        let ident = &self.ident;
        let name = LitStr::new(&self.name, Span::call_site());
        quote! {
            ::jambalaya_test::Accessor::field(#name, &self.#ident)
        }
    }
}

/// `r#type` is exposed as `type`.
pub(crate) fn unraw(ident: &Ident) -> String {
    let name = ident.to_string();
    match name.strip_prefix("r#") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}
