#[allow(unused_imports)]
use super::*;

mod accessor;
mod container;
mod field;

pub(crate) use accessor::{AccessorKind, ComputedAccessor};
pub(crate) use container::ParsedInspect;
pub(crate) use field::ParsedField;

/// Parses `rename = "..."` into `target`, rejecting duplicates.
fn parse_rename(meta: &ParseNestedMeta, target: &mut Option<String>) -> Result<()> {
    if target.is_some() {
        return Err(meta.error("duplicate `rename`"));
    }
    let value: LitStr = meta.value()?.parse()?;
    let name = value.value();
    if name.trim().is_empty() {
        return Err(Error::new(value.span(), "`rename` must not be blank"));
    }
    *target = Some(name);
    Ok(())
}

fn is_inspect_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("inspect")
}
