//! Name resolution for placeholders and conditional keys.
//!
//! A name is looked up in the current item first (the loop item, or the first
//! order item outside a loop) and then in the order-level variables. Within an
//! item the lookup order is:
//!
//! 1. `dim.<key>` and `specificationValues.<key>` read the item's spec values,
//!    with everything after the prefix taken verbatim as the key
//! 2. a direct field of the item
//! 3. the other names of the same field (see [`ITEM_ALIASES`])
//! 4. the item's spec values under the plain name
//! 5. a nested path for dotted names
//!
//! Null values are skipped; an empty string is a match.

use crate::context::{TemplateContext, TemplateValue};
use crate::parser::ITEMS_KEY;

/// Item field names that refer to the same value.
pub const ITEM_ALIASES: &[&[&str]] = &[
    &["optionName", "name", "option"],
    &["optionTypeName", "optionType", "typeName", "type"],
    &["id", "itemId"],
];

/// Item fields holding the spec value map.
pub const SPEC_MAPS: &[&str] = &["dim", "specificationValues"];

/// Where a name is being resolved.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    /// Outside any loop.
    Order,
    /// Inside `{{#items}}`, at the 0-based `index`.
    Item {
        item: &'a TemplateValue,
        index: usize,
    },
}

impl<'a> Scope<'a> {
    /// 1-based loop position, if inside a loop.
    pub fn position(&self) -> Option<usize> {
        match self {
            Scope::Order => None,
            Scope::Item { index, .. } => Some(index + 1),
        }
    }
}

/// Resolve `name` in `scope` against `ctx`.
pub fn resolve<'a>(
    name: &str,
    scope: Scope<'a>,
    ctx: &'a TemplateContext,
) -> Option<&'a TemplateValue> {
    let item = match scope {
        Scope::Item { item, .. } => Some(item),
        Scope::Order => ctx.list(ITEMS_KEY).and_then(<[_]>::first),
    };

    item.and_then(|item| resolve_in_item(name, item))
        .or_else(|| resolve_in_order(name, ctx))
}

/// Resolve `name` within a single item.
pub fn resolve_in_item<'a>(name: &str, item: &'a TemplateValue) -> Option<&'a TemplateValue> {
    for map in SPEC_MAPS {
        if let Some(key) = name.strip_prefix(*map).and_then(|rest| rest.strip_prefix('.')) {
            return spec_value(item, key);
        }
    }

    if let Some(value) = defined(item.get(name)) {
        return Some(value);
    }

    let aliased = ITEM_ALIASES
        .iter()
        .find(|group| group.iter().any(|alias| *alias == name))
        .and_then(|group| group.iter().find_map(|alias| defined(item.get(alias))));
    if aliased.is_some() {
        return aliased;
    }

    spec_value(item, name).or_else(|| nested(item, name))
}

fn resolve_in_order<'a>(name: &str, ctx: &'a TemplateContext) -> Option<&'a TemplateValue> {
    defined(ctx.get(name)).or_else(|| {
        let path: Vec<&str> = name.split('.').collect();
        if path.len() > 1 {
            defined(ctx.get_path(&path))
        } else {
            None
        }
    })
}

fn spec_value<'a>(item: &'a TemplateValue, key: &str) -> Option<&'a TemplateValue> {
    SPEC_MAPS
        .iter()
        .find_map(|map| defined(item.get(map).and_then(|m| m.get(key))))
}

fn nested<'a>(item: &'a TemplateValue, name: &str) -> Option<&'a TemplateValue> {
    if !name.contains('.') {
        return None;
    }
    let path: Vec<&str> = name.split('.').collect();
    defined(item.get_path(&path))
}

fn defined(value: Option<&TemplateValue>) -> Option<&TemplateValue> {
    value.filter(|v| !matches!(v, TemplateValue::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item() -> TemplateValue {
        TemplateValue::map([
            ("id", TemplateValue::from("item-1")),
            ("name", TemplateValue::from("Steel Plate")),
            ("optionTypeName", TemplateValue::Null),
            ("type", TemplateValue::from("Material")),
            (
                "dim",
                TemplateValue::map([
                    ("width", TemplateValue::from("10")),
                    ("size (mm).x", TemplateValue::from("4")),
                ]),
            ),
        ])
    }

    fn text(value: Option<&TemplateValue>) -> Option<String> {
        value.map(TemplateValue::render)
    }

    #[test]
    fn test_aliases() {
        let item = item();
        assert_eq!(text(resolve_in_item("optionName", &item)), Some("Steel Plate".into()));
        assert_eq!(text(resolve_in_item("optionTypeName", &item)), Some("Material".into()));
        assert_eq!(text(resolve_in_item("itemId", &item)), Some("item-1".into()));
    }

    #[test]
    fn test_spec_values() {
        let item = item();
        assert_eq!(text(resolve_in_item("width", &item)), Some("10".into()));
        assert_eq!(text(resolve_in_item("dim.width", &item)), Some("10".into()));
        assert_eq!(
            text(resolve_in_item("dim.size (mm).x", &item)),
            Some("4".into())
        );
        assert_eq!(resolve_in_item("dim.depth", &item), None);
    }

    #[test]
    fn test_first_item_then_order() {
        let mut ctx = TemplateContext::new();
        ctx.insert("items", TemplateValue::List(vec![item()]));
        ctx.insert("orderId", TemplateValue::from("SO-1"));
        ctx.insert("width", TemplateValue::from("ignored"));
        ctx.insert(
            "customer",
            TemplateValue::map([("name", TemplateValue::from("ACME"))]),
        );

        assert_eq!(text(resolve("width", Scope::Order, &ctx)), Some("10".into()));
        assert_eq!(text(resolve("orderId", Scope::Order, &ctx)), Some("SO-1".into()));
        assert_eq!(
            text(resolve("customer.name", Scope::Order, &ctx)),
            Some("ACME".into())
        );
        assert_eq!(resolve("missing", Scope::Order, &ctx), None);
    }

    #[test]
    fn test_loop_scope_does_not_see_siblings() {
        let other = TemplateValue::map([("name", TemplateValue::from("Other"))]);
        let mut ctx = TemplateContext::new();
        ctx.insert("items", TemplateValue::List(vec![item(), other.clone()]));

        let scope = Scope::Item {
            item: &other,
            index: 1,
        };
        assert_eq!(scope.position(), Some(2));
        assert_eq!(resolve("width", scope, &ctx), None);
    }
}
