#![forbid(unsafe_code)]

//! Menu data: items, their source, and the data item they act on.

use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde_json::{Map, Value};

/// Callback run when a menu item is selected.
pub type MenuAction = Rc<dyn Fn(&DataItem)>;

/// Callback producing the menu for a data item.
pub type MenuResolver = Rc<dyn Fn(&DataItem) -> Vec<MenuItem>>;

/// The record a menu acts on.
///
/// Opaque to the menu itself: it is only handed to resolvers and actions.
#[derive(Debug, Clone, PartialEq)]
pub enum DataItem {
    /// A structured record.
    Object(Map<String, Value>),
    /// A bare string identifier.
    Text(String),
}

impl Default for DataItem {
    fn default() -> Self {
        Self::Object(Map::new())
    }
}

impl DataItem {
    /// Build a data item from any serializable value.
    ///
    /// Objects and strings map directly; `null` is the empty object and any
    /// other JSON value is kept as its text.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(match serde_json::to_value(value)? {
            Value::Object(map) => Self::Object(map),
            Value::String(text) => Self::Text(text),
            Value::Null => Self::default(),
            other => Self::Text(other.to_string()),
        })
    }

    /// Whether there is nothing to act on (empty object or empty string).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Object(map) => map.is_empty(),
            Self::Text(text) => text.is_empty(),
        }
    }

    /// Field of an object item.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Object(map) => map.get(key),
            Self::Text(_) => None,
        }
    }

    /// String field of an object item, or the text of a text item.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        match self {
            Self::Object(map) => map.get(key).and_then(Value::as_str),
            Self::Text(text) => Some(text),
        }
    }
}

impl From<&str> for DataItem {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for DataItem {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Map<String, Value>> for DataItem {
    fn from(map: Map<String, Value>) -> Self {
        Self::Object(map)
    }
}

/// One action in a menu.
#[derive(Clone)]
pub struct MenuItem {
    /// Display label; unique within one menu.
    pub label: String,
    /// Glyph drawn in the icon gutter.
    pub icon: Option<char>,
    /// Hidden items are resolved but never drawn.
    pub hidden: bool,
    action: MenuAction,
}

impl MenuItem {
    /// Create a visible item without an icon.
    pub fn new(label: impl Into<String>, action: impl Fn(&DataItem) + 'static) -> Self {
        Self {
            label: label.into(),
            icon: None,
            hidden: false,
            action: Rc::new(action),
        }
    }

    /// Set the icon glyph.
    #[must_use]
    pub fn with_icon(mut self, icon: char) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set the hidden flag.
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Run the item's action.
    pub fn invoke(&self, data_item: &DataItem) {
        (self.action)(data_item);
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("hidden", &self.hidden)
            .finish_non_exhaustive()
    }
}

/// Where a menu's items come from.
#[derive(Clone)]
pub enum MenuSource {
    /// A fixed list.
    Static(Vec<MenuItem>),
    /// Computed from the data item.
    Resolver(MenuResolver),
}

impl MenuSource {
    /// Wrap a resolver function.
    pub fn resolver(resolve: impl Fn(&DataItem) -> Vec<MenuItem> + 'static) -> Self {
        Self::Resolver(Rc::new(resolve))
    }

    /// Items for a data item.
    pub fn resolve(&self, data_item: &DataItem) -> Vec<MenuItem> {
        match self {
            Self::Static(items) => items.clone(),
            Self::Resolver(resolve) => resolve(data_item),
        }
    }

    /// Items available before any data item is known.
    pub fn initial_items(&self) -> Vec<MenuItem> {
        match self {
            Self::Static(items) => items.clone(),
            Self::Resolver(_) => Vec::new(),
        }
    }
}

impl Default for MenuSource {
    fn default() -> Self {
        Self::Static(Vec::new())
    }
}

impl From<Vec<MenuItem>> for MenuSource {
    fn from(items: Vec<MenuItem>) -> Self {
        Self::Static(items)
    }
}

impl fmt::Debug for MenuSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(items) => f.debug_tuple("Static").field(items).finish(),
            Self::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn default_data_item_is_empty() {
        assert!(DataItem::default().is_empty());
        assert!(DataItem::from("").is_empty());
        assert!(!DataItem::from("run-1").is_empty());
    }

    #[test]
    fn data_item_from_serialize() {
        #[derive(Serialize)]
        struct Run {
            uid: &'static str,
        }
        let item = DataItem::from_serialize(&Run { uid: "abc" }).unwrap();
        assert_eq!(item.str_field("uid"), Some("abc"));
        assert_eq!(DataItem::from_serialize(&()).unwrap(), DataItem::default());
        assert_eq!(DataItem::from_serialize(&7).unwrap(), DataItem::Text("7".into()));
    }

    #[test]
    fn invoke_runs_action_with_data_item() {
        let seen = Rc::new(Cell::new(false));
        let flag = Rc::clone(&seen);
        let item = MenuItem::new("Edit", move |data: &DataItem| {
            flag.set(data.str_field("name") == Some("x"));
        });
        item.invoke(&DataItem::from_serialize(&serde_json::json!({ "name": "x" })).unwrap());
        assert!(seen.get());
    }

    #[test]
    fn resolver_sees_data_item() {
        let source = MenuSource::resolver(|data: &DataItem| {
            vec![MenuItem::new(data.str_field("name").unwrap_or("?"), |_: &DataItem| {})]
        });
        assert!(source.initial_items().is_empty());
        let items = source.resolve(&DataItem::from("job-7"));
        assert_eq!(items[0].label, "job-7");
    }

    #[test]
    fn static_source_ignores_data_item() {
        let source = MenuSource::from(vec![MenuItem::new("Delete", |_: &DataItem| {})]);
        assert_eq!(source.initial_items().len(), 1);
        assert_eq!(source.resolve(&DataItem::default()).len(), 1);
    }

    #[test]
    fn debug_omits_callbacks() {
        let item = MenuItem::new("Edit", |_: &DataItem| {}).with_icon('✎');
        let text = format!("{item:?}");
        assert!(text.contains("Edit"));
        assert!(format!("{:?}", MenuSource::resolver(|_: &DataItem| Vec::new())).contains("Resolver"));
    }
}
