//! Item shapes shared by the list binder, the tree materializer and the tab editor
use crate::errors::SyncError;
use crate::html_generator::html_escape;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Selection key, always held in its textual form.
///
/// The backing widgets serialize values through markup attributes, so numeric
/// and string forms of the same value compare equal once converted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    pub fn new(value: impl Into<String>) -> Self {
        Key(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Coerce any JSON scalar into a key. Null becomes the empty key.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Key::default(),
            serde_json::Value::String(s) => Key(s.clone()),
            serde_json::Value::Bool(b) => Key(b.to_string()),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Key(i.to_string())
                } else if let Some(u) = n.as_u64() {
                    Key(u.to_string())
                } else {
                    n.as_f64().map(Key::from).unwrap_or_else(|| Key(n.to_string()))
                }
            }
            other => Key(other.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key(value.clone())
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

macro_rules! key_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key(value.to_string())
                }
            }
        )*
    };
}

key_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Integral floats print without a fraction, so `5.0` and `5` are the same key.
///
/// Very large or very small magnitudes are written out in full (`1e21` becomes
/// `"1000000000000000000000"`), not in exponent form. Keys that must match a
/// browser-side `String(number)` in that range should be passed as strings.
impl From<f64> for Key {
    fn from(value: f64) -> Self {
        // Integral floats print without a fraction ("5", not "5.0"); -0 prints as "0".
        if value == 0.0 {
            Key("0".to_string())
        } else if value.is_infinite() {
            Key(if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
        } else {
            Key(value.to_string())
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Key::from_json(&raw))
    }
}

/// Renderable label content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayContent {
    /// Plain text, escaped whenever it is written into markup.
    Text(String),
    /// Caller-built markup fragment, passed through unmodified.
    Markup(String),
}

impl DisplayContent {
    pub fn text(value: impl Into<String>) -> Self {
        DisplayContent::Text(value.into())
    }

    pub fn markup(value: impl Into<String>) -> Self {
        DisplayContent::Markup(value.into())
    }

    /// Raw content without any escaping.
    pub fn as_str(&self) -> &str {
        match self {
            DisplayContent::Text(s) | DisplayContent::Markup(s) => s,
        }
    }

    /// Plain strings are text; `{"markup": ..}` objects are markup.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => DisplayContent::default(),
            serde_json::Value::String(s) => DisplayContent::Text(s.clone()),
            serde_json::Value::Object(map) => match (map.get("markup"), map.get("text")) {
                (Some(serde_json::Value::String(m)), _) => DisplayContent::Markup(m.clone()),
                (_, Some(serde_json::Value::String(t))) => DisplayContent::Text(t.clone()),
                _ => DisplayContent::Text(value.to_string()),
            },
            other => DisplayContent::Text(Key::from_json(other).into_string()),
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, DisplayContent::Markup(_))
    }

    /// Content as it must appear inside markup.
    pub fn to_markup(&self) -> Cow<'_, str> {
        match self {
            DisplayContent::Text(s) => Cow::Owned(html_escape(s)),
            DisplayContent::Markup(s) => Cow::Borrowed(s),
        }
    }
}

impl<'de> Deserialize<'de> for DisplayContent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(DisplayContent::from_json(&raw))
    }
}

impl Default for DisplayContent {
    fn default() -> Self {
        DisplayContent::Text(String::new())
    }
}

impl From<&str> for DisplayContent {
    fn from(value: &str) -> Self {
        DisplayContent::Text(value.to_string())
    }
}

impl From<String> for DisplayContent {
    fn from(value: String) -> Self {
        DisplayContent::Text(value)
    }
}

/// One selectable entry: a label and the key it stands for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub text: DisplayContent,
    #[serde(default)]
    pub value: Key,
}

impl Item {
    pub fn new(text: impl Into<DisplayContent>, value: impl Into<Key>) -> Self {
        Item {
            text: text.into(),
            value: value.into(),
        }
    }
}

/// Item with an ordered list of child items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    #[serde(default)]
    pub text: DisplayContent,
    #[serde(default)]
    pub value: Key,
    #[serde(default)]
    pub children: Vec<TreeItem>,
}

impl TreeItem {
    pub fn new(text: impl Into<DisplayContent>, value: impl Into<Key>) -> Self {
        TreeItem {
            text: text.into(),
            value: value.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TreeItem) -> Self {
        self.children.push(child);
        self
    }
}

/// Field names read from arbitrary records when building a key map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataModel {
    pub field_key: String,
    pub field_value: String,
}

impl Default for DataModel {
    fn default() -> Self {
        DataModel {
            field_key: "value".to_string(),
            field_value: "text".to_string(),
        }
    }
}

/// Outcome of a tree transform for one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeLabel {
    /// Drop the node together with its whole subtree.
    Skip,
    /// Render the item's own text.
    Default,
    /// Render this content verbatim.
    Content(DisplayContent),
}

/// Change-event handler slot of a tab selector. Moved between instances as-is.
pub type ChangeHandler = Rc<dyn Fn(&Key)>;

/// Tab editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Widget type written into the declarative blob.
    pub widget_type: String,
    /// Prefix of the identity token assigned to each rebuilt instance.
    pub id_prefix: String,
    /// Attributes copied from the old root element to the new one.
    pub identity_attributes: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            widget_type: "tab".to_string(),
            id_prefix: "sync_tabs".to_string(),
            identity_attributes: vec!["id".to_string()],
        }
    }
}

impl EditorConfig {
    pub fn from_json(raw: &str) -> Result<Self, SyncError> {
        Ok(serde_json::from_str(raw)?)
    }
}

static NEXT_SUFFIX: AtomicUsize = AtomicUsize::new(0);

/// Process-unique identity token `<prefix>_<n>`. The counter is shared across prefixes.
pub fn next_id(prefix: &str) -> String {
    let suffix = NEXT_SUFFIX.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}_{suffix}")
}
