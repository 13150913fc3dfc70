//! Declarative markup for toolkit initialization, with consistent escaping
use crate::tab_config::TabSetConfig;
use crate::types::DisplayContent;
use phf::phf_map;

// Compile-time container tag lookup (zero allocation)
static WIDGET_TAGS: phf::Map<&'static str, &'static str> = phf_map! {
    "tab" => "div",
    "tabs" => "div",
    "select" => "div",
    "tree" => "div",
    "list" => "ul",
};

/// Tag of each child tab inside the container.
const TAB_TAG: &str = "label";

/// Escape text for an element body or a double-quoted attribute.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode the `ui` separators (`;`, `:`) and `%` itself inside one token.
pub fn encode_token(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ';' => out.push_str("%3B"),
            ':' => out.push_str("%3A"),
            _ => out.push(c),
        }
    }
    out
}

/// Inverse of [`encode_token`]. Unrecognized escapes are kept literally.
pub fn decode_token(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find('%') {
        out.push_str(&rest[..pos]);
        let escape = rest.get(pos + 1..pos + 3).map(str::to_ascii_uppercase);
        let decoded = match escape.as_deref() {
            Some("25") => Some('%'),
            Some("3B") => Some(';'),
            Some("3A") => Some(':'),
            _ => None,
        };
        match decoded {
            Some(c) => {
                out.push(c);
                rest = &rest[pos + 3..];
            }
            None => {
                out.push('%');
                rest = &rest[pos + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Serialized form of a [`TabSetConfig`], ready for the toolkit's initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSetMarkup {
    /// Identity token written into `ui`.
    pub id: String,
    /// Container element tag.
    pub tag: &'static str,
    /// Value of the container's `ui` attribute, e.g. `type:tab;id:t_1;value:b`.
    pub ui: String,
    /// One annotated element per tab.
    pub inner_html: String,
}

impl TabSetMarkup {
    pub fn outer_html(&self) -> String {
        format!(
            r#"<{tag} ui="{ui}">{inner}</{tag}>"#,
            tag = self.tag,
            ui = html_escape(&self.ui),
            inner = self.inner_html
        )
    }
}

/// Build the declarative blob for `config`.
///
/// Every token inside a `ui` attribute goes through [`encode_token`], so keys containing
/// `;` or `:` cannot add or override attributes. Labels go through [`DisplayContent::to_markup`], so markup labels are written verbatim.
/// Nothing is validated here; malformed caller markup is the initializer's problem.
pub fn render_tab_set(config: &TabSetConfig) -> TabSetMarkup {
    let tag = WIDGET_TAGS.get(config.widget_type.as_str()).copied().unwrap_or("div");

    let mut ui = format!(
        "type:{};id:{}",
        encode_token(&config.widget_type),
        encode_token(&config.id)
    );
    if let Some(value) = &config.default_value {
        ui.push_str(&format!(";value:{}", encode_token(value.as_str())));
    }

    let inner_html: String = config
        .items
        .iter()
        .map(|item| {
            format!(
                r#"<{tag} ui="value:{value}">{label}</{tag}>"#,
                tag = TAB_TAG,
                value = html_escape(&encode_token(item.value.as_str())),
                label = item.text.to_markup()
            )
        })
        .collect();

    TabSetMarkup {
        id: config.id.clone(),
        tag,
        ui,
        inner_html,
    }
}

/// Wrap `text` so page CSS can truncate it while the hover title shows it in full.
pub fn overflow_tip(text: &str) -> DisplayContent {
    let escaped = html_escape(text);
    DisplayContent::markup(format!(
        r#"<div class="textOverflow" title="{title}">{body}</div>"#,
        title = escaped,
        body = escaped
    ))
}
