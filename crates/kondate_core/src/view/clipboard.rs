//! Clipboard export snippets.
//!
//! # Responsibility
//! - Embed plain-text exports into a copy-to-clipboard button snippet.
//!
//! # Invariants
//! - Payload text is embedded as a JSON string literal, then HTML-escaped as
//!   an attribute value; no payload content can terminate either context.

use serde::Serialize;
use serde_json::Value;

const MENU_BUTTON_COLOR: &str = "#4CAF50";
const SHOPPING_BUTTON_COLOR: &str = "#2196F3";

/// One copy button with its payload and captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipboardButton {
    /// Text copied on click.
    pub payload: String,
    /// Alert shown after the copy succeeds.
    pub confirmation: String,
    /// Button caption.
    pub caption: String,
    /// CSS background color.
    pub color: String,
}

impl ClipboardButton {
    /// Copy button for the weekly menu export.
    pub fn menu(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            confirmation: "献立をコピーしました".to_string(),
            caption: "📋 今週の献立をコピー".to_string(),
            color: MENU_BUTTON_COLOR.to_string(),
        }
    }

    /// Copy button for the deduplicated shopping export.
    pub fn shopping(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            confirmation: "買い物リストをコピーしました".to_string(),
            caption: "📋 買い物リストをコピー".to_string(),
            color: SHOPPING_BUTTON_COLOR.to_string(),
        }
    }

    /// Renders the button as a self-contained HTML snippet.
    pub fn render_html(&self) -> String {
        let onclick = format!(
            "navigator.clipboard.writeText({}).then(() => alert({}))",
            js_string_literal(&self.payload),
            js_string_literal(&self.confirmation)
        );
        let style = format!(
            "margin:10px 0;padding:10px 20px;font-size:16px;border:none;\
             background-color:{};color:white;border-radius:6px;cursor:pointer;width:100%;",
            self.color
        );
        format!(
            "<button type=\"button\" onclick=\"{}\" style=\"{}\">{}</button>",
            escape_html(&onclick),
            escape_html(&style),
            escape_html(&self.caption)
        )
    }
}

/// Quotes `text` as a JavaScript string literal.
pub fn js_string_literal(text: &str) -> String {
    // JSON string syntax is a subset of JS string syntax.
    Value::String(text.to_string()).to_string()
}

/// Escapes text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{escape_html, js_string_literal, ClipboardButton};

    #[test]
    fn js_literal_escapes_quotes_and_newlines() {
        assert_eq!(js_string_literal("a\"b\nc"), r#""a\"b\nc""#);
        assert_eq!(js_string_literal("it's"), r#""it's""#);
    }

    #[test]
    fn escape_html_covers_attribute_breakers() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn hostile_payload_cannot_break_out_of_onclick() {
        let payload = "1/8(月)\n・\"soup\"</script><b onclick='x'>\n\n";
        let html = ClipboardButton::menu(payload).render_html();

        let onclick_start = html.find("onclick=\"").unwrap() + "onclick=\"".len();
        let onclick_end = onclick_start + html[onclick_start..].find('"').unwrap();
        let onclick = &html[onclick_start..onclick_end];
        assert!(!onclick.contains('<'));
        assert!(!onclick.contains('\''));
        assert!(!onclick.contains('\n'));
        assert!(onclick.contains("navigator.clipboard.writeText("));
        assert!(html.ends_with("📋 今週の献立をコピー</button>"));
    }

    #[test]
    fn presets_use_distinct_colors_and_confirmations() {
        let menu = ClipboardButton::menu("");
        let shopping = ClipboardButton::shopping("");
        assert_ne!(menu.color, shopping.color);
        assert_eq!(shopping.confirmation, "買い物リストをコピーしました");
        assert!(shopping.render_html().contains("#2196F3"));
    }
}
