//! Standalone HTML rendering of a figure through Plotly.js.

use moves_core::Result;

use crate::chart::Figure;

/// Plotly.js bundle loaded by rendered pages.
pub const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize a value as JSON safe to embed inside a `<script>` element.
pub fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Render a self-contained page drawing `figure`.
pub fn render_html(figure: &Figure) -> Result<String> {
    let figure_json = script_json(figure)?;
    let title = escape_html(&figure.layout.title.text);
    let background = escape_html(&figure.layout.paper_bgcolor);
    let text = escape_html(&figure.layout.font.color);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_JS_URL}"></script>
</head>
<body style="margin:0;background-color:{background};color:{text}">
<div id="chart" style="width:100%;height:100vh"></div>
<script>
const figure = {figure_json};
Plotly.newPlot("chart", figure.data, figure.layout, {{responsive: true}});
</script>
</body>
</html>
"#
    ))
}
