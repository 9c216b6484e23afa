//! Dashboard HTML page.

use moves_core::{Result, ALL_MARKETS};
use moves_presentation::html::{escape_html, script_json, PLOTLY_JS_URL};
use moves_presentation::ChartStyle;

/// Render the dashboard page with one option per market.
///
/// The sentinel option is listed first and pre-selected. The page script
/// fetches `/api/figure` for the current selection on load and on every
/// change.
pub fn render_page(markets: &[String], style: &ChartStyle) -> Result<String> {
    let mut options = format!(
        r#"<option value="{0}" selected>{0}</option>"#,
        escape_html(ALL_MARKETS)
    );
    for market in markets {
        let market = escape_html(market);
        options.push_str(&format!(r#"<option value="{market}">{market}</option>"#));
    }

    let title = escape_html(&style.title);
    let background = escape_html(&style.background);
    let text = escape_html(&style.text);
    let sentinel = script_json(&ALL_MARKETS)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_JS_URL}"></script>
</head>
<body style="margin:0;background-color:{background};color:{text};font-family:sans-serif">
<h1 style="text-align:center">Market moves</h1>
<div style="text-align:center">Daily up/still/down counts of market maxima.</div>
<div style="margin:16px">
<label for="market-filter">Markets</label>
<select id="market-filter" multiple size="8" style="width:100%">
{options}
</select>
</div>
<div id="fig" style="height:70vh"></div>
<script>
const ALL = {sentinel};
const select = document.getElementById("market-filter");

function query() {{
  const picked = Array.from(select.selectedOptions).map(o => o.value);
  if (picked.length === 0) return "market=";
  if (picked.includes(ALL)) return "";
  return picked.map(m => "market=" + encodeURIComponent(m)).join("&");
}}

async function update() {{
  const resp = await fetch("/api/figure?" + query());
  const body = await resp.json();
  if (!resp.ok) {{
    document.getElementById("fig").textContent = body.error;
    return;
  }}
  Plotly.react("fig", body.data, body.layout, {{responsive: true}});
}}

select.addEventListener("change", update);
update();
</script>
</body>
</html>
"#
    ))
}
