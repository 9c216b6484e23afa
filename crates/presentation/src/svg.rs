//! Offline SVG rendering of a stacked bar figure.

use std::fmt::{self, Write};

use crate::chart::Figure;
use crate::html::escape_html;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 170.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 90.0;
const MAX_X_LABELS: usize = 20;

/// Round a raw tick step up to 1, 2 or 5 times a power of ten, at least 1.
fn nice_step(raw: f64) -> u32 {
    if raw <= 1.0 {
        return 1;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    (nice * magnitude) as u32
}

/// Render `figure` as an SVG document of the given pixel size.
pub fn render_svg(figure: &Figure, width: u32, height: u32) -> String {
    let mut svg = String::new();
    // fmt::Write for String never returns an error.
    let _ = write_svg(&mut svg, figure, width, height);
    svg
}

fn write_svg(out: &mut String, figure: &Figure, width: u32, height: u32) -> fmt::Result {
    let (w, h) = (width as f64, height as f64);
    let plot_w = (w - MARGIN_LEFT - MARGIN_RIGHT).max(1.0);
    let plot_h = (h - MARGIN_TOP - MARGIN_BOTTOM).max(1.0);
    let x0 = MARGIN_LEFT;
    let y0 = MARGIN_TOP + plot_h;

    let layout = &figure.layout;
    let text_color = escape_html(&layout.font.color);
    let categories = figure.categories();
    let n = categories.len();

    let max_total = (0..n).map(|i| figure.stacked_total(i)).max().unwrap_or(0);
    let step = nice_step(max_total as f64 / 5.0);
    let y_max = (max_total.div_ceil(step) * step).max(step) as f64;
    let scale = plot_h / y_max;

    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif" font-size="12">"#
    )?;
    writeln!(
        out,
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        escape_html(&layout.paper_bgcolor)
    )?;
    writeln!(
        out,
        r#"<rect x="{x0}" y="{MARGIN_TOP}" width="{plot_w}" height="{plot_h}" fill="{}"/>"#,
        escape_html(&layout.plot_bgcolor)
    )?;
    writeln!(
        out,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="18" fill="{text_color}">{}</text>"#,
        w / 2.0,
        MARGIN_TOP / 2.0,
        escape_html(&layout.title.text)
    )?;

    // y grid and ticks
    let mut tick = 0u32;
    while tick as f64 <= y_max {
        let y = y0 - tick as f64 * scale;
        writeln!(
            out,
            "<line x1=\"{x0}\" y1=\"{y:.2}\" x2=\"{:.2}\" y2=\"{y:.2}\" stroke=\"{text_color}\" stroke-opacity=\"0.15\"/>",
            x0 + plot_w
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" fill="{text_color}">{tick}</text>"#,
            x0 - 6.0,
            y + 4.0
        )?;
        tick += step;
    }

    // bars, stacked bottom-up in trace order
    if n > 0 {
        let band = plot_w / n as f64;
        let bar_w = band * 0.8;
        for i in 0..n {
            let x = x0 + band * i as f64 + (band - bar_w) / 2.0;
            let mut base = 0u32;
            for trace in &figure.data {
                let value = trace.y.get(i).copied().unwrap_or(0);
                if value == 0 {
                    continue;
                }
                let top = y0 - (base + value) as f64 * scale;
                writeln!(
                    out,
                    "<rect x=\"{x:.2}\" y=\"{top:.2}\" width=\"{bar_w:.2}\" height=\"{:.2}\" fill=\"{}\"><title>{} {}: {value}</title></rect>",
                    value as f64 * scale,
                    escape_html(&trace.marker.color),
                    escape_html(&categories[i]),
                    escape_html(&trace.name)
                )?;
                base += value;
            }
        }

        let every = n.div_ceil(MAX_X_LABELS);
        for (i, label) in categories.iter().enumerate().step_by(every) {
            let x = x0 + band * (i as f64 + 0.5);
            writeln!(
                out,
                r#"<text x="{x:.2}" y="{:.2}" text-anchor="end" transform="rotate(-45 {x:.2} {:.2})" fill="{text_color}">{}</text>"#,
                y0 + 14.0,
                y0 + 14.0,
                escape_html(label)
            )?;
        }
    } else {
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{text_color}">No data</text>"#,
            x0 + plot_w / 2.0,
            MARGIN_TOP + plot_h / 2.0
        )?;
    }

    // axes
    writeln!(
        out,
        r#"<line x1="{x0}" y1="{y0}" x2="{:.2}" y2="{y0}" stroke="{text_color}"/>"#,
        x0 + plot_w
    )?;
    writeln!(
        out,
        r#"<line x1="{x0}" y1="{MARGIN_TOP}" x2="{x0}" y2="{y0}" stroke="{text_color}"/>"#
    )?;
    writeln!(
        out,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" fill="{text_color}">{}</text>"#,
        x0 + plot_w / 2.0,
        h - 10.0,
        escape_html(&layout.xaxis.title.text)
    )?;
    writeln!(
        out,
        r#"<text x="18" y="{:.2}" text-anchor="middle" transform="rotate(-90 18 {:.2})" fill="{text_color}">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        escape_html(&layout.yaxis.title.text)
    )?;

    // legend, top trace first like the stacking reads
    let legend_x = x0 + plot_w + 20.0;
    for (row, trace) in figure.data.iter().rev().enumerate() {
        let y = MARGIN_TOP + 10.0 + row as f64 * 22.0;
        writeln!(
            out,
            r#"<rect x="{legend_x:.2}" y="{y:.2}" width="12" height="12" fill="{}"/>"#,
            escape_html(&trace.marker.color)
        )?;
        writeln!(
            out,
            r#"<text x="{:.2}" y="{:.2}" fill="{text_color}">{}</text>"#,
            legend_x + 18.0,
            y + 10.0,
            escape_html(&trace.name)
        )?;
    }

    out.push_str("</svg>\n");
    Ok(())
}
