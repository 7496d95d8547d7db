use chrono::NaiveDate;
use std::f64::consts::PI;

use crate::report::{format_rank, group_thousands, share};
use crate::stats::ProfileStats;

const START_Y: i32 = 30;
const LINE_HEIGHT: i32 = 20;
const LEFT_PADDING: f32 = 15.0;
const GAP_BETWEEN_COLUMNS: f32 = 30.0;
const RIGHT_PADDING: f32 = 30.0;
const CHAR_WIDTH: f32 = 9.6;
const MIN_TEXT_COL_CHARS: usize = 36;
const PIE_RADIUS: f64 = 80.0;

/// Red-to-blue diverging palette for the pie slices.
const SLICE_COLORS: [&str; 11] = [
    "#67001f", "#b2182b", "#d6604d", "#f4a582", "#fddbc7", "#f7f7f7", "#d1e5f0", "#92c5de",
    "#4393c3", "#2166ac", "#053061",
];

#[derive(Clone, Copy)]
pub enum Theme {
    Dark,
    Light,
}

pub struct ThemeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub key: &'static str,
    pub value: &'static str,
    pub cc: &'static str,
}

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Dark => ThemeColors {
                bg: "#161b22",
                text: "#c9d1d9",
                key: "#ffa657",
                value: "#a5d6ff",
                cc: "#616e7f",
            },
            Theme::Light => ThemeColors {
                bg: "#ffffff",
                text: "#24292f",
                key: "#d73a49",
                value: "#0366d6",
                cc: "#6a737d",
            },
        }
    }

    /// File name the card for this theme is written to.
    pub fn file_name(self) -> &'static str {
        match self {
            Theme::Dark => "dark_mode.svg",
            Theme::Light => "light_mode.svg",
        }
    }
}

fn slice_color(i: usize) -> &'static str {
    SLICE_COLORS[(i * 3 + 1) % SLICE_COLORS.len()]
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Returns `(key, dots, value)` padded so every row is `align_width` wide.
pub fn build_stat_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.chars().count() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => ".".repeat(n),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.chars().count()) + 2;
    format!("{base}{}", "-".repeat(dash_count))
}

fn point_on_circle(cx: f64, cy: f64, angle: f64) -> (f64, f64) {
    // Angles start at 12 o'clock and run clockwise.
    (cx + PIE_RADIUS * angle.sin(), cy - PIE_RADIUS * angle.cos())
}

/// One `<path>` (or `<circle>`) per non-empty difficulty.
fn build_pie(stats: &ProfileStats, cx: f64, cy: f64, colors: &ThemeColors) -> String {
    let total = stats.total_solved();
    if total == 0 {
        return format!(
            r#"<circle cx="{cx}" cy="{cy}" r="{PIE_RADIUS}" fill="none" stroke="{}" stroke-width="2"/>
"#,
            colors.cc
        );
    }

    let mut out = String::new();
    let mut start = 0.0f64;

    for (i, c) in stats.counts().iter().enumerate() {
        if c.count == 0 {
            continue;
        }
        let fill = slice_color(i);

        if c.count == total {
            out.push_str(&format!(
                r#"<circle class="slice" cx="{cx}" cy="{cy}" r="{PIE_RADIUS}" fill="{fill}"/>
"#
            ));
            break;
        }

        let sweep = 2.0 * PI * c.count as f64 / total as f64;
        let end = start + sweep;
        let (x1, y1) = point_on_circle(cx, cy, start);
        let (x2, y2) = point_on_circle(cx, cy, end);
        let large_arc = if sweep > PI { 1 } else { 0 };

        out.push_str(&format!(
            r#"<path class="slice" d="M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {PIE_RADIUS} {PIE_RADIUS} 0 {large_arc} 1 {x2:.2} {y2:.2} Z" fill="{fill}" stroke="{bg}" stroke-width="1"/>
"#,
            bg = colors.bg
        ));

        start = end;
    }

    out
}

enum Line {
    Header(String),
    Blank,
    Stat {
        k: String,
        d: String,
        v: String,
        swatch: Option<&'static str>,
    },
}

/// Stat card for `stats`: metrics and breakdown on the left, pie chart on the right.
pub fn generate_svg(stats: &ProfileStats, generated_on: NaiveDate, theme: Theme) -> String {
    let colors = theme.colors();
    let total = stats.total_solved();

    let total_value = group_thousands(total);
    let rank_value = format_rank(stats.ranking());
    let breakdown: Vec<(String, String)> = stats
        .counts()
        .iter()
        .map(|c| {
            (
                c.difficulty.clone(),
                format!("{} ({:.1}%)", c.count, share(c.count, total)),
            )
        })
        .collect();

    let align_width = [("Total Solved", &total_value), ("Global Rank", &rank_value)]
        .into_iter()
        .chain(breakdown.iter().map(|(k, v)| (k.as_str(), v)))
        .map(|(k, v)| k.chars().count() + 2 + v.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_TEXT_COL_CHARS);

    let row = |k: &str, v: &str, swatch: Option<&'static str>| {
        let (k, d, v) = build_stat_row(k, v, align_width);
        Line::Stat { k, d, v, swatch }
    };

    let mut lines = vec![
        Line::Header(build_header_line(
            &format!("{}@leetcode", stats.username()),
            align_width,
        )),
        row("Total Solved", &total_value, None),
        row("Global Rank", &rank_value, None),
        Line::Blank,
        Line::Header(build_header_line("- Problems by Difficulty", align_width)),
    ];
    for (i, (k, v)) in breakdown.iter().enumerate() {
        let swatch = (stats.counts()[i].count > 0).then(|| slice_color(i));
        lines.push(row(k.as_str(), v.as_str(), swatch));
    }
    lines.push(Line::Blank);
    lines.push(Line::Header(format!("Updated {}", generated_on.format("%Y-%m-%d"))));

    let mut text_tspans = String::new();
    for (i, line) in lines.iter().enumerate() {
        let y = START_Y + (i as i32) * LINE_HEIGHT;

        match line {
            Line::Blank => {}
            Line::Header(text) => {
                text_tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}">{}</tspan>
"#,
                    escape_xml(text)
                ));
            }
            Line::Stat { k, d, v, swatch } => {
                let bullet = match swatch {
                    Some(color) => format!(r#"<tspan fill="{color}">■ </tspan>"#),
                    None => r#"<tspan class="cc">. </tspan>"#.to_string(),
                };
                text_tspans.push_str(&format!(
                    r#"<tspan x="{LEFT_PADDING}" y="{y}">{bullet}</tspan><tspan class="key">{}</tspan><tspan class="cc">{}</tspan><tspan class="value">{}</tspan>
"#,
                    escape_xml(k),
                    escape_xml(d),
                    escape_xml(v)
                ));
            }
        }
    }

    let text_width_px = LEFT_PADDING + (align_width as f32 + 2.0) * CHAR_WIDTH;
    let text_height_px = lines.len() as f32 * LINE_HEIGHT as f32 + START_Y as f32;

    let cx = (text_width_px + GAP_BETWEEN_COLUMNS) as f64 + PIE_RADIUS;
    let cy = START_Y as f64 + PIE_RADIUS;
    let pie = build_pie(stats, cx, cy, &colors);

    let w = (cx + PIE_RADIUS) as f32 + RIGHT_PADDING;
    let h = text_height_px.max((cy + PIE_RADIUS) as f32) + 30.0;

    format!(
        r#"<?xml version='1.0' encoding='UTF-8'?>
<svg xmlns="http://www.w3.org/2000/svg"
     width="{w}px" height="{h}px"
     font-family="ConsolasFallback,Consolas,monospace"
     font-size="16px">

<style>
.key      {{ fill: {key}; }}
.value    {{ fill: {value}; }}
.cc       {{ fill: {cc}; }}
</style>

<rect width="{w}px" height="{h}px" fill="{bg}" rx="15"/>

<!-- STATS -->
<text fill="{text}" xml:space="preserve">
{stats}
</text>

<!-- PIE -->
<g>
{pie}
</g>

</svg>
"#,
        w = w,
        h = h,
        bg = colors.bg,
        text = colors.text,
        key = colors.key,
        value = colors.value,
        cc = colors.cc,
        stats = text_tspans,
        pie = pie
    )
}
