//! Draw chart panels as SVG.
//!
//! One figure per [`ChartResult`]. The insufficient-data signal is drawn as a
//! titled placeholder panel of the same size, so a page keeps its layout
//! whatever the selection.

use super::svg::{SvgEncoder, TextAnchor};
use crate::chart::{ChartResult, ChartSpec, Mark, Orientation, Palette, INSUFFICIENT_DATA};
use crate::color::{pastel, Rgba};
use crate::format;
use crate::scale::{ColorScale, LinearScale, Scale};
use std::f32::consts::{FRAC_PI_2, TAU};
use trueno::Vector;

/// Figure width in pixels.
pub const WIDTH: u32 = 640;
/// Figure height in pixels.
pub const HEIGHT: u32 = 400;

const TITLE_SIZE: f32 = 16.0;
const LABEL_SIZE: f32 = 11.0;
const TOP: f32 = 48.0;
const BOTTOM: f32 = 56.0;
const LEFT: f32 = 64.0;
const RIGHT: f32 = 24.0;
const TICKS: usize = 5;
const MAP_COLUMNS: usize = 8;
const TILE_MAX_H: f32 = 36.0;
const TILE_MIN_H: f32 = 16.0;
/// Tiles shorter than this only show the country code.
const TILE_VALUE_H: f32 = 30.0;

/// Render a chart result as a complete SVG figure.
#[must_use]
pub fn render(result: &ChartResult) -> SvgEncoder {
    let svg = SvgEncoder::new(WIDTH, HEIGHT).text(
        16.0,
        28.0,
        result.title(),
        TITLE_SIZE,
        Rgba::SLATE,
    );
    match result {
        ChartResult::InsufficientData { .. } => placeholder(svg),
        ChartResult::Chart(spec) => match spec.mark {
            Mark::Bar { orientation: Orientation::Vertical } => vertical_bars(svg, spec),
            Mark::Bar { orientation: Orientation::Horizontal } => horizontal_bars(svg, spec),
            Mark::Histogram { .. } => histogram(svg, spec),
            Mark::Choropleth => tile_map(svg, spec),
            Mark::Pie => pie(svg, spec),
        },
    }
}

fn placeholder(svg: SvgEncoder) -> SvgEncoder {
    let (w, h) = (WIDTH as f32, HEIGHT as f32);
    svg.rect_outlined(
        LEFT,
        TOP,
        w - LEFT - RIGHT,
        h - TOP - BOTTOM,
        Rgba::WHITE,
        Rgba::GRID,
        1.0,
    )
    .text_anchored(w / 2.0, h / 2.0, INSUFFICIENT_DATA, 14.0, Rgba::SLATE, TextAnchor::Middle)
}

fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_string()
    } else {
        let head: String = label.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Largest datum value on the f32 pixel scale, 0 without data.
fn pixel_max(spec: &ChartSpec) -> f32 {
    if spec.data.is_empty() {
        return 0.0;
    }
    let values = Vector::from_vec(spec.data.iter().map(|d| d.value as f32).collect());
    values.max().unwrap_or(0.0)
}

/// Value axis ticks along y with grid lines.
fn y_axis(mut svg: SvgEncoder, scale: &LinearScale, x0: f32, x1: f32, title: &str) -> SvgEncoder {
    let (_, max) = scale.domain();
    for i in 0..=TICKS {
        let value = max * i as f32 / TICKS as f32;
        let y = scale.scale(value);
        svg = svg.line(x0, y, x1, y, Rgba::GRID, 1.0).text_anchored(
            x0 - 6.0,
            y + 4.0,
            &format::compact(f64::from(value)),
            LABEL_SIZE,
            Rgba::SLATE,
            TextAnchor::End,
        );
    }
    svg.text(4.0, TOP - 8.0, title, LABEL_SIZE, Rgba::SLATE)
}

fn vertical_bars(svg: SvgEncoder, spec: &ChartSpec) -> SvgEncoder {
    let (w, h) = (WIDTH as f32, HEIGHT as f32);
    let (x0, x1, y0, y1) = (LEFT, w - RIGHT, h - BOTTOM, TOP);
    let scale = LinearScale::from_zero(pixel_max(spec), (y0, y1));

    let mut svg = y_axis(svg, &scale, x0, x1, &spec.y.title);
    let band = (x1 - x0) / spec.data.len().max(1) as f32;
    let max_chars = ((band / 6.5) as usize).max(3);

    for (i, datum) in spec.data.iter().enumerate() {
        let top = scale.scale(datum.value as f32);
        let x = x0 + band * i as f32 + band * 0.1;
        let center = x0 + band * (i as f32 + 0.5);
        svg = svg
            .rect(x, top, band * 0.8, y0 - top, pastel(i))
            .text_anchored(
                center,
                top - 4.0,
                &format::thousands(datum.value as u64),
                LABEL_SIZE,
                Rgba::SLATE,
                TextAnchor::Middle,
            )
            .text_anchored(
                center,
                y0 + 16.0,
                &truncate(&datum.key, max_chars),
                LABEL_SIZE,
                Rgba::SLATE,
                TextAnchor::Middle,
            );
    }

    svg.line(x0, y0, x1, y0, Rgba::SLATE, 1.0).text_anchored(
        (x0 + x1) / 2.0,
        h - 12.0,
        &spec.x.title,
        LABEL_SIZE,
        Rgba::SLATE,
        TextAnchor::Middle,
    )
}

fn horizontal_bars(mut svg: SvgEncoder, spec: &ChartSpec) -> SvgEncoder {
    let (w, h) = (WIDTH as f32, HEIGHT as f32);
    let left = 200.0;
    let (x0, x1, y0, y1) = (left, w - RIGHT - 56.0, TOP, h - BOTTOM);
    let scale = LinearScale::from_zero(pixel_max(spec), (x0, x1));
    let band = (y1 - y0) / spec.data.len().max(1) as f32;

    for (i, datum) in spec.data.iter().enumerate() {
        let end = scale.scale(datum.value as f32);
        let y = y0 + band * i as f32 + band * 0.15;
        let middle = y0 + band * (i as f32 + 0.5) + 4.0;
        svg = svg
            .rect(x0, y, end - x0, band * 0.7, pastel(i))
            .text_anchored(
                x0 - 6.0,
                middle,
                &truncate(&datum.key, 30),
                LABEL_SIZE,
                Rgba::SLATE,
                TextAnchor::End,
            )
            .text(end + 4.0, middle, &format::compact(datum.value), LABEL_SIZE, Rgba::SLATE);
    }

    svg.line(x0, y0, x0, y1, Rgba::SLATE, 1.0).text_anchored(
        (x0 + x1) / 2.0,
        h - 12.0,
        &spec.x.title,
        LABEL_SIZE,
        Rgba::SLATE,
        TextAnchor::Middle,
    )
}

fn histogram(svg: SvgEncoder, spec: &ChartSpec) -> SvgEncoder {
    let (w, h) = (WIDTH as f32, HEIGHT as f32);
    let (x0, x1, y0, y1) = (LEFT, w - RIGHT, h - BOTTOM, TOP);
    let y_scale = LinearScale::from_zero(pixel_max(spec), (y0, y1));
    let mut svg = y_axis(svg, &y_scale, x0, x1, &spec.y.title);

    let bins: Vec<_> = spec.data.iter().filter_map(|d| d.bin).collect();
    let (Some(first), Some(last)) = (bins.first(), bins.last()) else {
        return svg;
    };
    let Ok(x_scale) = LinearScale::new((first.start as f32, last.end as f32), (x0, x1)) else {
        return svg;
    };

    for bin in &bins {
        let left = x_scale.scale(bin.start as f32);
        let right = x_scale.scale(bin.end as f32);
        let top = y_scale.scale(bin.count as f32);
        svg = svg.rect_outlined(left, top, right - left, y0 - top, pastel(0), Rgba::WHITE, 0.5);
    }

    for i in 0..=TICKS {
        let value = first.start + (last.end - first.start) * i as f64 / TICKS as f64;
        svg = svg.text_anchored(
            x_scale.scale(value as f32),
            y0 + 16.0,
            &format::compact(value),
            LABEL_SIZE,
            Rgba::SLATE,
            TextAnchor::Middle,
        );
    }

    svg.line(x0, y0, x1, y0, Rgba::SLATE, 1.0).text_anchored(
        (x0 + x1) / 2.0,
        h - 12.0,
        &spec.x.title,
        LABEL_SIZE,
        Rgba::SLATE,
        TextAnchor::Middle,
    )
}

/// Tile grid for `n` countries in a `grid_w` x `grid_h` area, as
/// `(columns, tile_w, tile_h)`.
///
/// Rows shrink before columns are added; columns grow once rows would drop
/// below the minimum height.
fn tile_grid(n: usize, grid_w: f32, grid_h: f32) -> (usize, f32, f32) {
    let max_rows = ((grid_h / TILE_MIN_H).floor() as usize).max(1);
    let columns = MAP_COLUMNS.max(n.div_ceil(max_rows));
    let rows = n.div_ceil(columns).max(1);
    let tile_h = (grid_h / rows as f32).min(TILE_MAX_H);
    (columns, grid_w / columns as f32, tile_h)
}

/// Countries as a grid of colored tiles, with a color legend and the note.
fn tile_map(mut svg: SvgEncoder, spec: &ChartSpec) -> SvgEncoder {
    let (w, h) = (WIDTH as f32, HEIGHT as f32);
    let (min, max) = match spec.palette {
        Palette::YlGnBu { min, max } => (min as f32, max as f32),
        Palette::Pastel => (0.0, pixel_max(spec)),
    };
    let colors = ColorScale::yl_gn_bu((min, max));

    let legend_y = h - BOTTOM - 12.0;
    // Legend labels sit just above the color bar
    let grid_h = legend_y - 18.0 - TOP;
    let (columns, tile_w, tile_h) = tile_grid(spec.data.len(), w - LEFT - RIGHT, grid_h);
    let show_value = tile_h >= TILE_VALUE_H;

    for (i, datum) in spec.data.iter().enumerate() {
        let x = LEFT + tile_w * (i % columns) as f32;
        let y = TOP + tile_h * (i / columns) as f32;
        let fill = colors.scale(datum.value as f32);
        let dark = (datum.value as f32) > (min + max) / 2.0;
        let ink = if dark { Rgba::WHITE } else { Rgba::SLATE };
        let key_y = if show_value { y + tile_h * 0.42 } else { y + tile_h / 2.0 + 4.0 };
        svg = svg.rect_outlined(x, y, tile_w, tile_h, fill, Rgba::WHITE, 1.0).text_anchored(
            x + tile_w / 2.0,
            key_y,
            &datum.key,
            LABEL_SIZE,
            ink,
            TextAnchor::Middle,
        );
        if show_value {
            svg = svg.text_anchored(
                x + tile_w / 2.0,
                y + tile_h * 0.8,
                &format::compact(datum.value),
                LABEL_SIZE - 1.0,
                ink,
                TextAnchor::Middle,
            );
        }
    }

    let stops = colors.stops();
    let stop_w = 200.0 / stops.len() as f32;
    for (i, &stop) in stops.iter().enumerate() {
        svg = svg.rect(LEFT + stop_w * i as f32, legend_y, stop_w, 10.0, stop);
    }
    let low = format::compact(f64::from(min));
    let high = format::compact(f64::from(max));
    svg = svg
        .text(LEFT, legend_y - 4.0, &low, LABEL_SIZE, Rgba::SLATE)
        .text_anchored(
            LEFT + 200.0,
            legend_y - 4.0,
            &high,
            LABEL_SIZE,
            Rgba::SLATE,
            TextAnchor::End,
        )
        .text(LEFT + 212.0, legend_y + 9.0, &spec.y.title, LABEL_SIZE, Rgba::SLATE);

    match &spec.note {
        Some(note) => {
            svg.text(16.0, h - 16.0, &truncate(note, 110), LABEL_SIZE - 1.0, Rgba::SLATE)
        }
        None => svg,
    }
}

/// Path of one pie slice from `start` to `end` radians.
fn slice_path(cx: f32, cy: f32, r: f32, start: f32, end: f32) -> String {
    if end - start >= TAU - 1e-4 {
        // A full circle cannot be a single arc.
        return format!(
            "M {cx} {} A {r} {r} 0 1 1 {cx} {} A {r} {r} 0 1 1 {cx} {} Z",
            cy - r,
            cy + r,
            cy - r
        );
    }
    let (x0, y0) = (cx + r * start.cos(), cy + r * start.sin());
    let (x1, y1) = (cx + r * end.cos(), cy + r * end.sin());
    let large = u8::from(end - start > std::f32::consts::PI);
    format!("M {cx} {cy} L {x0} {y0} A {r} {r} 0 {large} 1 {x1} {y1} Z")
}

fn pie(mut svg: SvgEncoder, spec: &ChartSpec) -> SvgEncoder {
    let h = HEIGHT as f32;
    let (cx, cy, r) = (200.0, (TOP + h - 24.0) / 2.0, 140.0);
    let total: f64 = spec.data.iter().map(|d| d.value).sum();

    let mut angle = -FRAC_PI_2;
    for (i, datum) in spec.data.iter().enumerate() {
        let share = datum.share.unwrap_or(if total > 0.0 { datum.value / total } else { 0.0 });
        let sweep = share as f32 * TAU;
        let color = pastel(i);
        let d = slice_path(cx, cy, r, angle, angle + sweep);
        svg = svg.path(&d, Some(color), Some(Rgba::WHITE), 1.5);

        let mid = angle + sweep / 2.0;
        svg = svg.text_anchored(
            cx + r * 0.62 * mid.cos(),
            cy + r * 0.62 * mid.sin() + 4.0,
            &format::percent(share),
            LABEL_SIZE,
            Rgba::SLATE,
            TextAnchor::Middle,
        );

        let legend_y = TOP + 20.0 + 22.0 * i as f32;
        svg = svg.rect(380.0, legend_y - 10.0, 12.0, 12.0, color).text(
            398.0,
            legend_y,
            &format!("{} {}", truncate(&datum.key, 24), format::percent(share)),
            LABEL_SIZE + 1.0,
            Rgba::SLATE,
        );
        angle += sweep;
    }
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Bin, ChartId, Datum, Encoding};

    fn spec(id: ChartId, mark: Mark, data: Vec<Datum>) -> ChartResult {
        ChartResult::Chart(ChartSpec {
            id,
            title: id.title().to_string(),
            mark,
            x: Encoding::new("x", "Eixo X"),
            y: Encoding::new("y", "Eixo Y"),
            color: None,
            data,
            palette: Palette::Pastel,
            note: None,
        })
    }

    #[test]
    fn test_placeholder_panel() {
        let svg = render(&ChartResult::InsufficientData { id: ChartId::TopCountries }).render();
        assert!(svg.contains(INSUFFICIENT_DATA));
        assert!(svg.contains(ChartId::TopCountries.title()));
    }

    #[test]
    fn test_vertical_bars_one_rect_per_datum() {
        let result = spec(
            ChartId::YearDistribution,
            Mark::Bar { orientation: Orientation::Vertical },
            vec![Datum::new("2023", 3.0), Datum::new("2024", 5.0)],
        );
        let svg = render(&result).render();
        // background + bars
        assert_eq!(svg.matches("<rect").count(), 3);
        assert!(svg.contains(">2023<"));
        assert!(svg.contains("Eixo X"));
    }

    #[test]
    fn test_horizontal_bars_labels() {
        let result = spec(
            ChartId::TopRolesBySalary,
            Mark::Bar { orientation: Orientation::Horizontal },
            vec![Datum::new("ML Engineer", 150_000.0), Datum::new("Data Analyst", 90_000.0)],
        );
        let svg = render(&result).render();
        assert!(svg.contains("ML Engineer"));
        assert!(svg.contains("150k"));
    }

    #[test]
    fn test_histogram_draws_bins() {
        let data = (0..4)
            .map(|i| Datum {
                key: format!("b{i}"),
                value: f64::from(i),
                bin: Some(Bin {
                    start: f64::from(i) * 10.0,
                    end: f64::from(i + 1) * 10.0,
                    count: i as usize,
                }),
                share: None,
            })
            .collect();
        let result = spec(ChartId::SalaryHistogram, Mark::Histogram { bins: 4 }, data);
        let svg = render(&result).render();
        assert_eq!(svg.matches("<rect").count(), 5);
    }

    #[test]
    fn test_tile_map_note_and_legend() {
        let ChartResult::Chart(mut map) = spec(
            ChartId::RoleSalaryMap,
            Mark::Choropleth,
            vec![Datum::new("USA", 200_000.0), Datum::new("BRA", 60_000.0)],
        ) else {
            unreachable!()
        };
        map.palette = Palette::YlGnBu { min: 60_000.0, max: 200_000.0 };
        map.note = Some("nota <importante>".to_string());

        let svg = render(&ChartResult::Chart(map)).render();
        assert!(svg.contains(">USA<"));
        assert!(svg.contains("&lt;importante&gt;"));
        assert!(svg.contains("200k"));
    }

    #[test]
    fn test_tile_grid_stays_above_legend() {
        let (grid_w, grid_h) = (552.0, 266.0);
        for n in [0, 1, 8, 56, 57, 120, 250] {
            let (columns, tile_w, tile_h) = tile_grid(n, grid_w, grid_h);
            let rows = n.div_ceil(columns);
            assert!(rows as f32 * tile_h <= grid_h + 1e-3, "n = {n}");
            assert!(columns as f32 * tile_w <= grid_w + 1e-3, "n = {n}");
            assert!(tile_h <= TILE_MAX_H && tile_h >= TILE_MIN_H, "n = {n}");
        }
        // Few countries keep the full-size tiles
        assert_eq!(tile_grid(16, grid_w, grid_h), (8, 69.0, 36.0));
    }

    #[test]
    fn test_tile_map_many_countries() {
        let data =
            (0..120).map(|i| Datum::new(format!("C{i:03}"), f64::from(i) * 1_000.0)).collect();
        let svg = render(&spec(ChartId::RoleSalaryMap, Mark::Choropleth, data)).render();
        assert!(svg.contains(">C000<"));
        assert!(svg.contains(">C119<"));
        // Short tiles drop the value line
        assert!(!svg.contains(">118k<"));

        let legend_y = HEIGHT as f32 - BOTTOM - 12.0;
        let (columns, _, tile_h) = tile_grid(120, 552.0, legend_y - 18.0 - TOP);
        let grid_bottom = TOP + tile_h * 120_usize.div_ceil(columns) as f32;
        assert!(grid_bottom <= legend_y - 18.0 + 1e-3);
    }

    #[test]
    fn test_pie_slices_and_percent_labels() {
        let mut remote = Datum::new("remoto", 3.0);
        remote.share = Some(0.75);
        let mut office = Datum::new("presencial", 1.0);
        office.share = Some(0.25);

        let svg = render(&spec(ChartId::ModalityShare, Mark::Pie, vec![remote, office])).render();
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains("remoto 75.0%"));
        assert!(svg.contains("presencial 25.0%"));
    }

    #[test]
    fn test_single_slice_is_full_circle() {
        let path = slice_path(0.0, 0.0, 10.0, -FRAC_PI_2, -FRAC_PI_2 + TAU);
        assert_eq!(path.matches(" A ").count(), 2);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abc", 5), "abc");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }
}
