//! Composed Chart Component
//!
//! Category-axis time-series chart on HTML5 Canvas. A chart is a stack
//! of layers (area, bar, line) over one shared category axis, with a
//! hover tooltip and a legend.

use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const CANVAS_WIDTH: f64 = 800.0;
const CANVAS_HEIGHT: f64 = 400.0;

// Margins
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;

const CHART_WIDTH: f64 = CANVAS_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
const CHART_HEIGHT: f64 = CANVAS_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;

const MAX_BAR_WIDTH: f64 = 20.0;
const MAX_X_LABELS: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Area,
    Bar,
    Line,
}

/// One series drawn over the shared category axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub name: &'static str,
    pub kind: LayerKind,
    pub color: &'static str,
    pub values: Vec<f64>,
}

/// Everything the chart needs: x-axis categories (series dates, used
/// verbatim), the layers, an optional fixed y-domain, and one block of
/// tooltip lines per category index.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub layers: Vec<Layer>,
    pub y_domain: Option<(f64, f64)>,
    pub tooltips: Vec<Vec<String>>,
}

/// Composed chart component
#[component]
pub fn ComposedChart(data: ChartData) -> impl IntoView {
    let legend: Vec<(&'static str, &'static str)> =
        data.layers.iter().map(|l| (l.name, l.color)).collect();

    let canvas_ref = create_node_ref::<html::Canvas>();
    let hover = create_rw_signal(None::<(usize, i32, i32)>);
    let data = store_value(data);

    // Draw once the canvas element is mounted.
    create_effect(move |_| {
        if let Some(canvas) = canvas_ref.get() {
            data.with_value(|d| draw_chart(&canvas, d));
        }
    });

    let on_move = move |ev: web_sys::MouseEvent| {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };
        let client_width = canvas.client_width() as f64;
        let count = data.with_value(|d| d.categories.len());
        hover.set(
            hover_index(ev.offset_x() as f64, client_width, count)
                .map(|idx| (idx, ev.offset_x(), ev.offset_y())),
        );
    };

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="800"
                height="400"
                class="w-full h-64 md:h-96 rounded-lg"
                on:mousemove=on_move
                on:mouseleave=move |_| hover.set(None)
            />

            // Tooltip for the hovered point
            {move || {
                hover.get().and_then(|(idx, x, y)| {
                    data.with_value(|d| d.tooltips.get(idx).cloned()).map(|lines| view! {
                        <div
                            class="absolute z-10 bg-gray-700 border border-gray-600 rounded-lg
                                   px-3 py-2 text-sm shadow-lg pointer-events-none"
                            style=format!("left: {}px; top: {}px", x + 12, y + 12)
                        >
                            {lines.into_iter().map(|line| view! {
                                <p class="whitespace-nowrap">{line}</p>
                            }).collect_view()}
                        </div>
                    })
                })
            }}

            // Legend
            <div class="flex justify-center flex-wrap gap-4 mt-4">
                {legend.into_iter().map(|(name, color)| view! {
                    <div class="flex items-center space-x-2">
                        <div
                            class="w-3 h-3 rounded-full"
                            style=format!("background-color: {}", color)
                        />
                        <span class="text-sm text-gray-300">{name}</span>
                    </div>
                }).collect_view()}
            </div>
        </div>
    }
}

/// Y-axis bounds: the server-supplied domain when it is usable,
/// otherwise the data extent with 10% padding.
fn y_bounds(data: &ChartData) -> (f64, f64) {
    if let Some((min, max)) = data.y_domain {
        if max > min {
            return (min, max);
        }
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for layer in &data.layers {
        for &value in &layer.values {
            min = min.min(value);
            max = max.max(value);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let range = max - min;
    let padding = if range > 0.0 { range * 0.1 } else { 1.0 };
    (min - padding, max + padding)
}

/// Canvas x coordinate of the center of category band `i` of `count`.
fn band_x(i: usize, count: usize) -> f64 {
    MARGIN_LEFT + (i as f64 + 0.5) / count as f64 * CHART_WIDTH
}

/// Map a CSS-pixel mouse offset to a category index, if the cursor is
/// inside the plot area. The canvas is scaled to its container, so
/// offsets are rescaled to canvas coordinates first.
fn hover_index(offset_x: f64, client_width: f64, count: usize) -> Option<usize> {
    if count == 0 || client_width <= 0.0 {
        return None;
    }
    let x = offset_x * (CANVAS_WIDTH / client_width);
    let rel = (x - MARGIN_LEFT) / CHART_WIDTH;
    if !(0.0..1.0).contains(&rel) {
        return None;
    }
    let idx = (rel * count as f64) as usize;
    (idx < count).then_some(idx)
}

fn clamp_y(y: f64) -> f64 {
    y.clamp(MARGIN_TOP, MARGIN_TOP + CHART_HEIGHT)
}

/// Draw the chart on canvas
fn draw_chart(canvas: &HtmlCanvasElement, data: &ChartData) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    // Clear canvas
    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);

    let (y_min, y_max) = y_bounds(data);
    let y_of = |value: f64| {
        clamp_y(MARGIN_TOP + (y_max - value) / (y_max - y_min) * CHART_HEIGHT)
    };

    // Grid lines and y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    for i in 0..=5 {
        let y = MARGIN_TOP + (i as f64 / 5.0) * CHART_HEIGHT;
        ctx.begin_path();
        ctx.move_to(MARGIN_LEFT, y);
        ctx.line_to(CANVAS_WIDTH - MARGIN_RIGHT, y);
        ctx.stroke();

        let value = y_max - (i as f64 / 5.0) * (y_max - y_min);
        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        ctx.set_font("12px sans-serif");
        let _ = ctx.fill_text(&format!("{:.1}", value), 5.0, y + 4.0);
    }

    let count = data.categories.len();
    if count == 0 {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text(
            "No data for selected range",
            CANVAS_WIDTH / 2.0 - 80.0,
            CANVAS_HEIGHT / 2.0,
        );
        return;
    }

    // X-axis category labels, thinned to stay readable
    ctx.set_fill_style(&"#9ca3af".into());
    ctx.set_font("12px sans-serif");
    let step = count.div_ceil(MAX_X_LABELS);
    for (i, category) in data.categories.iter().enumerate() {
        if i % step == 0 {
            let _ = ctx.fill_text(category, band_x(i, count) - 25.0, CANVAS_HEIGHT - 10.0);
        }
    }

    let bottom = MARGIN_TOP + CHART_HEIGHT;
    let bar_count = data
        .layers
        .iter()
        .filter(|l| l.kind == LayerKind::Bar)
        .count();
    let band_width = CHART_WIDTH / count as f64;
    let bar_width = if bar_count > 0 {
        MAX_BAR_WIDTH.min(band_width * 0.8 / bar_count as f64)
    } else {
        0.0
    };

    // Layers draw in declaration order, like the chart they replace.
    let mut bar_idx = 0usize;
    for layer in &data.layers {
        match layer.kind {
            LayerKind::Area => {
                ctx.set_global_alpha(0.35);
                ctx.set_fill_style(&layer.color.into());
                ctx.begin_path();
                for (i, &value) in layer.values.iter().enumerate() {
                    let x = band_x(i, count);
                    if i == 0 {
                        ctx.move_to(x, y_of(value));
                    } else {
                        ctx.line_to(x, y_of(value));
                    }
                }
                ctx.line_to(band_x(count - 1, count), bottom);
                ctx.line_to(band_x(0, count), bottom);
                ctx.close_path();
                ctx.fill();
                ctx.set_global_alpha(1.0);

                ctx.set_stroke_style(&layer.color.into());
                ctx.set_line_width(2.0);
                ctx.begin_path();
                for (i, &value) in layer.values.iter().enumerate() {
                    let x = band_x(i, count);
                    if i == 0 {
                        ctx.move_to(x, y_of(value));
                    } else {
                        ctx.line_to(x, y_of(value));
                    }
                }
                ctx.stroke();
            }
            LayerKind::Bar => {
                let offset = (bar_idx as f64 - (bar_count as f64 - 1.0) / 2.0) * bar_width;
                bar_idx += 1;

                ctx.set_fill_style(&layer.color.into());
                for (i, &value) in layer.values.iter().enumerate() {
                    let top = y_of(value);
                    let x = band_x(i, count) - bar_width / 2.0 + offset;
                    ctx.fill_rect(x, top, bar_width, bottom - top);
                }
            }
            LayerKind::Line => {
                ctx.set_stroke_style(&layer.color.into());
                ctx.set_line_width(2.0);
                ctx.begin_path();
                for (i, &value) in layer.values.iter().enumerate() {
                    let x = band_x(i, count);
                    if i == 0 {
                        ctx.move_to(x, y_of(value));
                    } else {
                        ctx.line_to(x, y_of(value));
                    }
                }
                ctx.stroke();

                // Point markers
                ctx.set_fill_style(&layer.color.into());
                for (i, &value) in layer.values.iter().enumerate() {
                    ctx.begin_path();
                    let _ = ctx.arc(
                        band_x(i, count),
                        y_of(value),
                        3.0,
                        0.0,
                        std::f64::consts::PI * 2.0,
                    );
                    ctx.fill();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(y_domain: Option<(f64, f64)>, values: Vec<f64>) -> ChartData {
        ChartData {
            categories: values.iter().map(|v| v.to_string()).collect(),
            tooltips: values.iter().map(|_| Vec::new()).collect(),
            layers: vec![Layer {
                name: "series",
                kind: LayerKind::Line,
                color: "#00FF00",
                values,
            }],
            y_domain,
        }
    }

    #[test]
    fn test_y_bounds_prefers_server_domain() {
        let data = chart(Some((10.0, 50.0)), vec![0.0, 100.0]);
        assert_eq!(y_bounds(&data), (10.0, 50.0));
    }

    #[test]
    fn test_y_bounds_ignores_degenerate_domain() {
        // min == max (single-bucket series) falls back to the data extent.
        let data = chart(Some((5.0, 5.0)), vec![0.0, 100.0]);
        let (min, max) = y_bounds(&data);
        assert_eq!(min, -10.0);
        assert_eq!(max, 110.0);
    }

    #[test]
    fn test_y_bounds_pads_flat_series() {
        let data = chart(None, vec![4.0, 4.0]);
        assert_eq!(y_bounds(&data), (3.0, 5.0));
    }

    #[test]
    fn test_y_bounds_empty_series() {
        let data = chart(None, Vec::new());
        assert_eq!(y_bounds(&data), (0.0, 1.0));
    }

    #[test]
    fn test_band_centers_are_evenly_spaced() {
        let first = band_x(0, 4);
        let second = band_x(1, 4);
        let last = band_x(3, 4);
        assert!(first > MARGIN_LEFT);
        assert!(last < MARGIN_LEFT + CHART_WIDTH);
        assert!((second - first - CHART_WIDTH / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_hover_index_maps_plot_area() {
        // Canvas rendered at native size: offsets are canvas coordinates.
        assert_eq!(hover_index(MARGIN_LEFT + 1.0, CANVAS_WIDTH, 10), Some(0));
        assert_eq!(
            hover_index(MARGIN_LEFT + CHART_WIDTH - 1.0, CANVAS_WIDTH, 10),
            Some(9)
        );
        // Outside the margins there is no hovered point.
        assert_eq!(hover_index(5.0, CANVAS_WIDTH, 10), None);
        assert_eq!(hover_index(CANVAS_WIDTH, CANVAS_WIDTH, 10), None);
    }

    #[test]
    fn test_hover_index_rescales_css_pixels() {
        // Canvas displayed at half its native width.
        let half = CANVAS_WIDTH / 2.0;
        assert_eq!(
            hover_index((MARGIN_LEFT + 1.0) / 2.0, half, 10),
            Some(0)
        );
    }

    #[test]
    fn test_hover_index_empty_chart() {
        assert_eq!(hover_index(200.0, CANVAS_WIDTH, 0), None);
        assert_eq!(hover_index(200.0, 0.0, 10), None);
    }
}
