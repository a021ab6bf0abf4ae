//! Hours View
//!
//! Operating hours per interval bucket from the tasks series. Values
//! arrive as seconds and are plotted raw; the tooltip derives hours.

use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::api::{self, ApiConfig, Robot, TasksResponse};
use crate::components::{ChartData, ComposedChart, FilterBar, Layer, LayerKind, Loading};
use crate::state::filters::{FilterSelection, Interval};
use crate::state::notify::Notifications;

/// Hours view component
#[component]
pub fn Hours(robots: Vec<Robot>, sites: Vec<String>, objects: Vec<String>) -> impl IntoView {
    let config = use_context::<ApiConfig>().expect("ApiConfig not found");
    let notify = use_context::<Notifications>().expect("Notifications not found");

    let selection = create_rw_signal(FilterSelection::new(Interval::Daily, 7));
    let data = create_rw_signal(None::<TasksResponse>);
    let generation = Rc::new(Cell::new(0u64));

    create_effect(move |_| {
        let sel = selection.get();
        generation.set(generation.get() + 1);
        let issued = generation.get();

        let generation = Rc::clone(&generation);
        let config = config.clone();
        spawn_local(async move {
            match api::fetch_tasks(&config, &sel).await {
                Ok(resp) => {
                    if generation.get() == issued {
                        data.set(Some(resp));
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Error fetching tasks data: {}", e).into(),
                    );
                    notify.show_error(&format!("Failed to load hours data: {}", e));
                }
            }
        });
    });

    let ready = create_memo(move |_| data.with(|d| d.is_some()));

    view! {
        <div>
            {move || if !ready.get() {
                view! { <Loading /> }.into_view()
            } else {
                let robots = robots.clone();
                let sites = sites.clone();
                let objects = objects.clone();
                view! {
                    <div>
                        <FilterBar robots=robots sites=sites objects=objects selection=selection />
                        {move || data.get().map(|resp| view! {
                            <ComposedChart data=hours_chart(&resp) />
                        })}
                    </div>
                }.into_view()
            }}
        </div>
    }
}

fn hours(seconds: i64) -> String {
    format!("{:.2} h", seconds as f64 / 3600.0)
}

fn hours_chart(resp: &TasksResponse) -> ChartData {
    ChartData {
        categories: resp.series.iter().map(|p| p.date.clone()).collect(),
        layers: vec![
            Layer {
                name: "Accumulated Operation Hours",
                kind: LayerKind::Area,
                color: "#8884d8",
                values: resp
                    .series
                    .iter()
                    .map(|p| p.accumulating_total_duration as f64)
                    .collect(),
            },
            Layer {
                name: "Operation Hours",
                kind: LayerKind::Bar,
                color: "#413ea0",
                values: resp.series.iter().map(|p| p.total_duration as f64).collect(),
            },
            Layer {
                name: "Picks Duration",
                kind: LayerKind::Bar,
                color: "#ff0000",
                values: resp
                    .series
                    .iter()
                    .map(|p| p.total_successful_picks_duration as f64)
                    .collect(),
            },
        ],
        y_domain: None,
        tooltips: resp
            .series
            .iter()
            .map(|p| {
                vec![
                    format!("Date: {}", p.date),
                    format!("Accum Op Hours: {}", hours(p.accumulating_total_duration)),
                    format!("Op Hours: {}", hours(p.total_duration)),
                    format!("Picks Duration: {}", hours(p.total_successful_picks_duration)),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TaskPoint;

    fn response() -> TasksResponse {
        TasksResponse {
            series: vec![TaskPoint {
                date: "2024-01-01".to_string(),
                total_tasks: 4,
                total_duration: 3600,
                total_successful_picks_duration: 1800,
                accumulating_total_duration: 3600,
            }],
        }
    }

    #[test]
    fn test_chart_has_area_and_two_bars() {
        let chart = hours_chart(&response());
        assert_eq!(chart.categories, vec!["2024-01-01"]);
        let kinds: Vec<_> = chart.layers.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![LayerKind::Area, LayerKind::Bar, LayerKind::Bar]
        );
        assert_eq!(chart.layers[0].values, vec![3600.0]);
        assert_eq!(chart.layers[1].values, vec![3600.0]);
        assert_eq!(chart.layers[2].values, vec![1800.0]);
        assert_eq!(chart.y_domain, None);
    }

    #[test]
    fn test_tooltip_derives_hours() {
        let chart = hours_chart(&response());
        assert_eq!(
            chart.tooltips[0],
            vec![
                "Date: 2024-01-01",
                "Accum Op Hours: 1.00 h",
                "Op Hours: 1.00 h",
                "Picks Duration: 0.50 h"
            ]
        );
    }

    #[test]
    fn test_hours_formatting() {
        assert_eq!(hours(3600), "1.00 h");
        assert_eq!(hours(5400), "1.50 h");
        assert_eq!(hours(0), "0.00 h");
    }
}
