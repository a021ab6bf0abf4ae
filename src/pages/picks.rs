//! Picks View
//!
//! Pick counts per interval bucket, with an accumulating area overlay.

use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::api::{self, ApiConfig, PicksResponse, Robot};
use crate::components::{ChartData, ComposedChart, FilterBar, Layer, LayerKind, Loading};
use crate::state::filters::{FilterSelection, Interval};
use crate::state::notify::Notifications;

/// Picks view component
#[component]
pub fn Picks(robots: Vec<Robot>, sites: Vec<String>, objects: Vec<String>) -> impl IntoView {
    let config = use_context::<ApiConfig>().expect("ApiConfig not found");
    let notify = use_context::<Notifications>().expect("Notifications not found");

    let selection = create_rw_signal(FilterSelection::new(Interval::Weekly, 365));
    let data = create_rw_signal(None::<PicksResponse>);
    let generation = Rc::new(Cell::new(0u64));

    create_effect(move |_| {
        let sel = selection.get();
        generation.set(generation.get() + 1);
        let issued = generation.get();

        let generation = Rc::clone(&generation);
        let config = config.clone();
        spawn_local(async move {
            match api::fetch_picks(&config, &sel).await {
                Ok(resp) => {
                    if generation.get() == issued {
                        data.set(Some(resp));
                    }
                }
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Error fetching picks data: {}", e).into(),
                    );
                    notify.show_error(&format!("Failed to load picks data: {}", e));
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
                            <ComposedChart data=picks_chart(&resp) />
                        })}
                    </div>
                }.into_view()
            }}
        </div>
    }
}

fn picks_chart(resp: &PicksResponse) -> ChartData {
    ChartData {
        categories: resp.series.iter().map(|p| p.date.clone()).collect(),
        layers: vec![
            Layer {
                name: "Accumulating Picks",
                kind: LayerKind::Area,
                color: "#8884d8",
                values: resp
                    .series
                    .iter()
                    .map(|p| p.accumulated_picks as f64)
                    .collect(),
            },
            Layer {
                name: "Total Picks",
                kind: LayerKind::Bar,
                color: "#413ea0",
                values: resp.series.iter().map(|p| p.total_picks as f64).collect(),
            },
        ],
        y_domain: Some((
            resp.min_accumulated_picks as f64,
            resp.max_accumulated_picks as f64,
        )),
        tooltips: resp
            .series
            .iter()
            .map(|p| {
                vec![
                    format!("Date: {}", p.date),
                    format!("Accumulating Picks: {}", p.accumulated_picks),
                    format!("Total Picks: {}", p.total_picks),
                ]
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PickPoint;

    fn response() -> PicksResponse {
        PicksResponse {
            series: vec![
                PickPoint {
                    date: "2024-02-05".to_string(),
                    total_picks: 120,
                    accumulated_picks: 120,
                    ..Default::default()
                },
                PickPoint {
                    date: "2024-02-12".to_string(),
                    total_picks: 80,
                    accumulated_picks: 200,
                    ..Default::default()
                },
            ],
            min_accumulated_picks: 120,
            max_accumulated_picks: 200,
            ..Default::default()
        }
    }

    #[test]
    fn test_chart_layers_and_domain() {
        let chart = picks_chart(&response());
        assert_eq!(chart.categories, vec!["2024-02-05", "2024-02-12"]);
        assert_eq!(chart.layers[0].values, vec![120.0, 200.0]);
        assert_eq!(chart.layers[1].values, vec![120.0, 80.0]);
        assert_eq!(chart.y_domain, Some((120.0, 200.0)));
    }

    #[test]
    fn test_tooltip_lines() {
        let chart = picks_chart(&response());
        assert_eq!(
            chart.tooltips[0],
            vec![
                "Date: 2024-02-05",
                "Accumulating Picks: 120",
                "Total Picks: 120"
            ]
        );
    }
}
