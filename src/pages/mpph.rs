//! MPPH View
//!
//! Picks-per-hour throughput as a line series. The rate itself and its
//! exclusion rules are computed server-side; the footer only documents
//! them.

use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::api::{self, ApiConfig, PicksResponse, Robot};
use crate::components::{ChartData, ComposedChart, FilterBar, Layer, LayerKind, Loading};
use crate::state::filters::{FilterSelection, Interval};
use crate::state::notify::Notifications;

/// MPPH view component
#[component]
pub fn Mpph(robots: Vec<Robot>, sites: Vec<String>, objects: Vec<String>) -> impl IntoView {
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
                    notify.show_error(&format!("Failed to load MPPH data: {}", e));
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
                            <ComposedChart data=mpph_chart(&resp) />
                        })}

                        // Exclusions applied server-side to the rate
                        <div class="text-sm text-gray-400 mt-6">
                            "Picks with following properties are ignored in the calculation -"
                            <ul class="list-disc list-inside mt-1">
                                <li>"Failed picks"</li>
                                <li>"Picks with duration longer than 5s"</li>
                                <li>"Picks with duration less than 1s"</li>
                            </ul>
                        </div>
                    </div>
                }.into_view()
            }}
        </div>
    }
}

fn mpph_chart(resp: &PicksResponse) -> ChartData {
    ChartData {
        categories: resp.series.iter().map(|p| p.date.clone()).collect(),
        layers: vec![Layer {
            name: "MPPH",
            kind: LayerKind::Line,
            color: "#00FF00",
            values: resp.series.iter().map(|p| p.mpph).collect(),
        }],
        y_domain: Some((resp.min_mpph, resp.max_mpph)),
        tooltips: resp
            .series
            .iter()
            .map(|p| {
                vec![
                    format!("Date: {}", p.date),
                    format!("MPPH: {}", p.mpph),
                    format!("Total Duration: {}s", p.total_duration),
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
            series: vec![PickPoint {
                date: "2024-03-04".to_string(),
                mpph: 312.0,
                total_duration: 7200,
                total_picks: 640,
                ..Default::default()
            }],
            min_mpph: 300.0,
            max_mpph: 320.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_line_layer_with_server_domain() {
        let chart = mpph_chart(&response());
        assert_eq!(chart.layers.len(), 1);
        assert_eq!(chart.layers[0].kind, LayerKind::Line);
        assert_eq!(chart.layers[0].values, vec![312.0]);
        assert_eq!(chart.y_domain, Some((300.0, 320.0)));
    }

    #[test]
    fn test_tooltip_shows_raw_values() {
        let chart = mpph_chart(&response());
        assert_eq!(
            chart.tooltips[0],
            vec![
                "Date: 2024-03-04",
                "MPPH: 312",
                "Total Duration: 7200s",
                "Total Picks: 640"
            ]
        );
    }
}
