//! Tonnes View
//!
//! Tonnage moved per interval bucket, with an accumulating area
//! overlay. The y-axis is bounded by the server-supplied accumulated
//! tonnage extent.

use std::cell::Cell;
use std::rc::Rc;

use leptos::*;

use crate::api::{self, ApiConfig, PicksResponse, Robot};
use crate::components::{ChartData, ComposedChart, FilterBar, Layer, LayerKind, Loading};
use crate::state::filters::{FilterSelection, Interval};
use crate::state::notify::Notifications;

/// Tonnes view component
#[component]
pub fn Tonnes(robots: Vec<Robot>, sites: Vec<String>, objects: Vec<String>) -> impl IntoView {
    let config = use_context::<ApiConfig>().expect("ApiConfig not found");
    let notify = use_context::<Notifications>().expect("Notifications not found");

    let selection = create_rw_signal(FilterSelection::new(Interval::Weekly, 365));
    let data = create_rw_signal(None::<PicksResponse>);

    // Request generation: a late response from a superseded selection
    // is dropped instead of overwriting newer data.
    let generation = Rc::new(Cell::new(0u64));

    // One fetch per selection change, carrying the full selection.
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
                    notify.show_error(&format!("Failed to load tonnes data: {}", e));
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
                            <ComposedChart data=tonnes_chart(&resp) />
                        })}
                    </div>
                }.into_view()
            }}
        </div>
    }
}

fn tonnes_chart(resp: &PicksResponse) -> ChartData {
    ChartData {
        categories: resp.series.iter().map(|p| p.date.clone()).collect(),
        layers: vec![
            Layer {
                name: "Accumulating Tonnes",
                kind: LayerKind::Area,
                color: "#8884d8",
                values: resp.series.iter().map(|p| p.accumulated_tonnes).collect(),
            },
            Layer {
                name: "Total Tonnes",
                kind: LayerKind::Bar,
                color: "#413ea0",
                values: resp.series.iter().map(|p| p.tonnes).collect(),
            },
        ],
        y_domain: Some((resp.min_accumulated_tonnes, resp.max_accumulated_tonnes)),
        tooltips: resp
            .series
            .iter()
            .map(|p| {
                vec![
                    format!("Date: {}", p.date),
                    format!("Accumulating Tonnes: {}", p.accumulated_tonnes),
                    format!("Total Tonnes: {}", p.tonnes),
                ]
            })
            .collect(),
    }
}
