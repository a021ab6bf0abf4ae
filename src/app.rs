//! App Root Component
//!
//! Loads the shared reference data, gates rendering until all of it is
//! present, and switches between the dashboard views via a tab strip.

use leptos::*;

use crate::api::{self, ApiConfig, Robot};
use crate::components::{Loading, Toast};
use crate::pages::{Hours, Mpph, Picks, Sync, Tonnes};
use crate::state::notify::provide_notifications;

/// Dashboard tabs. Exactly one is active; views mount on select.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Sync,
    Tonnes,
    Picks,
    Hours,
    Mpph,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Sync, Tab::Tonnes, Tab::Picks, Tab::Hours, Tab::Mpph];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Sync => "Sync",
            Tab::Tonnes => "Tonnes",
            Tab::Picks => "Picks",
            Tab::Hours => "Hours",
            Tab::Mpph => "MPPH",
        }
    }
}

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Explicit configuration, provided to all components
    let config = ApiConfig::from_window();
    provide_context(config.clone());
    provide_notifications();

    let robots = create_rw_signal(None::<Vec<Robot>>);
    let sites = create_rw_signal(None::<Vec<String>>);
    let objects = create_rw_signal(None::<Vec<String>>);

    // Three independent reference fetches, issued in parallel on mount.
    // Rendering stays gated until all of them have resolved once.
    {
        let config = config.clone();
        spawn_local(async move {
            match api::fetch_robots(&config).await {
                Ok(list) => robots.set(Some(list)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Error fetching robots: {}", e).into());
                }
            }
        });
    }
    {
        let config = config.clone();
        spawn_local(async move {
            match api::fetch_sites(&config).await {
                Ok(list) => sites.set(Some(list)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Error fetching sites: {}", e).into());
                }
            }
        });
    }
    {
        let config = config.clone();
        spawn_local(async move {
            match api::fetch_objects(&config).await {
                Ok(list) => objects.set(Some(list)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Error fetching objects: {}", e).into());
                }
            }
        });
    }

    view! {
        <div class="min-h-screen bg-gray-900 text-white">
            <main class="container mx-auto px-4 py-8">
                // Page header
                <div class="mb-6">
                    <h1 class="text-3xl font-bold">"Fleet Analytics"</h1>
                    <p class="text-gray-400 mt-1">"Picking robot fleet at a glance"</p>
                </div>

                {move || match (robots.get(), sites.get(), objects.get()) {
                    (Some(robots), Some(sites), Some(objects)) => view! {
                        <Dashboard robots=robots sites=sites objects=objects />
                    }.into_view(),
                    _ => view! { <Loading /> }.into_view(),
                }}
            </main>

            // Toast notifications
            <Toast />
        </div>
    }
}

/// Tab strip plus the currently selected view.
#[component]
fn Dashboard(robots: Vec<Robot>, sites: Vec<String>, objects: Vec<String>) -> impl IntoView {
    let active = create_rw_signal(Tab::Sync);

    view! {
        <TabStrip active=active />

        <div class="mt-6">
            {move || {
                let robots = robots.clone();
                let sites = sites.clone();
                let objects = objects.clone();
                match active.get() {
                    Tab::Sync => view! { <Sync /> }.into_view(),
                    Tab::Tonnes => view! {
                        <Tonnes robots=robots sites=sites objects=objects />
                    }.into_view(),
                    Tab::Picks => view! {
                        <Picks robots=robots sites=sites objects=objects />
                    }.into_view(),
                    Tab::Hours => view! {
                        <Hours robots=robots sites=sites objects=objects />
                    }.into_view(),
                    Tab::Mpph => view! {
                        <Mpph robots=robots sites=sites objects=objects />
                    }.into_view(),
                }
            }}
        </div>
    }
}

/// Tab selection strip
#[component]
fn TabStrip(active: RwSignal<Tab>) -> impl IntoView {
    view! {
        <div class="flex space-x-1 border-b border-gray-700">
            {Tab::ALL.into_iter().map(|tab| view! {
                <button
                    on:click=move |_| active.set(tab)
                    class=move || {
                        let base = "px-4 py-2 rounded-t-lg text-sm font-medium transition-colors";
                        if active.get() == tab {
                            format!("{} bg-gray-700 text-white", base)
                        } else {
                            format!("{} text-gray-400 hover:text-white hover:bg-gray-800", base)
                        }
                    }
                >
                    {tab.label()}
                </button>
            }).collect_view()}
        </div>
    }
}
