//! Sync Panel
//!
//! Destination table with a manual per-row sync action. Row status is
//! transient click state; `last_sync` always reflects the most recent
//! destination list from the server.

use leptos::*;

use crate::api::{self, ApiConfig, Destination};
use crate::components::{InlineLoading, Loading};
use crate::state::notify::Notifications;

/// Per-row sync state. A row leaves `Synced` or `Failed` only through
/// a new attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SyncStatus {
    Idle,
    Syncing,
    Synced,
    Failed,
}

impl SyncStatus {
    /// Inline label and text class, if this state shows one.
    fn label(self) -> Option<(&'static str, &'static str)> {
        match self {
            SyncStatus::Synced => Some(("Success", "text-green-400")),
            SyncStatus::Failed => Some(("Offline", "text-red-400")),
            SyncStatus::Idle | SyncStatus::Syncing => None,
        }
    }
}

fn after_attempt(ok: bool) -> SyncStatus {
    if ok {
        SyncStatus::Synced
    } else {
        SyncStatus::Failed
    }
}

/// Sync panel component
#[component]
pub fn Sync() -> impl IntoView {
    let config = use_context::<ApiConfig>().expect("ApiConfig not found");
    let destinations = create_rw_signal(None::<Vec<Destination>>);

    let reload = Callback::new(move |_: ()| {
        let config = config.clone();
        spawn_local(async move {
            match api::fetch_destinations(&config).await {
                Ok(list) => destinations.set(Some(list)),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Error fetching destinations: {}", e).into(),
                    );
                }
            }
        });
    });

    // Initial load on mount
    let reload_for_mount = reload.clone();
    create_effect(move |_| reload_for_mount.call(()));

    let ready = create_memo(move |_| destinations.with(|d| d.is_some()));

    view! {
        <div class="relative overflow-x-auto">
            {move || if !ready.get() {
                view! { <Loading /> }.into_view()
            } else {
                let reload = reload.clone();
                view! {
                    <table class="w-full text-sm text-left">
                        <thead class="text-xs text-gray-400 uppercase bg-gray-800">
                            <tr>
                                <th class="px-6 py-3">"Name"</th>
                                <th class="px-6 py-3">"Address"</th>
                                <th class="px-6 py-3">"Action"</th>
                                <th class="px-6 py-3">"Last Sync"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || destinations.get().unwrap_or_default()
                                key=|d| d.robot_id.clone()
                                children=move |des: Destination| {
                                    // Rows keep their click state across list
                                    // refreshes; last_sync tracks the list.
                                    let robot_id = des.robot_id.clone();
                                    let last_sync = Signal::derive(move || {
                                        destinations.get().and_then(|list| {
                                            list.iter()
                                                .find(|d| d.robot_id == robot_id)
                                                .and_then(|d| d.last_sync.clone())
                                        })
                                    });
                                    view! {
                                        <DestinationRow
                                            destination=des
                                            last_sync=last_sync
                                            reload=reload.clone()
                                        />
                                    }
                                }
                            />
                        </tbody>
                    </table>
                }.into_view()
            }}
        </div>
    }
}

/// One destination row with its own sync state machine.
#[component]
fn DestinationRow(
    destination: Destination,
    #[prop(into)] last_sync: Signal<Option<String>>,
    reload: Callback<()>,
) -> impl IntoView {
    let config = use_context::<ApiConfig>().expect("ApiConfig not found");
    let notify = use_context::<Notifications>().expect("Notifications not found");
    let status = create_rw_signal(SyncStatus::Idle);

    let robot_id = destination.robot_id.clone();
    let address = destination.address.clone();
    let name = destination.name.clone();
    let on_sync = move |_| {
        status.set(SyncStatus::Syncing);

        let config = config.clone();
        let robot_id = robot_id.clone();
        let address = address.clone();
        let name = name.clone();
        let reload = reload.clone();
        spawn_local(async move {
            let result = api::trigger_sync(&config, &robot_id, &address).await;
            match &result {
                Ok(()) => notify.show_success(&format!("{} synced", name)),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Error syncing {}: {}", robot_id, e).into(),
                    );
                }
            }
            status.set(after_attempt(result.is_ok()));

            // The list refreshes after every attempt, success or not.
            reload.call(());
        });
    };

    view! {
        <tr class="border-b border-gray-700">
            <td class="px-6 py-4">{destination.name.clone()}</td>
            <td class="px-6 py-4">{destination.address.clone()}</td>
            <td class="px-6 py-4">
                <div class="flex items-center">
                    <button
                        on:click=on_sync
                        class="bg-gray-700 hover:bg-gray-600 px-4 py-2 rounded-full
                               shadow-md transition-colors"
                    >
                        "Sync"
                    </button>
                    {move || match status.get() {
                        SyncStatus::Syncing => view! { <InlineLoading /> }.into_view(),
                        s => s
                            .label()
                            .map(|(text, class)| view! {
                                <span class=format!("ml-2 {}", class)>{text}</span>
                            })
                            .into_view(),
                    }}
                </div>
            </td>
            <td class="px-6 py-4">
                {move || last_sync.get().unwrap_or_else(|| "Never".to_string())}
            </td>
        </tr>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attempt_outcome() {
        assert_eq!(after_attempt(true), SyncStatus::Synced);
        assert_eq!(after_attempt(false), SyncStatus::Failed);
    }

    #[test]
    fn test_only_terminal_states_show_labels() {
        assert_eq!(SyncStatus::Idle.label(), None);
        assert_eq!(SyncStatus::Syncing.label(), None);
        assert_eq!(
            SyncStatus::Synced.label(),
            Some(("Success", "text-green-400"))
        );
        assert_eq!(
            SyncStatus::Failed.label(),
            Some(("Offline", "text-red-400"))
        );
    }
}
