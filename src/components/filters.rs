//! Filter Controls
//!
//! The date-range control and dropdown selectors shared by every chart
//! view, all bound to one `FilterSelection` signal.

use leptos::*;

use crate::api::Robot;
use crate::state::filters::{
    interval_options, object_options, robot_options, site_options, DateRange, FilterSelection,
    Interval, SelectOption,
};

/// Filter bar for one chart view: date range on the left, the four
/// dropdowns on the right. Option lists are built once on mount from
/// the reference lists.
#[component]
pub fn FilterBar(
    robots: Vec<Robot>,
    sites: Vec<String>,
    objects: Vec<String>,
    selection: RwSignal<FilterSelection>,
) -> impl IntoView {
    let robot_opts = robot_options(&robots);
    let site_opts = site_options(&sites);
    let object_opts = object_options(&objects);

    view! {
        <div class="lg:grid lg:grid-cols-2 gap-6 mb-6">
            <DateRangeControl
                range=Signal::derive(move || selection.get().range)
                on_change=move |range| selection.update(|s| s.range = range)
            />

            <div>
                <FilterSelect
                    label="Interval"
                    options=interval_options()
                    value=Signal::derive(move || selection.get().interval.as_str().to_string())
                    on_change=move |value: String| {
                        if let Some(interval) = Interval::parse(&value) {
                            selection.update(|s| s.interval = interval);
                        }
                    }
                />
                <FilterSelect
                    label="Robot"
                    options=robot_opts
                    value=Signal::derive(move || selection.get().robot_id.clone())
                    on_change=move |value| selection.update(|s| s.robot_id = value)
                />
                <FilterSelect
                    label="Site"
                    options=site_opts
                    value=Signal::derive(move || selection.get().site.clone())
                    on_change=move |value| selection.update(|s| s.site = value)
                />
                <FilterSelect
                    label="Pick Object"
                    options=object_opts
                    value=Signal::derive(move || selection.get().pick_object.clone())
                    on_change=move |value| selection.update(|s| s.pick_object = value)
                />
            </div>
        </div>
    }
}

/// One labelled dropdown bound to a single selection field.
#[component]
fn FilterSelect(
    label: &'static str,
    options: Vec<SelectOption>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="block text-sm text-gray-400 mt-2">
            {label}
            <select
                on:change=move |ev| on_change.call(event_target_value(&ev))
                prop:value=move || value.get()
                class="w-full bg-gray-700 rounded-lg px-4 py-2 text-white
                       border border-gray-600 focus:border-primary-500 focus:outline-none"
            >
                {options.into_iter().map(|opt| view! {
                    <option value=opt.value.clone()>{opt.label}</option>
                }).collect_view()}
            </select>
        </label>
    }
}

/// Start/end date inputs. Edits that fail to parse, or that would put
/// the start after the end, are ignored.
#[component]
fn DateRangeControl(
    #[prop(into)] range: Signal<DateRange>,
    #[prop(into)] on_change: Callback<DateRange>,
) -> impl IntoView {
    let on_start = move |ev: web_sys::Event| {
        if let Ok(start) = event_target_value(&ev).parse() {
            let current = range.get_untracked();
            if start <= current.end {
                on_change.call(DateRange { start, ..current });
            }
        }
    };
    let on_end = move |ev: web_sys::Event| {
        if let Ok(end) = event_target_value(&ev).parse() {
            let current = range.get_untracked();
            if current.start <= end {
                on_change.call(DateRange { end, ..current });
            }
        }
    };

    view! {
        <div class="flex items-end space-x-4">
            <label class="block text-sm text-gray-400">
                "From"
                <input
                    type="date"
                    prop:value=move || range.get().start.format("%Y-%m-%d").to_string()
                    on:change=on_start
                    class="w-full bg-gray-700 rounded-lg px-4 py-2 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </label>
            <label class="block text-sm text-gray-400">
                "To"
                <input
                    type="date"
                    prop:value=move || range.get().end.format("%Y-%m-%d").to_string()
                    on:change=on_end
                    class="w-full bg-gray-700 rounded-lg px-4 py-2 text-white
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </label>
        </div>
    }
}
