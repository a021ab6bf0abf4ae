//! Fleet Analytics Dashboard
//!
//! Analytics dashboard for a fleet of warehouse picking robots, built
//! with Leptos (WASM).
//!
//! # Features
//!
//! - Tonnage, pick-count, operating-hour and picks-per-hour charts
//! - Filtering by robot, site, pick object, date range and interval
//! - Manual per-robot destination sync with live status
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles
//! to WebAssembly. It communicates with the fleet REST API over HTTP;
//! all aggregation happens server-side and the frontend only renders
//! the returned series.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
