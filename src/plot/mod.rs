//! Terminal plotting.

pub mod ascii;

pub use ascii::render_attribution_chart;
