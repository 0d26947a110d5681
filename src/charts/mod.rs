//! Charts module - static PNG and interactive HTML rendering

mod interactive;
mod renderer;

pub use interactive::{
    render_dashboard, render_margin_distribution, render_profit_by_region, render_revenue_trend,
};
pub use renderer::{
    render_margin_bar, render_monthly_heatmap, render_revenue_trend_png,
    render_units_profit_scatter,
};

use crate::data::SalesRecord;

/// Series colour palette shared by the static and interactive renderers.
pub const PALETTE: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (255, 87, 34),   // Deep Orange
    (96, 125, 139),  // Blue Grey
];

pub fn palette_rgb(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

pub fn palette_hex(index: usize) -> String {
    let (r, g, b) = palette_rgb(index);
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Confectionary types in first-encounter order, one chart series each.
pub(crate) fn confectionary_types(records: &[SalesRecord]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for r in records {
        if !types.contains(&r.confectionary) {
            types.push(r.confectionary.clone());
        }
    }
    types
}
