pub mod location_card;
pub mod search_overlay;
pub mod temperature_chart;
pub mod trend_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use location_card::{LocationCard, LocationCardProps};
pub use search_overlay::{SearchOverlay, SearchOverlayProps};
pub use temperature_chart::{TemperatureChart, TemperatureChartProps};
pub use trend_display::{ERROR_ICON, TrendDisplay, TrendDisplayProps};
