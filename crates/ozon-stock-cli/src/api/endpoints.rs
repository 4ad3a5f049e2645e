//! API endpoint URL builders

/// Path of the FBO stock report
pub const STOCK_ON_WAREHOUSES_PATH: &str = "/v2/analytics/stock_on_warehouses";

/// Build the stock-on-warehouses URL
pub fn stock_on_warehouses_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), STOCK_ON_WAREHOUSES_PATH)
}
