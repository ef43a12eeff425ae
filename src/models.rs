use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical inventory row from the uploaded CSV. Lives only for the
/// duration of the request that carried it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InventoryRecord {
    pub ds: NaiveDate,
    #[serde(rename = "SKU_ID")]
    pub sku_id: String,
    #[serde(rename = "Warehouse_ID")]
    pub warehouse_id: String,
    #[serde(rename = "Price")]
    pub price: f32,
    #[serde(rename = "Stock_On_Hand")]
    pub stock_on_hand: f32,
    #[serde(rename = "Festival")]
    pub festival: f32,
}

/// A single forecast: one (SKU, warehouse) pair on one future date.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ForecastRecord {
    pub date: String,
    #[serde(rename = "SKU_ID")]
    pub sku_id: String,
    #[serde(rename = "Warehouse_ID")]
    pub warehouse_id: String,
    pub predicted_stock: f32,
}

#[derive(Debug, Serialize)]
pub struct PredictionsResponse {
    pub predictions: Vec<ForecastRecord>,
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub input_width: usize,
    pub numeric_columns: Vec<String>,
    pub sku_categories: usize,
    pub warehouse_categories: usize,
}
