use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use log::debug;

use crate::encoder::OneHotEncoder;
use crate::error::ApiError;
use crate::features::calendar_features;
use crate::inference::StockModel;
use crate::models::{ForecastRecord, InventoryRecord};

/// Forecast horizon: the 10 calendar days after the newest input date.
pub const HORIZON_DAYS: i64 = 10;

/// Non-categorical model input columns, in the order the model expects them.
/// The encoder's one-hot columns follow these.
pub const NUMERIC_COLUMNS: [&str; 7] = [
    "Price",
    "Stock_On_Hand",
    "Festival",
    "day_of_week",
    "month",
    "week_of_year",
    "is_weekend",
];

fn feature_row(baseline: &InventoryRecord, date: NaiveDate, encoded: &[f32]) -> Vec<f32> {
    let cal = calendar_features(date);
    let mut row = Vec::with_capacity(NUMERIC_COLUMNS.len() + encoded.len());
    row.extend_from_slice(&[
        baseline.price,
        baseline.stock_on_hand,
        // Festival is a known placeholder: future dates are always encoded
        // as non-festival.
        0.0,
        cal.day_of_week as f32,
        cal.month as f32,
        cal.week_of_year as f32,
        cal.is_weekend as f32,
    ]);
    row.extend_from_slice(encoded);
    row
}

/// Produce a 10-day forecast for every (SKU, warehouse) pair in the input.
///
/// The last row encountered in each pair is the baseline; its price and
/// stock-on-hand are carried forward unchanged across all future dates.
/// Pairs are emitted in sorted key order, dates chronologically within a
/// pair. The encoder runs once per pair since the identifiers do not vary
/// across the horizon.
pub fn forecast(
    records: &[InventoryRecord],
    encoder: &OneHotEncoder,
    model: &dyn StockModel,
) -> Result<Vec<ForecastRecord>, ApiError> {
    // A header-only upload has no pairs to forecast: zero groups, zero
    // predictions, not an error.
    let Some(last_date) = records.iter().map(|r| r.ds).max() else {
        return Ok(Vec::new());
    };

    let mut groups: BTreeMap<(String, String), &InventoryRecord> = BTreeMap::new();
    for record in records {
        groups.insert((record.sku_id.clone(), record.warehouse_id.clone()), record);
    }
    debug!(
        "forecasting {} pairs over {} days from {}",
        groups.len(),
        HORIZON_DAYS,
        last_date
    );

    let mut predictions = Vec::with_capacity(groups.len() * HORIZON_DAYS as usize);
    for ((sku, warehouse), baseline) in &groups {
        let encoded = encoder.transform(sku, warehouse)?;

        for offset in 1..=HORIZON_DAYS {
            let date = last_date + Duration::days(offset);
            let row = feature_row(baseline, date, &encoded);
            let value = model
                .predict(&row)
                .map_err(|e| ApiError::Internal(format!("prediction failed: {e}")))?;

            predictions.push(ForecastRecord {
                date: date.format("%Y-%m-%d").to_string(),
                sku_id: sku.clone(),
                warehouse_id: warehouse.clone(),
                predicted_stock: value,
            });
        }
    }
    Ok(predictions)
}
