use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unknown SKU_ID category: {0}")]
    UnknownSku(String),
    #[error("unknown Warehouse_ID category: {0}")]
    UnknownWarehouse(String),
}

/// Pre-fitted one-hot encoder for the (SKU_ID, Warehouse_ID) pair, loaded
/// once at startup from a JSON artifact exported alongside the model. The
/// category lists are frozen; an identifier outside them is an encode error.
#[derive(Debug, Clone, Deserialize)]
pub struct OneHotEncoder {
    sku_categories: Vec<String>,
    warehouse_categories: Vec<String>,
}

impl OneHotEncoder {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening encoder artifact {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing encoder artifact {}", path.display()))
    }

    pub fn new(sku_categories: Vec<String>, warehouse_categories: Vec<String>) -> Self {
        Self {
            sku_categories,
            warehouse_categories,
        }
    }

    /// Width of the encoded vector: one column per fitted category.
    pub fn width(&self) -> usize {
        self.sku_categories.len() + self.warehouse_categories.len()
    }

    pub fn sku_count(&self) -> usize {
        self.sku_categories.len()
    }

    pub fn warehouse_count(&self) -> usize {
        self.warehouse_categories.len()
    }

    /// Encode one pair into a fixed-width 0/1 vector: SKU columns first,
    /// then warehouse columns, matching the fitted column order.
    pub fn transform(&self, sku: &str, warehouse: &str) -> Result<Vec<f32>, EncodeError> {
        let sku_idx = self
            .sku_categories
            .iter()
            .position(|c| c == sku)
            .ok_or_else(|| EncodeError::UnknownSku(sku.to_string()))?;
        let warehouse_idx = self
            .warehouse_categories
            .iter()
            .position(|c| c == warehouse)
            .ok_or_else(|| EncodeError::UnknownWarehouse(warehouse.to_string()))?;

        let mut encoded = vec![0.0; self.width()];
        encoded[sku_idx] = 1.0;
        encoded[self.sku_categories.len() + warehouse_idx] = 1.0;
        Ok(encoded)
    }
}
