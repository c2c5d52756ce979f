//! Transaction payload structs
//!
//! Mirrors the backend's print endpoint contract, Indonesian field names
//! included. The payload arrives fully resolved; this crate never fetches.

use crate::error::{PrintError, PrintResult};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// One sold sparepart line
#[derive(Debug, Clone, Deserialize)]
pub struct LineItem {
    pub nama_sperpat: String,
    pub jumlah: u32,
    pub harga_jual: i64,
    pub subtotal: i64,
}

/// A completed sale as delivered by the backend
///
/// Amounts are whole rupiah. `subtotal` and `uang_kembalian` are computed
/// upstream; the receipt renders them as received, except the subtotal
/// line which is recomputed from the items.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub nama_pelanggan: String,
    #[serde(default)]
    pub nama_mekanik: Option<String>,
    pub items: Vec<LineItem>,
    /// Installation fee, zero when no installation was done
    #[serde(default)]
    pub ongkos_pasang: i64,
    pub total_pembayaran: i64,
    pub uang_masuk: i64,
    pub uang_kembalian: i64,
}

impl Transaction {
    /// Fail fast on payloads that violate upstream invariants
    pub fn validate(&self) -> PrintResult<()> {
        for (i, item) in self.items.iter().enumerate() {
            if item.jumlah == 0 {
                return Err(PrintError::MalformedTransaction(format!(
                    "item {} ({}) has zero quantity",
                    i + 1,
                    item.nama_sperpat
                )));
            }
        }
        if self.ongkos_pasang < 0 {
            return Err(PrintError::MalformedTransaction(
                "negative installation fee".to_string(),
            ));
        }
        Ok(())
    }
}
