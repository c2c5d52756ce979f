//! Static shop and paper configuration
//!
//! Provided at deploy time (e.g. a JSON file next to the binary), never
//! fetched per print. The printer core takes these as explicit inputs so
//! no application-global state leaks into it.

use serde::Deserialize;

/// Shop identity printed in the receipt header and footer
#[derive(Debug, Clone, Deserialize)]
pub struct ShopConfig {
    pub name: String,
    pub tagline: String,
    pub address: String,
    pub phone: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: "TOKO LAMRO MOTOR".to_string(),
            tagline: "SPAREPART & SERVICE".to_string(),
            address: "JLN SIMODULYO PASAR 8".to_string(),
            phone: "085370352533".to_string(),
        }
    }
}

/// Paper geometry
///
/// Common widths:
/// - 58mm paper: 32 characters
/// - 80mm paper: 48 characters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaperConfig {
    /// Printable line width in characters for the normal font
    pub line_width: usize,
}

impl PaperConfig {
    pub fn new(line_width: usize) -> Self {
        Self { line_width }
    }
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self { line_width: 32 }
    }
}
