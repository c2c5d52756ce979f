//! # struk-printer
//!
//! ESC/POS receipt printing for the sparepart shop - layout, encoding,
//! and device transport for one completed sale at a time.
//!
//! ## Scope
//!
//! This crate handles turning a committed transaction into paper:
//! - receipt layout (header, item table, totals, footer)
//! - ESC/POS byte encoding
//! - USB device-node and serial-port transports
//!
//! Fetching the transaction payload, the sales forms, and everything else
//! in the shop application stays outside; the caller hands over a resolved
//! [`Transaction`] plus static [`ShopConfig`].
//!
//! ## Example
//!
//! ```ignore
//! use struk_printer::{print_receipt, PaperConfig, SerialTransport, ShopConfig};
//!
//! let shop = ShopConfig::default();
//! let paper = PaperConfig::default();
//! let mut transport = SerialTransport::new("/dev/ttyUSB0");
//!
//! // transaction fetched by the caller's networking layer
//! print_receipt(&mut transport, &transaction, &shop, &paper).await?;
//! ```

mod config;
mod error;
mod escpos;
mod format;
mod model;
mod printer;
mod receipt;

// Re-exports
pub use config::{PaperConfig, ShopConfig};
pub use error::{PrintError, PrintResult};
pub use escpos::Encoder;
pub use format::{format_amount, pad_left, pad_right, truncate};
pub use model::{LineItem, Transaction};
pub use printer::{print_receipt, SerialTransport, Transport, UsbTransport, DEFAULT_BAUD};
pub use receipt::{build_receipt, Align, Column, Font, LayoutSegment};
