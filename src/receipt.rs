//! Receipt layout builder
//!
//! Pure mapping from a `Transaction` to an ordered list of protocol-agnostic
//! segments. No I/O happens here; the byte encoding lives in `escpos`.
//!
//! The section order is fixed: header, customer block, item table, totals,
//! footer, cut. Changing it changes every printed receipt.

use crate::config::{PaperConfig, ShopConfig};
use crate::format::{format_amount, pad_right, truncate};
use crate::model::Transaction;

/// Horizontal alignment, persists on the printer until changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Font selection, persists on the printer until changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Normal,
    DoubleWidth,
    DoubleHeight,
    Small,
}

/// One pre-sized table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub text: String,
    pub width_chars: usize,
    pub align: Align,
}

/// Intermediate print instruction, consumed once, front to back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutSegment {
    Text(String),
    SetAlign(Align),
    SetFont(Font),
    TableRow(Vec<Column>),
    Cut,
    FeedLines(u8),
}

/// Item table column proportions of the printable line width
const COL_NO: f64 = 0.1;
const COL_NAME: f64 = 0.4;
const COL_QTY: f64 = 0.2;
const COL_PRICE: f64 = 0.3;

/// Item names are clipped, never wrapped
const NAME_MAX_CHARS: usize = 12;
const CUSTOMER_MAX_CHARS: usize = 20;
const TOTALS_LABEL_WIDTH: usize = 14;

fn col(text: impl Into<String>, width_chars: usize, align: Align) -> Column {
    Column {
        text: text.into(),
        width_chars,
        align,
    }
}

/// Build the full segment sequence for one receipt
///
/// Never fails: an empty item list yields a header-only table and a zero
/// subtotal, and a negative change amount is rendered as received.
pub fn build_receipt(
    tx: &Transaction,
    shop: &ShopConfig,
    paper: &PaperConfig,
) -> Vec<LayoutSegment> {
    let width = paper.line_width;
    let sep = "-".repeat(width);
    let mut out = Vec::with_capacity(tx.items.len() + 32);

    // Header
    out.push(LayoutSegment::SetAlign(Align::Center));
    out.push(LayoutSegment::SetFont(Font::DoubleHeight));
    out.push(LayoutSegment::Text(shop.name.clone()));
    out.push(LayoutSegment::SetFont(Font::Normal));
    out.push(LayoutSegment::Text(shop.tagline.clone()));
    out.push(LayoutSegment::Text(shop.address.clone()));
    out.push(LayoutSegment::Text(shop.phone.clone()));
    out.push(LayoutSegment::Text(format!(
        "No: {}",
        truncate(&tx.id.to_string(), 8)
    )));
    out.push(LayoutSegment::Text(sep.clone()));

    // Customer block
    out.push(LayoutSegment::SetAlign(Align::Left));
    out.push(LayoutSegment::Text(format!(
        "Pelanggan: {}",
        truncate(&tx.nama_pelanggan, CUSTOMER_MAX_CHARS)
    )));
    if let Some(mekanik) = &tx.nama_mekanik {
        out.push(LayoutSegment::Text(format!(
            "Mekanik  : {}",
            truncate(mekanik, CUSTOMER_MAX_CHARS)
        )));
    }
    out.push(LayoutSegment::Text(format!(
        "Tanggal  : {}",
        tx.created_at.format("%d/%m/%Y %H:%M")
    )));
    out.push(LayoutSegment::Text(sep.clone()));

    // Item table, proportions floored against the line width
    let no_w = (COL_NO * width as f64) as usize;
    let name_w = (COL_NAME * width as f64) as usize;
    let qty_w = (COL_QTY * width as f64) as usize;
    let price_w = (COL_PRICE * width as f64) as usize;

    out.push(LayoutSegment::SetFont(Font::Small));
    out.push(LayoutSegment::TableRow(vec![
        col("No", no_w, Align::Left),
        col("Barang", name_w, Align::Left),
        col("Jml", qty_w, Align::Right),
        col("Harga", price_w, Align::Right),
    ]));
    for (i, item) in tx.items.iter().enumerate() {
        out.push(LayoutSegment::TableRow(vec![
            col((i + 1).to_string(), no_w, Align::Left),
            col(truncate(&item.nama_sperpat, NAME_MAX_CHARS), name_w, Align::Left),
            col(item.jumlah.to_string(), qty_w, Align::Right),
            col(format_amount(item.harga_jual), price_w, Align::Right),
        ]));
    }
    out.push(LayoutSegment::SetFont(Font::Normal));
    out.push(LayoutSegment::Text(sep.clone()));

    // Totals; subtotal is recomputed from the items, not read back from
    // total_pembayaran
    let subtotal: i64 = tx
        .items
        .iter()
        .map(|item| item.harga_jual * i64::from(item.jumlah))
        .sum();

    out.push(LayoutSegment::SetAlign(Align::Right));
    out.push(totals_line("Subtotal", subtotal));
    if tx.ongkos_pasang != 0 {
        out.push(totals_line("Ongkos Pasang", tx.ongkos_pasang));
    }
    out.push(totals_line("Total", tx.total_pembayaran));
    out.push(totals_line("Uang Masuk", tx.uang_masuk));
    out.push(totals_line("Kembalian", tx.uang_kembalian));
    out.push(LayoutSegment::Text(sep));

    // Footer
    out.push(LayoutSegment::SetAlign(Align::Center));
    out.push(LayoutSegment::Text("Terima Kasih!".to_string()));
    out.push(LayoutSegment::Text(shop.name.clone()));
    out.push(LayoutSegment::FeedLines(3));
    out.push(LayoutSegment::Cut);

    out
}

fn totals_line(label: &str, amount: i64) -> LayoutSegment {
    LayoutSegment::Text(format!(
        "{}Rp{}",
        pad_right(label, TOTALS_LABEL_WIDTH),
        format_amount(amount)
    ))
}
