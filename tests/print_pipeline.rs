//! End-to-end pipeline tests against a recording transport

use chrono::TimeZone;
use struk_printer::{
    print_receipt, LineItem, PaperConfig, PrintError, PrintResult, ShopConfig, Transaction,
    Transport,
};
use uuid::Uuid;

/// Records the lifecycle calls instead of touching hardware
#[derive(Default)]
struct MockTransport {
    fail_open: bool,
    fail_write: bool,
    opens: usize,
    writes: Vec<Vec<u8>>,
    closes: usize,
}

impl Transport for MockTransport {
    async fn open(&mut self) -> PrintResult<()> {
        if self.fail_open {
            return Err(PrintError::DeviceUnavailable(
                "no port selected".to_string(),
            ));
        }
        self.opens += 1;
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> PrintResult<()> {
        if self.fail_write {
            return Err(PrintError::Transport(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "disconnected mid-write",
            )));
        }
        self.writes.push(bytes.to_vec());
        Ok(())
    }

    async fn close(&mut self) -> PrintResult<()> {
        self.closes += 1;
        Ok(())
    }
}

fn busi_ngk_sale() -> Transaction {
    Transaction {
        id: Uuid::nil(),
        created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        nama_pelanggan: "Budi Santoso".to_string(),
        nama_mekanik: Some("Pak Joko".to_string()),
        items: vec![LineItem {
            nama_sperpat: "Busi NGK".to_string(),
            jumlah: 2,
            harga_jual: 25000,
            subtotal: 50000,
        }],
        ongkos_pasang: 10000,
        total_pembayaran: 60000,
        uang_masuk: 100000,
        uang_kembalian: 40000,
    }
}

fn stream_text(transport: &MockTransport) -> String {
    let all: Vec<u8> = transport.writes.iter().flatten().copied().collect();
    String::from_utf8_lossy(&all).into_owned()
}

#[tokio::test]
async fn busi_ngk_receipt_prints_totals_in_order() {
    let mut transport = MockTransport::default();
    let tx = busi_ngk_sale();

    print_receipt(
        &mut transport,
        &tx,
        &ShopConfig::default(),
        &PaperConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(transport.opens, 1);
    assert_eq!(transport.closes, 1);

    let text = stream_text(&transport);

    // Two-row item table: header, then the single sale line
    let header_pos = text.find("No Barang").expect("table header missing");
    let row_pos = text.find("Busi NGK").expect("item row missing");
    assert!(header_pos < row_pos);

    // Totals block: total, cash in, change, formatted and in order,
    // after the item table
    let total_pos = text.find("Rp60.000").expect("total missing");
    let cash_pos = text.find("Rp100.000").expect("cash-in missing");
    let change_pos = text.find("Rp40.000").expect("change missing");
    assert!(row_pos < total_pos);
    assert!(total_pos < cash_pos);
    assert!(cash_pos < change_pos);

    // Installation fee was nonzero, so exactly one Ongkos line
    assert_eq!(text.matches("Ongkos Pasang").count(), 1);
    assert!(text.contains("Rp10.000"));
}

#[tokio::test]
async fn stream_begins_with_reset_and_ends_with_cut() {
    let mut transport = MockTransport::default();
    print_receipt(
        &mut transport,
        &busi_ngk_sale(),
        &ShopConfig::default(),
        &PaperConfig::default(),
    )
    .await
    .unwrap();

    let all: Vec<u8> = transport.writes.iter().flatten().copied().collect();
    assert_eq!(&all[..2], &[0x1B, 0x40]);
    assert_eq!(&all[all.len() - 3..], &[0x1D, 0x56, 0x00]);
}

#[tokio::test]
async fn zero_installation_fee_never_reaches_the_wire() {
    let mut transport = MockTransport::default();
    let mut tx = busi_ngk_sale();
    tx.ongkos_pasang = 0;
    tx.total_pembayaran = 50000;
    tx.uang_kembalian = 50000;

    print_receipt(
        &mut transport,
        &tx,
        &ShopConfig::default(),
        &PaperConfig::default(),
    )
    .await
    .unwrap();

    assert!(!stream_text(&transport).contains("Ongkos"));
}

#[tokio::test]
async fn failed_open_skips_write_and_close() {
    let mut transport = MockTransport {
        fail_open: true,
        ..Default::default()
    };

    let result = print_receipt(
        &mut transport,
        &busi_ngk_sale(),
        &ShopConfig::default(),
        &PaperConfig::default(),
    )
    .await;

    assert!(matches!(result, Err(PrintError::DeviceUnavailable(_))));
    assert!(transport.writes.is_empty());
    assert_eq!(transport.closes, 0);
}

#[tokio::test]
async fn failed_write_still_closes_exactly_once() {
    let mut transport = MockTransport {
        fail_write: true,
        ..Default::default()
    };

    let result = print_receipt(
        &mut transport,
        &busi_ngk_sale(),
        &ShopConfig::default(),
        &PaperConfig::default(),
    )
    .await;

    assert!(matches!(result, Err(PrintError::Transport(_))));
    assert_eq!(transport.opens, 1);
    assert_eq!(transport.closes, 1);
}

#[tokio::test]
async fn malformed_transaction_never_touches_the_device() {
    let mut transport = MockTransport::default();
    let mut tx = busi_ngk_sale();
    tx.items[0].jumlah = 0;

    let result = print_receipt(
        &mut transport,
        &tx,
        &ShopConfig::default(),
        &PaperConfig::default(),
    )
    .await;

    assert!(matches!(result, Err(PrintError::MalformedTransaction(_))));
    assert_eq!(transport.opens, 0);
    assert_eq!(transport.closes, 0);
}

#[tokio::test]
async fn zero_line_width_is_rejected() {
    let mut transport = MockTransport::default();
    let result = print_receipt(
        &mut transport,
        &busi_ngk_sale(),
        &ShopConfig::default(),
        &PaperConfig::new(0),
    )
    .await;

    assert!(matches!(result, Err(PrintError::InvalidConfig(_))));
    assert_eq!(transport.opens, 0);
}
