//! Device transports and the print pipeline
//!
//! Two links are supported, selected at construction time by deployment
//! context:
//! - `UsbTransport`: a fixed, pre-paired raw printer device node
//! - `SerialTransport`: a serial port at a fixed baud rate
//!
//! Either one owns the device handle for exactly one print and releases it
//! on every exit path, success or failure. There is no retry state: a
//! failed print surfaces as one terminal error and the caller re-invokes
//! if it wants another attempt.

use crate::config::{PaperConfig, ShopConfig};
use crate::error::{PrintError, PrintResult};
use crate::escpos::Encoder;
use crate::model::Transaction;
use crate::receipt::build_receipt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{info, instrument, warn};

/// Serial receipt printers ship configured for 9600 baud
pub const DEFAULT_BAUD: u32 = 9600;

const DEFAULT_USB_DEVICE: &str = "/dev/usb/lp0";

/// Device link lifecycle: open, write, close
///
/// Implementations hold at most one open handle and never share it. Bytes
/// are delivered in write order; the printer firmware is stateful, so
/// reordering would corrupt the layout.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Acquire the device; fails with `DeviceUnavailable`
    async fn open(&mut self) -> PrintResult<()>;

    /// Write raw ESC/POS bytes to the open device
    async fn write(&mut self, bytes: &[u8]) -> PrintResult<()>;

    /// Release the device; attempted on every exit path
    async fn close(&mut self) -> PrintResult<()>;
}

/// Raw USB line-printer device (e.g. `/dev/usb/lp0`)
///
/// Fire-and-forget: the kernel's usblp framing handles delivery, no flow
/// control is assumed.
pub struct UsbTransport {
    path: PathBuf,
    timeout: Duration,
    device: Option<File>,
}

impl UsbTransport {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            timeout: Duration::from_secs(5),
            device: None,
        }
    }

    /// Set the open timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for UsbTransport {
    fn default() -> Self {
        Self::new(DEFAULT_USB_DEVICE)
    }
}

impl Transport for UsbTransport {
    #[instrument(skip(self), fields(device = %self.path.display()))]
    async fn open(&mut self) -> PrintResult<()> {
        let mut options = OpenOptions::new();
        options.write(true);
        let device = tokio::time::timeout(self.timeout, options.open(&self.path))
            .await
            .map_err(|_| PrintError::Timeout(format!("Open timeout: {}", self.path.display())))?
            .map_err(|e| {
                PrintError::DeviceUnavailable(format!("{}: {}", self.path.display(), e))
            })?;

        info!("USB device opened");
        self.device = Some(device);
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> PrintResult<()> {
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| PrintError::DeviceUnavailable("Device not open".to_string()))?;
        device.write_all(bytes).await?;
        device.flush().await?;
        Ok(())
    }

    #[instrument(skip(self), fields(device = %self.path.display()))]
    async fn close(&mut self) -> PrintResult<()> {
        if let Some(mut device) = self.device.take() {
            device.shutdown().await?;
            info!("USB device closed");
        }
        Ok(())
    }
}

/// Serial-port printer at a fixed baud rate
///
/// Acquire, write, release, strictly sequentially; there are no concurrent
/// writes within one print.
pub struct SerialTransport {
    path: String,
    baud: u32,
    port: Option<SerialStream>,
}

impl SerialTransport {
    /// Open configuration for a port path (e.g. `/dev/ttyUSB0`, `COM3`)
    /// at the default 9600 baud
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            baud: DEFAULT_BAUD,
            port: None,
        }
    }

    /// Override the baud rate for non-standard printers
    pub fn with_baud(mut self, baud: u32) -> Self {
        self.baud = baud;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn baud(&self) -> u32 {
        self.baud
    }
}

impl Transport for SerialTransport {
    #[instrument(skip(self), fields(port = %self.path, baud = self.baud))]
    async fn open(&mut self) -> PrintResult<()> {
        let port = tokio_serial::new(&self.path, self.baud)
            .open_native_async()
            .map_err(|e| PrintError::DeviceUnavailable(format!("{}: {}", self.path, e)))?;

        info!("Serial port opened");
        self.port = Some(port);
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> PrintResult<()> {
        let port = self
            .port
            .as_mut()
            .ok_or_else(|| PrintError::DeviceUnavailable("Port not open".to_string()))?;
        port.write_all(bytes).await?;
        port.flush().await?;
        Ok(())
    }

    #[instrument(skip(self), fields(port = %self.path))]
    async fn close(&mut self) -> PrintResult<()> {
        if self.port.take().is_some() {
            info!("Serial port closed");
        }
        Ok(())
    }
}

/// Print one receipt: validate, lay out, encode, deliver
///
/// The single caller-facing entry point. The transaction must already be
/// fully resolved; printing is a best-effort side effect of a committed
/// sale, so a failure here must never roll the sale back. Re-invoking with
/// the same transaction is the retry mechanism.
///
/// `close` is attempted even after a failed write; the write error wins
/// over a close error on that path.
#[instrument(skip_all, fields(transaction = %tx.id, items = tx.items.len()))]
pub async fn print_receipt<T: Transport>(
    transport: &mut T,
    tx: &Transaction,
    shop: &ShopConfig,
    paper: &PaperConfig,
) -> PrintResult<()> {
    if paper.line_width == 0 {
        return Err(PrintError::InvalidConfig(
            "line_width must be at least 1".to_string(),
        ));
    }
    tx.validate()?;

    let segments = build_receipt(tx, shop, paper);
    let stream = Encoder::encode(&segments);
    info!(bytes = stream.len(), "sending receipt");

    transport.open().await?;
    let written = transport.write(&stream).await;
    let closed = transport.close().await;

    match (written, closed) {
        (Ok(()), Ok(())) => {
            info!("receipt printed");
            Ok(())
        }
        (Ok(()), Err(e)) => Err(e),
        (Err(e), closed) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "close failed after write error");
            }
            Err(e)
        }
    }
}
