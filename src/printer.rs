//! Receipt rendering and ESC/POS output to a thermal printer.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::money::line_cents;
use crate::domain::sale::Sale;

const TEMPLATE_NAME: &str = "receipt.txt";
const TITLE: &str = "SALES RECEIPT";
pub const MIN_WIDTH: usize = 24;

const ESC_INIT: &[u8] = &[0x1b, b'@'];
const ESC_ALIGN_LEFT: &[u8] = &[0x1b, b'a', 0];
const ESC_BOLD_ON: &[u8] = &[0x1b, b'E', 1];
const ESC_BOLD_OFF: &[u8] = &[0x1b, b'E', 0];
const ESC_FEED: &[u8] = &[0x1b, b'd', 3];
const GS_CUT: &[u8] = &[0x1d, b'V', 0];

#[derive(Debug, Error)]
pub enum PrinterError {
    #[error("printer not configured")]
    NotConfigured,
    #[error("failed to render receipt: {0}")]
    Template(#[from] tera::Error),
    #[error("failed to write to printer: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl ReceiptLine {
    pub fn amount_cents(&self) -> i64 {
        line_cents(self.quantity, self.unit_price_cents)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub total_cents: i64,
    pub printed_at: NaiveDateTime,
}

impl Receipt {
    pub fn from_sale(sale: &Sale, printed_at: NaiveDateTime) -> Self {
        Self {
            lines: sale
                .items
                .iter()
                .map(|item| ReceiptLine {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price_cents: item.price_cents,
                })
                .collect(),
            total_cents: sale.total_cents,
            printed_at,
        }
    }
}

/// Lays a [`Receipt`] out as fixed-width text.
pub struct ReceiptRenderer {
    tera: Tera,
    currency_symbol: String,
    width: usize,
}

impl ReceiptRenderer {
    pub fn new(currency_symbol: impl Into<String>, width: usize) -> Result<Self, PrinterError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, include_str!("../templates/receipt.txt"))?;
        Ok(Self {
            tera,
            currency_symbol: currency_symbol.into(),
            width: width.max(MIN_WIDTH),
        })
    }

    pub fn render(&self, receipt: &Receipt) -> Result<String, PrinterError> {
        let rows: Vec<String> = receipt
            .lines
            .iter()
            .map(|line| {
                self.columns(
                    &format!("{} x{}", line.name, line.quantity),
                    &self.money(line.amount_cents()),
                )
            })
            .collect();

        let mut context = Context::new();
        context.insert("title", &self.centered(TITLE));
        context.insert(
            "printed_at",
            &self.centered(&receipt.printed_at.format("%Y-%m-%d %H:%M").to_string()),
        );
        context.insert("rule", &"-".repeat(self.width));
        context.insert("rows", &rows);
        context.insert(
            "total_row",
            &self.columns("TOTAL:", &self.money(receipt.total_cents)),
        );

        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }

    /// Rendered text wrapped in ESC/POS commands. The title and total are
    /// printed in bold and the paper is cut at the end.
    pub fn encode(&self, receipt: &Receipt) -> Result<Vec<u8>, PrinterError> {
        let text = self.render(receipt)?;
        let last = text.lines().count().saturating_sub(1);

        let mut bytes = Vec::with_capacity(text.len() + 32);
        bytes.extend_from_slice(ESC_INIT);
        bytes.extend_from_slice(ESC_ALIGN_LEFT);
        for (index, line) in text.lines().enumerate() {
            let bold = index == 0 || index == last;
            if bold {
                bytes.extend_from_slice(ESC_BOLD_ON);
            }
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
            if bold {
                bytes.extend_from_slice(ESC_BOLD_OFF);
            }
        }
        bytes.extend_from_slice(ESC_FEED);
        bytes.extend_from_slice(GS_CUT);

        Ok(bytes)
    }

    fn money(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();
        format!(
            "{sign}{}{}.{:02}",
            self.currency_symbol,
            cents / 100,
            cents % 100
        )
    }

    fn centered(&self, text: &str) -> String {
        let len = text.chars().count();
        let padding = self.width.saturating_sub(len) / 2;
        format!("{}{text}", " ".repeat(padding))
    }

    /// `left` and `right` on one line, truncating `left` when both do not fit.
    fn columns(&self, left: &str, right: &str) -> String {
        let right_len = right.chars().count();
        let room = self.width.saturating_sub(right_len + 1).max(1);
        let left: String = left.chars().take(room).collect();
        let gap = self.width.saturating_sub(left.chars().count() + right_len).max(1);
        format!("{left}{}{right}", " ".repeat(gap))
    }
}

pub trait ReceiptPrinter: Send + Sync {
    fn print(&self, receipt: &Receipt) -> Result<(), PrinterError>;
}

/// Writes ESC/POS output straight to a device file such as `/dev/usb/lp0`.
pub struct EscPosPrinter {
    device: PathBuf,
    renderer: ReceiptRenderer,
}

impl EscPosPrinter {
    pub fn new(device: impl Into<PathBuf>, renderer: ReceiptRenderer) -> Self {
        Self {
            device: device.into(),
            renderer,
        }
    }
}

impl ReceiptPrinter for EscPosPrinter {
    fn print(&self, receipt: &Receipt) -> Result<(), PrinterError> {
        let bytes = self.renderer.encode(receipt)?;
        let mut device = OpenOptions::new().append(true).open(&self.device)?;
        device.write_all(&bytes)?;
        device.flush()?;
        log::info!(
            "Printed receipt with {} line(s) to {}",
            receipt.lines.len(),
            self.device.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn receipt() -> Receipt {
        Receipt {
            lines: vec![
                ReceiptLine {
                    name: "Jollof rice".to_string(),
                    quantity: 2,
                    unit_price_cents: 150_000,
                },
                ReceiptLine {
                    name: "Extremely long product name that cannot fit".to_string(),
                    quantity: 1,
                    unit_price_cents: 50,
                },
            ],
            total_cents: 300_050,
            printed_at: NaiveDate::from_ymd_opt(2024, 5, 17)
                .and_then(|date| date.and_hms_opt(14, 30, 0))
                .unwrap_or_default(),
        }
    }

    #[test]
    fn renders_fixed_width_layout() {
        let renderer = ReceiptRenderer::new("₦", 32).expect("renderer");

        let text = renderer.render(&receipt()).expect("render");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "         SALES RECEIPT");
        assert_eq!(lines[1], "        2024-05-17 14:30");
        assert_eq!(lines[2], "-".repeat(32));
        assert_eq!(lines[3], "Jollof rice x2          ₦3000.00");
        assert!(lines[4].ends_with(" ₦0.50"));
        assert_eq!(lines[4].chars().count(), 32);
        assert_eq!(lines[6], "TOTAL:                  ₦3000.50");
    }

    #[test]
    fn width_has_a_floor() {
        let renderer = ReceiptRenderer::new("$", 10).expect("renderer");

        let text = renderer.render(&receipt()).expect("render");

        assert!(text.lines().any(|line| line == "-".repeat(MIN_WIDTH)));
    }

    #[test]
    fn escpos_output_is_framed() {
        let renderer = ReceiptRenderer::new("$", 32).expect("renderer");

        let bytes = renderer.encode(&receipt()).expect("encode");

        assert!(bytes.starts_with(ESC_INIT));
        assert!(bytes.ends_with(GS_CUT));
        assert!(bytes.windows(ESC_BOLD_ON.len()).any(|window| window == ESC_BOLD_ON));
    }

    #[test]
    fn printer_appends_to_device_file() {
        let device = tempfile::NamedTempFile::new().expect("temp file");
        let printer = EscPosPrinter::new(
            device.path(),
            ReceiptRenderer::new("$", 32).expect("renderer"),
        );

        printer.print(&receipt()).expect("print");

        let written = std::fs::read(device.path()).expect("read device");
        let text = String::from_utf8_lossy(&written);
        assert!(text.contains("SALES RECEIPT"));
        assert!(text.contains("$3000.50"));
    }

    #[test]
    fn missing_device_is_an_io_error() {
        let printer = EscPosPrinter::new(
            "/nonexistent/printer/device",
            ReceiptRenderer::new("$", 32).expect("renderer"),
        );

        assert!(matches!(printer.print(&receipt()), Err(PrinterError::Io(_))));
    }
}
