//! # Invoice Rendering
//!
//! Turning a committed receipt into a customer-facing document. Rendering is
//! behind the [`DocumentRenderer`] trait so tests can substitute a failing or
//! capturing renderer; production uses [`InvoiceFileRenderer`], which writes
//! a plain-text invoice to disk and returns its path.
//!
//! Rendering always happens *after* the sale is committed and is allowed to
//! fail without consequence for the ledger.

use std::fs;
use std::path::PathBuf;

use boutique_core::{Money, Receipt, ReceiptLine};

/// Why a document could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to write invoice: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Produces a document for a committed receipt and returns a reference to it
/// (for the file renderer, the file path).
pub trait DocumentRenderer {
    fn render(&self, receipt: &Receipt, lines: &[ReceiptLine]) -> Result<String, RenderError>;
}

/// Writes plain-text invoices into an output directory, one file per receipt,
/// named `invoice_{number}_{timestamp}.txt`.
#[derive(Debug, Clone)]
pub struct InvoiceFileRenderer {
    output_dir: PathBuf,
}

impl InvoiceFileRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        InvoiceFileRenderer {
            output_dir: output_dir.into(),
        }
    }
}

impl DocumentRenderer for InvoiceFileRenderer {
    fn render(&self, receipt: &Receipt, lines: &[ReceiptLine]) -> Result<String, RenderError> {
        fs::create_dir_all(&self.output_dir)?;

        let filename = format!(
            "invoice_{}_{}.txt",
            receipt.number,
            receipt.created_at.format("%Y%m%d_%H%M%S"),
        );
        let path = self.output_dir.join(filename);

        fs::write(&path, render_invoice_text(receipt, lines))?;

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Lays out the invoice body. Independent of the filesystem so it can be
/// checked directly.
fn render_invoice_text(receipt: &Receipt, lines: &[ReceiptLine]) -> String {
    let mut out = String::new();

    out.push_str("=================================================================\n");
    out.push_str("                  JK's Boutique & Kid's Wear\n");
    out.push_str("=================================================================\n");
    out.push_str("\n");
    out.push_str("                            INVOICE\n");
    out.push_str("\n");
    out.push_str(&format!("Invoice #: {:05}\n", receipt.number));
    out.push_str(&format!(
        "Date:      {}\n",
        receipt.created_at.format("%Y-%m-%d")
    ));
    out.push_str(&format!(
        "Time:      {}\n",
        receipt.created_at.format("%H:%M:%S")
    ));
    out.push_str("\n");
    out.push_str("-----------------------------------------------------------------\n");
    out.push_str("ITEM                              QTY       PRICE      SUBTOTAL\n");
    out.push_str("-----------------------------------------------------------------\n");

    for line in lines {
        let name: String = line.product_name.chars().take(30).collect();
        out.push_str(&format!(
            "{:<32} {:>4} {:>11} {:>13}\n",
            name,
            line.quantity,
            Money::from_minor(line.price).to_string(),
            Money::from_minor(line.subtotal).to_string(),
        ));
    }

    out.push_str("-----------------------------------------------------------------\n");
    out.push_str(&format!(
        "{:>50} {:>13}\n",
        "TOTAL:",
        Money::from_minor(receipt.total).to_string()
    ));
    out.push_str("\n");
    out.push_str("Thank you for shopping with us!\n");
    out.push_str("For inquiries: contact@jksboutique.com | +256-XXX-XXXXXX\n");
    out.push_str("This is a computer-generated invoice.\n");

    out
}

// =============================================================================
// Unit Tests
// =============================================================================
