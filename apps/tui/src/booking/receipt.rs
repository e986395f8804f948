use crate::booking::form::{Appointment, DATE_FORMAT, TIME_FORMAT};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const RECEIPT_FILE_NAME: &str = "appointment-receipt.pdf";
pub const ALLOTTED_DOCTOR: &str = "Dr. XYZ";

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const LEFT_MARGIN: Mm = Mm(20.0);

#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("could not write receipt: {0}")]
    Io(#[from] std::io::Error),
}

/// Text lines of the receipt body, in print order.
pub fn receipt_lines(appointment: &Appointment) -> Vec<String> {
    vec![
        format!("Hospital: {}", appointment.hospital),
        format!("Patient Name: {}", appointment.patient_name),
        format!("Age: {}", appointment.patient_age),
        format!("Mobile: {}", appointment.patient_mobile),
        format!("Purpose: {}", appointment.purpose),
        format!("Appointment Date: {}", appointment.date.format(DATE_FORMAT)),
        format!("Appointment Time: {}", appointment.time.format(TIME_FORMAT)),
        format!("Allotted Doctor: {ALLOTTED_DOCTOR}"),
    ]
}

/// Renders the one-page confirmation PDF.
pub fn render_receipt(appointment: &Appointment) -> Result<Vec<u8>, ReceiptError> {
    let (doc, page, layer) =
        PdfDocument::new("Appointment Confirmation", PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReceiptError::Pdf(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| ReceiptError::Pdf(format!("font error: {e}")))?;

    // Positions are measured from the top edge of the page.
    layer.use_text(
        "Appointment Confirmation",
        20.0,
        LEFT_MARGIN,
        PAGE_HEIGHT - Mm(20.0),
        &bold,
    );

    let mut from_top = 40.0;
    for line in receipt_lines(appointment) {
        layer.use_text(line, 12.0, LEFT_MARGIN, PAGE_HEIGHT - Mm(from_top), &font);
        from_top += 10.0;
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| ReceiptError::Pdf(format!("save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| ReceiptError::Pdf(format!("buffer error: {e}")))
}

/// Renders the receipt and writes it into `dir`, returning the file path.
pub fn write_receipt(dir: &Path, appointment: &Appointment) -> Result<PathBuf, ReceiptError> {
    let bytes = render_receipt(appointment)?;
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(RECEIPT_FILE_NAME);
    fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), hospital = %appointment.hospital, "appointment receipt saved");
    Ok(path)
}
