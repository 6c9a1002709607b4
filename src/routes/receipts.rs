use actix_web::{HttpResponse, Responder, post, web};
use chrono::Local;

use crate::forms::receipts::PrintReceiptForm;
use crate::printer::{PrinterError, Receipt, ReceiptPrinter};
use crate::routes::{ErrorBody, error_response};
use crate::services::receipts;

#[post("/receipts/print")]
pub async fn print_receipt(
    printer: Option<web::Data<dyn ReceiptPrinter>>,
    form: web::Json<PrintReceiptForm>,
) -> impl Responder {
    match receipts::build_receipt(form.into_inner(), Local::now().naive_local()) {
        Ok(receipt) => print(printer, receipt).await,
        Err(err) => error_response(err, "build receipt"),
    }
}

/// Send `receipt` to the printer off the async executor and echo it back.
pub(crate) async fn print(
    printer: Option<web::Data<dyn ReceiptPrinter>>,
    receipt: Receipt,
) -> HttpResponse {
    let Some(printer) = printer else {
        return printer_error_response(PrinterError::NotConfigured);
    };

    let job = receipt.clone();
    match web::block(move || printer.print(&job)).await {
        Ok(Ok(())) => HttpResponse::Ok().json(receipt),
        Ok(Err(err)) => printer_error_response(err),
        Err(err) => {
            log::error!("Printing task failed: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn printer_error_response(err: PrinterError) -> HttpResponse {
    let message = err.to_string();
    match err {
        PrinterError::NotConfigured => {
            HttpResponse::ServiceUnavailable().json(ErrorBody { error: &message })
        }
        _ => {
            log::error!("Failed to print receipt: {message}");
            HttpResponse::InternalServerError().json(ErrorBody { error: &message })
        }
    }
}
