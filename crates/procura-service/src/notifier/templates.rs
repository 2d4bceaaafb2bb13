//! HTML email templates.
//!
//! Two templates exist: the reviewer notice for a new submission and the
//! requester notice for a decision. Both share the boxed layout the
//! purchasing portal frontend uses.

use procura_core::{PurchaseRequest, RequestStatus};

use super::types::{EmailMessage, EmailParty};
use crate::config::ServiceConfig;

const BRAND_COLOR: &str = "#19287F";
const APPROVED_COLOR: &str = "#2ecc71";
const REJECTED_COLOR: &str = "#e74c3c";

/// Build the "new request" notification sent to the internal reviewer.
#[must_use]
pub fn new_request_email(request: &PurchaseRequest, config: &ServiceConfig) -> EmailMessage {
    let subject = format!(
        "Nueva Solicitud de Compra: {} - {}",
        request.requester_name, request.vendor_name
    );

    let cost_center = request
        .cost_center
        .as_deref()
        .unwrap_or("No especificado");
    let attachment_row = match &request.attachment_reference {
        Some(reference) => format!(
            "<tr><td style=\"padding: 5px 0; color: #64748b; font-size: 13px;\"><b>COTIZACIÓN:</b></td>\
             <td style=\"padding: 5px 0; font-size: 14px;\"><a href=\"{reference}\">Ver archivo adjunto</a></td></tr>"
        ),
        None => String::new(),
    };

    let html_content = format!(
        "<div style=\"font-family: 'Segoe UI', Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto; border: 1px solid #e2e8f0; border-radius: 8px; overflow: hidden;\">\
           <div style=\"background-color: {BRAND_COLOR}; padding: 20px; text-align: center;\">\
             <h1 style=\"color: white; margin: 0; font-size: 20px; text-transform: uppercase;\">Portal de Solicitud de Compras</h1>\
           </div>\
           <div style=\"padding: 30px; line-height: 1.6;\">\
             <p style=\"font-size: 16px;\">Cordial saludo,</p>\
             <p>Se ha registrado una <b>nueva solicitud de compra</b> que requiere su revisión y aprobación:</p>\
             <div style=\"background-color: #f8fafc; border-radius: 6px; padding: 20px; margin: 20px 0;\">\
               <table style=\"width: 100%; border-collapse: collapse;\">\
                 <tr><td style=\"padding: 5px 0; color: #64748b; font-size: 13px;\"><b>RESPONSABLE:</b></td>\
                     <td style=\"padding: 5px 0; font-size: 14px;\">{requester}</td></tr>\
                 <tr><td style=\"padding: 5px 0; color: #64748b; font-size: 13px;\"><b>PROVEEDOR:</b></td>\
                     <td style=\"padding: 5px 0; font-size: 14px;\">{vendor} (NIT: {tax_id})</td></tr>\
                 <tr><td style=\"padding: 5px 0; color: #64748b; font-size: 13px;\"><b>CENTRO DE COSTOS:</b></td>\
                     <td style=\"padding: 5px 0; font-size: 14px;\">{cost_center}</td></tr>\
                 <tr><td style=\"padding: 5px 0; color: #64748b; font-size: 13px;\"><b>VALOR TOTAL:</b></td>\
                     <td style=\"padding: 5px 0; font-size: 18px; color: {BRAND_COLOR};\"><b>{amount}</b></td></tr>\
                 {attachment_row}\
               </table>\
             </div>\
             <p style=\"text-align: center; margin-top: 30px;\">\
               <a href=\"{portal}\" style=\"background-color: {BRAND_COLOR}; color: white; padding: 12px 25px; text-decoration: none; border-radius: 5px; font-weight: bold; display: inline-block; font-size: 14px;\">GESTIONAR SOLICITUD</a>\
             </p>\
           </div>\
           <div style=\"background-color: #f1f5f9; padding: 15px; text-align: center; font-size: 11px; color: #94a3b8;\">\
             Mensaje automático del Sistema de Gestión de Compras. Por favor no responda a este correo.\
           </div>\
         </div>",
        requester = request.requester_name,
        vendor = request.vendor_name,
        tax_id = request.vendor_tax_id,
        amount = format_amount(request.amount_cents),
        portal = config.admin_portal_url,
    );

    EmailMessage {
        sender: EmailParty::named(&config.sender_name, &config.sender_email),
        to: vec![EmailParty::address(&config.reviewer_email)],
        subject,
        html_content,
    }
}

/// Build the "status changed" notification sent to the requester.
///
/// Built from the freshly updated row, so the content always reflects the
/// persisted decision.
#[must_use]
pub fn decision_email(request: &PurchaseRequest, config: &ServiceConfig) -> EmailMessage {
    let status = request.status;
    let accent = match status {
        RequestStatus::Rejected => REJECTED_COLOR,
        _ => APPROVED_COLOR,
    };
    let guidance = match status {
        RequestStatus::Rejected => {
            "Si tiene dudas sobre esta decisión, por favor póngase en contacto con el departamento de <b>Gestión Humana</b>."
        }
        _ => "Puede proceder con el trámite correspondiente según los lineamientos de la empresa.",
    };

    let subject = format!("Notificación de Solicitud: {}", status.label());

    let html_content = format!(
        "<div style=\"font-family: 'Segoe UI', Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto; border: 1px solid #e2e8f0; border-radius: 8px; overflow: hidden;\">\
           <div style=\"background-color: {accent}; padding: 20px; text-align: center;\">\
             <h1 style=\"color: white; margin: 0; font-size: 20px; text-transform: uppercase;\">Estado de su Solicitud</h1>\
           </div>\
           <div style=\"padding: 30px; line-height: 1.6;\">\
             <p style=\"font-size: 16px;\">Cordial saludo, <b>{requester}</b>.</p>\
             <p>El proceso de revisión para su solicitud de compra ha finalizado. El estado actual es:</p>\
             <div style=\"text-align: center; margin: 25px 0; padding: 20px; background-color: #f8fafc; border-radius: 10px; border: 2px dashed {accent};\">\
               <span style=\"font-size: 24px; font-weight: bold; color: {accent}; text-transform: uppercase; letter-spacing: 2px;\">{status_label}</span>\
             </div>\
             <table style=\"width: 100%; border-collapse: collapse; margin-bottom: 20px;\">\
               <tr><td style=\"padding: 8px 0; color: #64748b; font-size: 13px;\"><b>PROVEEDOR:</b></td>\
                   <td style=\"padding: 8px 0; font-size: 14px;\">{vendor}</td></tr>\
               <tr><td style=\"padding: 8px 0; color: #64748b; font-size: 13px;\"><b>VALOR SOLICITADO:</b></td>\
                   <td style=\"padding: 8px 0; font-size: 16px; color: {BRAND_COLOR};\"><b>{amount}</b></td></tr>\
             </table>\
             <p style=\"font-size: 14px; color: #475569;\">{guidance}</p>\
           </div>\
           <div style=\"background-color: #f1f5f9; padding: 15px; text-align: center; font-size: 11px; color: #94a3b8; border-top: 1px solid #e2e8f0;\">\
             Este correo es informativo, agradecemos no responder a esta dirección.\
           </div>\
         </div>",
        requester = request.requester_name,
        status_label = status.label(),
        vendor = request.vendor_name,
        amount = format_amount(request.amount_cents),
    );

    EmailMessage {
        sender: EmailParty::named(&config.sender_name, &config.sender_email),
        to: vec![EmailParty::address(&request.requester_email)],
        subject,
        html_content,
    }
}

/// Format cents as a display amount with thousands separators, e.g.
/// `$1,500.50`. Whole amounts drop the fraction.
fn format_amount(cents: i64) -> String {
    let units = cents / 100;
    let frac = cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac == 0 {
        format!("${grouped}")
    } else {
        format!("${grouped}.{frac:02}")
    }
}
