use shared::{
    domain::{CustomerId, InvoiceId, InvoiceStatus},
    error::SuccessCodes,
    protocol::{CreatePaymentRequest, Invoice, PaymentRedirect},
};

use crate::{error::ServiceResult, transport::ApiTransport, validation::ValidationError};

#[derive(Debug, Clone)]
pub struct InvoiceService {
    transport: ApiTransport,
}

impl InvoiceService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    pub async fn list_by_customer(&self, customer_id: CustomerId) -> ServiceResult<Vec<Invoice>> {
        self.transport
            .get(
                &format!("/api/invoices/customer/{customer_id}"),
                "Failed to load invoices",
            )
            .await
    }

    pub async fn get(&self, id: InvoiceId) -> ServiceResult<Invoice> {
        self.transport
            .get(&format!("/api/invoices/{id}"), "Failed to load invoice")
            .await
    }
}

#[derive(Debug, Clone)]
pub struct PaymentService {
    transport: ApiTransport,
}

impl PaymentService {
    pub fn new(transport: ApiTransport) -> Self {
        Self { transport }
    }

    /// Creates a VNPay checkout for an unpaid invoice. The payment endpoint
    /// reports success with code 0 as well as 1000.
    pub async fn create_vnpay_payment(&self, invoice: &Invoice) -> ServiceResult<PaymentRedirect> {
        if invoice.status == InvoiceStatus::Paid {
            return Err(ValidationError::new("invoiceId", "This invoice has already been paid").into());
        }
        if !invoice.total_amount.is_finite() || invoice.total_amount <= 0.0 {
            return Err(ValidationError::new("amount", "Invoice amount must be greater than 0").into());
        }

        let request = CreatePaymentRequest {
            invoice_id: invoice.id,
            amount: invoice.total_amount.round() as u64,
            order_info: format!("Payment for invoice #{}", invoice.id),
        };
        self.transport
            .post_accepting(
                "/api/vnpay/create",
                &request,
                SuccessCodes::Payment,
                "Failed to create payment",
            )
            .await
    }
}
