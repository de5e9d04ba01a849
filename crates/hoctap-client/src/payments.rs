//! Premium packages and the payment-gateway round trip.

use serde::Serialize;
use serde_json::json;

use hoctap_core::error::ApiResult;
use hoctap_core::model::{Package, PaymentLink, PaymentStatus};

use crate::http::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePayment<'a> {
    package_id: &'a str,
}

impl ApiClient {
    pub async fn packages(&self) -> ApiResult<Vec<Package>> {
        self.get_field("/packages", "packages").await
    }

    /// Start a purchase; the learner completes it at `checkout_url`.
    pub async fn create_payment(&self, package_id: &str) -> ApiResult<PaymentLink> {
        let link: PaymentLink = self
            .post("/payments/create", &CreatePayment { package_id })
            .await?;
        tracing::info!(order_code = link.order_code, "payment link created");
        Ok(link)
    }

    /// Confirm an order after the gateway redirects to the success page.
    pub async fn verify_payment(&self, order_code: u64) -> ApiResult<PaymentStatus> {
        self.get(&format!("/payments/verify/{order_code}")).await
    }

    /// Report an order the learner abandoned at the gateway.
    pub async fn cancel_payment(&self, order_code: u64) -> ApiResult<PaymentStatus> {
        self.post(&format!("/payments/cancel/{order_code}"), &json!({}))
            .await
    }
}

/// Format a VND amount the way the storefront does: `199.000 ₫`.
pub fn format_vnd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out.push_str(" ₫");
    out
}
