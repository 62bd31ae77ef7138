//! Shared response handling for the vendor adapters.

use reqwest::Response;
use taleweaver_error::{TaleweaverResult, VendorError, VendorErrorKind};
use tracing::error;

/// Pass a successful response through; turn anything else into an API error
/// carrying the vendor's status code and body.
///
/// Takes the response by value because reading the error body consumes it;
/// the success path gets the untouched response back.
pub(crate) async fn ensure_success(
    vendor: &'static str,
    response: Response,
) -> TaleweaverResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let status = status.as_u16();
    let message = response.text().await.unwrap_or_default();
    error!(status, body = %message, vendor, "Vendor returned an error");
    Err(VendorError::new(vendor, VendorErrorKind::Api { status, message }).into())
}
