/*
[INPUT]:  Optional cancellation token
[OUTPUT]: Current credit balance of the account
[POS]:    HTTP layer - credits endpoints
[UPDATE]: When adding credit usage queries
*/

use reqwest::{Method, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::http::transport::InvocationRequest;
use crate::http::{Result, VerifaliaClient, VerifaliaError};
use crate::types::CreditBalance;

impl VerifaliaClient {
    /// Query the credit balance
    ///
    /// GET /credits/balance
    pub async fn get_balance(&self, cancellation: Option<CancellationToken>) -> Result<CreditBalance> {
        let request =
            InvocationRequest::new(Method::GET, "credits/balance").cancellation(cancellation);
        let response = self.invoke(request).await?;
        match response.status {
            StatusCode::OK => response.json(),
            status => Err(VerifaliaError::unexpected_status(
                "querying the credit balance",
                status,
                response.text(),
            )),
        }
    }
}
