use super::{Next, Stage};
use crate::errors::{Fault, internal_server_error};
use async_trait::async_trait;
use axum::{extract::Request, response::Response};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;

/// Outermost stage: converts anything unexpected into the generic 500.
///
/// Three things count as a fault: a panic anywhere downstream, a [`Fault`]
/// returned by a stage, and a response carrying a [`Fault`] extension
/// (what `AppError::Internal` renders to). The detail is logged here and
/// never sent to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorTrap;

#[async_trait]
impl Stage for ErrorTrap {
    fn name(&self) -> &'static str {
        "error_trap"
    }

    async fn handle(&self, request: Request, next: Next) -> Result<Response, Fault> {
        let method = request.method().clone();
        let path = request.uri().path().to_owned();

        let fault = match AssertUnwindSafe(next.run(request)).catch_unwind().await {
            Ok(Ok(mut response)) => match response.extensions_mut().remove::<Fault>() {
                Some(fault) => fault,
                None => return Ok(response),
            },
            Ok(Err(fault)) => fault,
            Err(panic) => Fault::from_panic(panic),
        };

        tracing::error!(
            %method,
            path = %path,
            detail = fault.detail(),
            "Unhandled fault converted to internal server error"
        );

        Ok(internal_server_error())
    }
}
