use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

/// Issues a per-request trace id, installs it in the `trace_ctx`
/// task-local for the duration of the request, and reflects it back as
/// `x-request-id` / `x-trace-id` so clients and logs can be correlated.
pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware { service }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = Uuid::new_v4().to_string();

        // Insert trace_id into request extensions
        req.extensions_mut().insert(trace_id.clone());

        let fut = self.service.call(req);

        Box::pin(async move {
            // Handlers (and error rendering) run inside the task-local
            // scope, so trace_ctx::trace_id() resolves anywhere below.
            let mut res = trace_ctx::with_trace_id(trace_id.clone(), fut).await?;

            let value = header::HeaderValue::from_str(&trace_id)
                .unwrap_or_else(|_| header::HeaderValue::from_static("invalid-uuid"));
            res.headers_mut().insert(
                header::HeaderName::from_static("x-request-id"),
                value.clone(),
            );
            // Error responses already carry x-trace-id; insert replaces
            // rather than duplicating.
            res.headers_mut()
                .insert(header::HeaderName::from_static("x-trace-id"), value);

            Ok(res)
        })
    }
}
