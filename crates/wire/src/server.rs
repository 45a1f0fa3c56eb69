//! HTTP endpoint hosting the transfer protocol.
//!
//! One route accepts `POST` with a plain-text request body and answers with
//! the [`Output`](tablebridge_executor::Output) body:
//!
//! | Outcome | Status | Body |
//! |---------|--------|------|
//! | success | 200 | CSV, or empty |
//! | any error | 400 | error message |
//! | any method but POST | 400 | error message |
//!
//! Protocol work runs on actix's blocking pool since adapters are synchronous.

use actix_web::http::Method;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use tablebridge_engine::ServerConfig;
use tablebridge_executor::Executor;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Clone, Copy)]
struct BodyLimit(usize);

/// Register the transfer route on an app.
pub fn configure(cfg: &mut web::ServiceConfig, executor: Executor, server: &ServerConfig) {
    cfg.app_data(web::Data::new(executor))
        .app_data(web::Data::new(BodyLimit(server.max_body_bytes)))
        .route(&server.path, web::route().to(transfer));
}

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest()
        .content_type(TEXT_PLAIN)
        .body(message.into())
}

async fn transfer(
    req: HttpRequest,
    payload: web::Payload,
    executor: web::Data<Executor>,
    limit: web::Data<BodyLimit>,
) -> HttpResponse {
    if req.method() != Method::POST {
        tracing::warn!(
            target: "tablebridge::wire::server",
            method = %req.method(),
            path = req.path(),
            "rejected non-POST request"
        );
        return bad_request(format!("method {} not allowed, use POST", req.method()));
    }

    let bytes = match payload.to_bytes_limited(limit.0).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            tracing::warn!(target: "tablebridge::wire::server", error = %e, "failed to read body");
            return bad_request(format!("failed to read body: {}", e));
        }
        Err(_) => {
            tracing::warn!(
                target: "tablebridge::wire::server",
                limit = limit.0,
                "request body too large"
            );
            return bad_request(format!("request body exceeds {} bytes", limit.0));
        }
    };
    let body = match String::from_utf8(bytes.to_vec()) {
        Ok(body) => body,
        Err(_) => return bad_request("request body is not valid UTF-8"),
    };

    let executor = executor.get_ref().clone();
    match web::block(move || executor.handle(&body)).await {
        Ok(Ok(output)) => HttpResponse::Ok()
            .content_type(TEXT_PLAIN)
            .body(output.into_body()),
        Ok(Err(e)) => {
            tracing::warn!(target: "tablebridge::wire::server", error = %e, "request failed");
            bad_request(e.to_string())
        }
        Err(e) => {
            tracing::error!(target: "tablebridge::wire::server", error = %e, "blocking task failed");
            bad_request(e.to_string())
        }
    }
}

/// Serve the transfer route until the server is stopped.
pub async fn run_server(config: &ServerConfig, executor: Executor) -> std::io::Result<()> {
    let route_config = config.clone();
    let server = HttpServer::new(move || {
        let executor = executor.clone();
        let route_config = route_config.clone();
        App::new().configure(move |cfg| configure(cfg, executor, &route_config))
    })
    .bind(config.bind_address())?;

    tracing::info!(
        target: "tablebridge::wire::server",
        address = %config.bind_address(),
        path = %config.path,
        "transfer endpoint listening"
    );
    server.run().await
}
