//! Static log messages used across harnesses.
//!
//! These are the free-text `log` payloads as the Java services print them;
//! wrap them in an envelope with the builders before feeding the extractor.

/// The canonical order-creation call.
pub const ORDER_CREATED: &str = r#"2024-01-15 10:00:00.123 INFO [http-nio-8080-exec-3] c.a.o.ApiLoggingInterceptor : API_LOGGING:{request_url=/v1/orders, api_method=POST, request_body={"id":1,"items":["a","b"]}, response={"ok":true}, api_time=42}"#;

/// A GET with an empty body and a non-JSON response.
pub const PAYMENT_LOOKUP: &str = "2024-01-15 10:00:01.000 INFO [http-nio-8080-exec-7] c.a.p.ApiLoggingInterceptor : API_LOGGING:{request_url=/v1/payments/9, api_method=GET, request_body=, response=not-json, api_time=7}";

/// Request body that is not JSON at all.
pub const NOT_JSON_BODY: &str = "API_LOGGING:{request_url=/v1/legacy, api_method=POST, request_body=not-json, response={\"ok\":false}, api_time=3}";

/// Nested payload containing the tokenizer's own delimiters.
pub const DELIMITERS_IN_PAYLOAD: &str = r#"API_LOGGING:{request_url=/v1/search, api_method=POST, request_body={"q":"a=b, c=d","filters":{"tags":["x,y"]}}, response={"hits":[]}, api_time=18, clientname=mobile}"#;

/// Non-ASCII payload text.
pub const UNICODE_PAYLOAD: &str = r#"API_LOGGING:{request_url=/v1/profile, api_method=PUT, request_body={"name":"Zoë","city":"東京"}, response={"ok":true}, api_time=11}"#;

/// Messages that must never produce a record.
pub const NON_API_MESSAGES: &[&str] = &[
    "2024-01-15 10:00:02 INFO  Starting application version 2.4.1",
    "GET /healthz 200 OK (1ms)",
    "api_logging:{request_url=/lowercase}",
    "API_LOGGING {request_url=/missing-colon}",
    r#"{"level":"INFO","msg":"request_url=/v1/orders api_method=GET"}"#,
    "",
];
