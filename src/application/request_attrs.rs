//! Request attribute group and correlation id.

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{Extensions, Request, header};
use percent_encoding::percent_decode_str;
use tower_http::request_id::RequestId;

use crate::application::headers;
use crate::application::options::RequestLoggerOptions;
use crate::domain::attr::Attr;

/// Key of the request attribute group.
pub const REQUEST_KEY: &str = "request";

/// Key of the root-level correlation id attribute.
pub const ID_KEY: &str = "id";

/// Builds the attributes attached to a new entry.
///
/// Returns the root `id` attribute (when a correlation id is present)
/// followed by the `request` group. The group always holds `uri` and
/// `method`; unless `concise`, it also holds `host`, `path`, `proto`,
/// `remote` and `headers`.
///
/// # Example Output
///
/// ```json
/// {
///   "id": "5f0c...",
///   "request": {
///     "uri": "/hello?name=x",
///     "method": "GET",
///     "host": "localhost:8080",
///     "path": "/hello",
///     "proto": "HTTP/1.1",
///     "remote": "127.0.0.1:53122",
///     "headers": { "accept": "*/*" }
///   }
/// }
/// ```
pub fn request_attrs<B>(req: &Request<B>, options: &RequestLoggerOptions) -> Vec<Attr> {
    let mut attrs = Vec::with_capacity(2);

    let id = correlation_id(req.extensions());
    if !id.is_empty() {
        attrs.push(Attr::string(ID_KEY, id));
    }

    let mut group = vec![
        Attr::string("uri", req.uri().to_string()),
        Attr::string("method", req.method().as_str()),
    ];

    if !options.is_concise() {
        group.extend([
            Attr::string("host", host(req)),
            Attr::string("path", decode_path(req.uri().path())),
            Attr::string("proto", format!("{:?}", req.version())),
            Attr::string("remote", remote_addr(req.extensions())),
            headers::redact(
                req.headers(),
                options.leaks_sensitive_values(),
                options.sensitive_set(),
            ),
        ]);
    }

    attrs.push(Attr::group(REQUEST_KEY, group));
    attrs
}

/// Correlation id assigned by `tower_http`'s `SetRequestIdLayer`.
///
/// Returns an empty string when none was assigned or it is not UTF-8.
pub fn correlation_id(extensions: &Extensions) -> String {
    extensions
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Peer address recorded by `into_make_service_with_connect_info`.
fn remote_addr(extensions: &Extensions) -> String {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default()
}

/// Authority from the request target (HTTP/2, absolute-form), else `Host`.
fn host<B>(req: &Request<B>) -> String {
    if let Some(authority) = req.uri().authority() {
        return authority.to_string();
    }

    req.headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Percent-decodes a path. Malformed escapes are kept verbatim and invalid
/// UTF-8 is replaced.
fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}
