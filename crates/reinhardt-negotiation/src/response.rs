//! Turning a negotiation result into an HTTP response

use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use http::{Response, StatusCode};

use super::negotiator::ContentNegotiator;
use super::produces::ProducedContentTypes;
use super::provider::Model;

/// Renders `model` for a request, choosing the provider from its headers
///
/// Several `Accept` field lines are combined in order, as one list. A missing
/// `Accept` header is treated as `default_accept`, or as an empty header when
/// no default is given. An `Accept` value that is not visible ASCII is
/// treated as empty as well.
///
/// - negotiation failure: `406 Not Acceptable` with a plain text reason
/// - provider failure: `500 Internal Server Error`
/// - success: `200 OK` with `Content-Type` set to the negotiated type
///
/// # Examples
///
/// ```
/// use http::{HeaderMap, StatusCode, header::ACCEPT};
/// use reinhardt_negotiation::{
///     ContentNegotiator, ContentType, JsonProvider, ProducedContentTypes, ProviderRegistry,
///     response::respond,
/// };
/// use serde_json::json;
///
/// let mut registry = ProviderRegistry::new();
/// registry.register_provider(JsonProvider::new()).unwrap();
/// let negotiator = ContentNegotiator::new(&registry);
/// let produces = ProducedContentTypes::new().with(ContentType::new("application/json"));
///
/// let mut headers = HeaderMap::new();
/// headers.insert(ACCEPT, "application/json".parse().unwrap());
///
/// let response = respond(&negotiator, &headers, None, &produces, &json!({"ok": true}));
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.body().as_ref(), br#"{"ok":true}"#);
/// ```
pub fn respond(
	negotiator: &ContentNegotiator<'_>,
	headers: &HeaderMap,
	default_accept: Option<&str>,
	produces: &ProducedContentTypes,
	model: &dyn Model,
) -> Response<Bytes> {
	let accept = accept_value(headers, default_accept);

	let negotiated = match negotiator.negotiate(&accept, produces) {
		Ok(negotiated) => negotiated,
		Err(err) => return plain_text(err.status_code(), err.to_string()),
	};

	let body = match negotiated.provider.provide(model) {
		Ok(body) => body,
		Err(err) => {
			tracing::error!(
				content_type = %negotiated.content_type,
				error = %err,
				"provider failed to render response"
			);
			return plain_text(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
		}
	};

	let mut response = Response::new(body);
	match HeaderValue::try_from(negotiated.content_type.to_string()) {
		Ok(value) => {
			response.headers_mut().insert(CONTENT_TYPE, value);
		}
		Err(_) => {
			tracing::warn!(
				content_type = %negotiated.content_type,
				"negotiated content type is not a valid header value"
			);
		}
	}
	response
}

/// Combines every `Accept` field line into one comma separated value
fn accept_value(headers: &HeaderMap, default_accept: Option<&str>) -> String {
	let mut lines = headers.get_all(ACCEPT).iter().peekable();
	if lines.peek().is_none() {
		return default_accept.unwrap_or_default().to_string();
	}

	match lines
		.map(|value| value.to_str())
		.collect::<Result<Vec<_>, _>>()
	{
		Ok(lines) => lines.join(", "),
		Err(_) => {
			tracing::debug!("accept header is not visible ascii, treating it as empty");
			String::new()
		}
	}
}

fn plain_text(status: StatusCode, message: String) -> Response<Bytes> {
	let mut response = Response::new(Bytes::from(message));
	*response.status_mut() = status;
	response.headers_mut().insert(
		CONTENT_TYPE,
		HeaderValue::from_static("text/plain; charset=utf-8"),
	);
	response
}
