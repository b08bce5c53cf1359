// GraphQL-over-HTTP client for one data.all backend module.
//
// Every operation is a POST of `{operationName, query, variables}` to a
// single endpoint. Auth and cross-origin headers are default headers on the
// underlying reqwest client, so they ride along on every request.

use reqwest::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CACHE_CONTROL,
    HeaderMap, HeaderValue,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::graphql::{Envelope, GraphQlRequest, Operation, Outcome};
use crate::transport::TransportConfig;

/// Build the headers attached to every operation.
///
/// The token is sent verbatim (no `Bearer` prefix) and marked sensitive so
/// it never shows up in debug output.
pub fn session_headers(token: &SecretString) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();

    let mut auth =
        HeaderValue::from_str(token.expose_secret().trim()).map_err(|e| Error::InvalidToken {
            message: format!("token is not a valid header value: {e}"),
        })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*"));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Ok(headers)
}

/// Async client bound to one GraphQL endpoint.
///
/// Cheap to clone: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout_secs: u64,
}

impl GraphQlClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client that authenticates every request with `token`.
    pub fn with_token(
        endpoint: Url,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_headers(session_headers(token)?)?;
        Ok(Self {
            http,
            endpoint,
            timeout_secs: transport.timeout_secs(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers).
    pub fn from_reqwest(endpoint: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            endpoint: Url::parse(endpoint)?,
            timeout_secs: 0,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── Execution ────────────────────────────────────────────────────

    /// Send one operation and decode the `{data, errors}` envelope.
    ///
    /// GraphQL errors come back as `Ok(Outcome::Errors)`. `Err` is reserved
    /// for requests that produced no usable envelope.
    pub async fn execute<O>(&self, op: &O) -> Result<Outcome<O::Data>, Error>
    where
        O: Operation + ?Sized,
    {
        debug!(
            operation = op.name(),
            kind = %op.kind(),
            endpoint = %self.endpoint,
            "sending GraphQL operation"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&GraphQlRequest::from_operation(op))
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            // Some servers report resolver failures with a 4xx/5xx status;
            // keep those as GraphQL errors when an envelope is present.
            return match serde_json::from_str::<Envelope>(&body) {
                Ok(envelope) if envelope.has_errors() => envelope.into_outcome(&body),
                _ => Err(Error::Http {
                    status: status.as_u16(),
                    body,
                }),
            };
        }

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        let outcome = envelope.into_outcome(&body)?;
        debug!(
            operation = op.name(),
            errors = outcome.errors().len(),
            "GraphQL operation completed"
        );
        Ok(outcome)
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn headers_carry_raw_token_and_cors() {
        let headers = session_headers(&SecretString::from("  eyJ.token  ")).unwrap();

        let auth = headers.get(AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
        assert_eq!(auth.to_str().unwrap(), "eyJ.token");
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        assert_eq!(headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-cache");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let err = session_headers(&SecretString::from("abc\ndef")).unwrap_err();
        assert!(matches!(err, Error::InvalidToken { .. }), "got {err:?}");
    }
}
