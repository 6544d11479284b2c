//! App-only bearer token exchange (`POST oauth2/token`).

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tweetfan_core::AppConfig;

use super::{build_http_client, endpoint_url};
use crate::error::FetchError;

const TOKEN_PATH: &str = "oauth2/token";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Characters left as-is when encoding consumer credentials.
const CREDENTIAL: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token_type: String,
    access_token: String,
}

fn encode_credential(value: &str) -> String {
    utf8_percent_encode(value, CREDENTIAL).to_string()
}

/// Exchanges a consumer key and secret for an application bearer token.
///
/// Key and secret are percent-encoded before being sent as HTTP Basic
/// credentials with `grant_type=client_credentials`.
///
/// # Errors
///
/// - [`FetchError::InvalidBaseUrl`] if `base_url` is not an absolute URL.
/// - [`FetchError::UnexpectedStatus`] on a non-2xx response.
/// - [`FetchError::Deserialize`] if the body is not a token response.
/// - [`FetchError::TokenRejected`] if the token type is not `bearer`.
/// - [`FetchError::Http`] on network or TLS failure.
pub async fn fetch_bearer_token(
    base_url: &str,
    consumer_key: &str,
    consumer_secret: &str,
    timeout_secs: u64,
    user_agent: &str,
) -> Result<String, FetchError> {
    let url = endpoint_url(base_url, TOKEN_PATH)?;
    let client = build_http_client(timeout_secs, user_agent)?;

    let response = client
        .post(url.clone())
        .basic_auth(
            encode_credential(consumer_key),
            Some(encode_credential(consumer_secret)),
        )
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body("grant_type=client_credentials")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().await?;
    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| FetchError::Deserialize {
            context: "oauth2/token response".to_string(),
            source: e,
        })?;

    if !token.token_type.eq_ignore_ascii_case("bearer") {
        return Err(FetchError::TokenRejected(format!(
            "unexpected token type \"{}\"",
            token.token_type
        )));
    }
    if token.access_token.is_empty() {
        return Err(FetchError::TokenRejected("empty access token".to_string()));
    }

    tracing::info!("acquired application bearer token");
    Ok(token.access_token)
}

/// Uses the configured bearer token, or exchanges the consumer key and secret
/// for one when no token is configured.
///
/// # Errors
///
/// Returns [`FetchError::MissingCredentials`] if neither is configured, or
/// any error from [`fetch_bearer_token`].
pub async fn resolve_bearer_token(config: &AppConfig) -> Result<String, FetchError> {
    if let Some(token) = &config.bearer_token {
        return Ok(token.clone());
    }

    let Ok((key, secret)) = config.consumer_credentials() else {
        return Err(FetchError::MissingCredentials);
    };
    fetch_bearer_token(
        &config.api_base_url,
        key,
        secret,
        config.request_timeout_secs,
        &config.user_agent,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_unreserved_characters() {
        assert_eq!(encode_credential("xvz1evFS4wEEPTGEFPHBog"), "xvz1evFS4wEEPTGEFPHBog");
        assert_eq!(encode_credential("a-b.c_d~e"), "a-b.c_d~e");
    }

    #[test]
    fn encodes_reserved_characters() {
        assert_eq!(encode_credential("a b+c"), "a%20b%2Bc");
        assert_eq!(encode_credential("s/cret"), "s%2Fcret");
    }
}
