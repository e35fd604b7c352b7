use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Credentials for talking to the console API.
///
/// The account server accepts an OAuth access token as a bearer token.
/// Unauthenticated requests are allowed through; the server decides what
/// an anonymous caller may see.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Bearer access token.
    AccessToken(SecretString),
    /// No `Authorization` header.
    Anonymous,
}

impl Credentials {
    /// Default headers carrying these credentials.
    ///
    /// The token value is marked sensitive so it never shows up in
    /// `Debug` output of the request.
    pub fn headers(&self) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        if let Self::AccessToken(token) = self {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| Error::Authentication {
                    message: format!("invalid access token header value: {e}"),
                })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }
}
