//! HTTP client utilities shared by the generation client.

use reqwest::{Client, RequestBuilder};

use crate::options::TransportOptions;

/// Build a configured HTTP client from transport options.
pub fn build_http_client(transport: &TransportOptions) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport.timeout {
        builder = builder.timeout(timeout);
    }

    builder.build()
}

/// Apply bearer auth and extra headers from transport options.
pub fn apply_headers(mut request: RequestBuilder, transport: &TransportOptions) -> RequestBuilder {
    if let Some(api_key) = &transport.api_key {
        request = request.bearer_auth(api_key.expose_secret());
    }

    if let Some(headers) = &transport.extra_headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }
    request
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_http_client() {
        let transport = TransportOptions::default().with_timeout(Duration::from_secs(30));
        assert!(build_http_client(&transport).is_ok());
    }

    #[test]
    fn test_build_http_client_without_timeout() {
        let transport = TransportOptions::new("http://localhost:5000");
        assert!(build_http_client(&transport).is_ok());
    }
}
