// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_core::{credentials::Secret, hmac::hmac_sha256};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Method;

use crate::{resource_context::ResourceLink, Error};

/// Characters left as-is when encoding the authorization header.
const TOKEN_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Signs requests with an account's primary (master) key.
#[derive(Clone, Debug)]
pub struct AuthorizationToken {
    key: Secret,
}

impl AuthorizationToken {
    /// Creates a token from a base64-encoded account key.
    ///
    /// The key is checked here, so a malformed key fails before any request is sent.
    pub fn primary_key(key: &Secret) -> crate::Result<Self> {
        hmac_sha256("", key).map_err(credential_error)?;
        Ok(Self { key: key.clone() })
    }

    /// Computes the `authorization` header value for a request.
    ///
    /// `date` must be the same value that is sent in the `x-ms-date` header.
    pub(crate) fn sign(
        &self,
        method: &Method,
        link: &ResourceLink,
        date: &str,
    ) -> crate::Result<String> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            method.as_str().to_lowercase(),
            link.resource_type().path_segment(),
            link.link_for_signing(),
            date.to_lowercase(),
        );
        let signature = hmac_sha256(&payload, &self.key).map_err(credential_error)?;

        let token = format!("type=master&ver=1.0&sig={signature}");
        Ok(utf8_percent_encode(&token, TOKEN_ENCODE_SET).to_string())
    }
}

fn credential_error(e: azure_core::Error) -> Error {
    Error::Credential {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_context::ResourceType;

    #[test]
    fn signs_known_vector() {
        // base64("quickstart-test-key")
        let token = AuthorizationToken::primary_key(&Secret::new("cXVpY2tzdGFydC10ZXN0LWtleQ=="))
            .unwrap();
        let link = ResourceLink::root(ResourceType::Databases)
            .item("ToDoList")
            .feed(ResourceType::Containers)
            .item("Items")
            .feed(ResourceType::Items)
            .item("SalesOrder1");
        let header = token
            .sign(&Method::GET, &link, "Tue, 01 Nov 1994 08:12:31 GMT")
            .unwrap();
        assert_eq!(
            header,
            "type%3Dmaster%26ver%3D1.0%26sig%3DI9Rggf4YRVkvMe7mJXFs%2BbKzgTNH1r7XwZg54ww3n98%3D"
        );
    }

    #[test]
    fn rejects_keys_that_are_not_base64() {
        let err = AuthorizationToken::primary_key(&Secret::new("secret:)")).unwrap_err();
        assert!(matches!(err, Error::Credential { .. }));
    }

    #[test]
    fn debug_hides_the_key() {
        let token = AuthorizationToken::primary_key(&Secret::new("a2V5")).unwrap();
        assert!(!format!("{token:?}").contains("a2V5"));
    }
}
