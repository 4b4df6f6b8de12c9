//! Where the introspection result comes from: a local file or a live endpoint.

use std::{fmt, path::PathBuf, str::FromStr, time::Duration};

use clap::ValueEnum;
use eyre::{Context, Result, bail, eyre};
use serde_json::{Value, json};

/// Standard introspection query; type references are unwrapped eight levels deep.
pub const INTROSPECTION_QUERY: &str = r#"query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types { ...FullType }
    directives { name description locations args { ...InputValue } }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args { ...InputValue }
    type { ...TypeRef }
    isDeprecated
    deprecationReason
  }
  inputFields { ...InputValue }
  interfaces { ...TypeRef }
  enumValues(includeDeprecated: true) { name description isDeprecated deprecationReason }
  possibleTypes { ...TypeRef }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType { kind name ofType { kind name } }
            }
          }
        }
      }
    }
  }
}"#;

/// HTTP method used for the introspection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum HttpMethod {
    /// Query passed in the `query` URL parameter
    Get,
    /// Query sent as a JSON body
    #[default]
    Post,
}

/// An extra request header given as `Name=Value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl FromStr for Header {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("header '{}' must have the form Name=Value", s))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(format!("header '{}' has an empty name", s));
        }
        if !name.bytes().all(|b| b.is_ascii_graphic() && b != b':') {
            return Err(format!("'{}' is not a valid header name", name));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
        })
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Introspection JSON text plus a label for error reports.
#[derive(Debug)]
pub struct SchemaDocument {
    pub label: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub enum SchemaSource {
    File(PathBuf),
    Service {
        url: String,
        method: HttpMethod,
        headers: Vec<Header>,
        timeout: Duration,
    },
}

impl SchemaSource {
    /// Human-readable origin of the schema.
    pub fn label(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Service { url, .. } => url.clone(),
        }
    }

    /// Read or download the introspection result.
    pub fn fetch(&self) -> Result<SchemaDocument> {
        let content = match self {
            Self::File(path) => std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read schema file '{}'", path.display()))?,
            Self::Service {
                url,
                method,
                headers,
                timeout,
            } => {
                tracing::info!(%url, method = ?method, "requesting introspection");
                let body = introspect(url, *method, headers, *timeout)?;
                check_response_errors(&body)?;
                body
            }
        };
        Ok(SchemaDocument {
            label: self.label(),
            content,
        })
    }
}

fn introspect(url: &str, method: HttpMethod, headers: &[Header], timeout: Duration) -> Result<String> {
    let agent = ureq::AgentBuilder::new().timeout(timeout).build();

    let request = match method {
        HttpMethod::Get => agent.get(url).query("query", INTROSPECTION_QUERY),
        HttpMethod::Post => agent.post(url),
    };
    let request = headers
        .iter()
        .fold(request.set("Accept", "application/json"), |request, header| {
            request.set(&header.name, &header.value)
        });

    let response = match method {
        HttpMethod::Get => request.call(),
        HttpMethod::Post => request.send_json(json!({
            "query": INTROSPECTION_QUERY,
            "operationName": "IntrospectionQuery",
        })),
    };

    let response = response.map_err(|e| match e {
        ureq::Error::Status(code, response) => eyre!(
            "introspection request to {} failed: HTTP {} {}",
            url,
            code,
            response.status_text()
        ),
        other => eyre!(other).wrap_err(format!("introspection request to {} failed", url)),
    })?;

    response
        .into_string()
        .wrap_err("failed to read introspection response")
}

/// A GraphQL response carrying `errors` and no data cannot hold a schema.
fn check_response_errors(body: &str) -> Result<()> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        // Not JSON at all; the schema parser reports the exact position.
        return Ok(());
    };
    let has_data = value.get("data").is_some_and(|data| !data.is_null());
    let errors: Vec<&str> = value
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .map(|error| error.get("message").and_then(Value::as_str).unwrap_or("unknown error"))
                .collect()
        })
        .unwrap_or_default();

    if !has_data && !errors.is_empty() {
        bail!("introspection query was rejected: {}", errors.join("; "));
    }
    for error in &errors {
        tracing::warn!(error, "introspection response reported an error");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let header: Header = "Authorization=Bearer a=b".parse().unwrap();
        assert_eq!(header.name, "Authorization");
        assert_eq!(header.value, "Bearer a=b");
        assert_eq!(header.to_string(), "Authorization=Bearer a=b");

        let empty: Header = "X-Empty=".parse().unwrap();
        assert_eq!(empty.value, "");
    }

    #[test]
    fn test_parse_malformed_header() {
        assert!("Authorization".parse::<Header>().is_err());
        assert!("=value".parse::<Header>().is_err());
        assert!("Bad Name=value".parse::<Header>().is_err());
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{}").unwrap();

        let document = SchemaSource::File(path.clone()).fetch().unwrap();
        assert_eq!(document.content, "{}");
        assert_eq!(document.label, path.display().to_string());
    }

    #[test]
    fn test_missing_file() {
        let err = SchemaSource::File(PathBuf::from("does/not/exist.json"))
            .fetch()
            .unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_response_errors() {
        let rejected = r#"{"errors":[{"message":"introspection disabled"}]}"#;
        let err = check_response_errors(rejected).unwrap_err();
        assert!(err.to_string().contains("introspection disabled"));

        let partial = r#"{"data":{"__schema":{}},"errors":[{"message":"minor"}]}"#;
        assert!(check_response_errors(partial).is_ok());
        assert!(check_response_errors("not json").is_ok());
    }

    #[test]
    fn test_introspection_query_shape() {
        assert!(INTROSPECTION_QUERY.starts_with("query IntrospectionQuery"));
        for fragment in ["FullType", "InputValue", "TypeRef"] {
            assert!(INTROSPECTION_QUERY.contains(&format!("fragment {} on", fragment)));
        }
    }
}
