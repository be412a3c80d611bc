use crate::utils::errors::{RelcertError, Result};
use ordermap::OrderMap;
use std::str::FromStr;

/// Collection filters forwarded verbatim to the certificate service as query parameters.
///
/// Keys are opaque to the client: nothing here knows which filters the service
/// understands, and results are never post-filtered locally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertificateFilters {
    params: OrderMap<String, String>,
}

impl CertificateFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated key keeps its first position and the last value
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Query pairs in insertion order
    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    /// Parse `key=value` arguments as given on the command line
    pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut filters = Self::new();
        for arg in args {
            let (key, value) = parse_pair(arg.as_ref())?;
            filters.insert(key, value);
        }
        Ok(filters)
    }
}

fn parse_pair(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(RelcertError::InvalidInput(format!(
            "Invalid filter '{arg}': expected key=value"
        ))),
    }
}

impl FromStr for CertificateFilters {
    type Err = RelcertError;

    /// Parse a comma-separated `key=value,key=value` list
    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').filter(|p| !p.trim().is_empty()).collect();
        Self::parse_args(&parts)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CertificateFilters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut filters = Self::new();
        for (k, v) in iter {
            filters.insert(k, v);
        }
        filters
    }
}
