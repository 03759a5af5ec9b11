//! HTTP response headers.
use std::collections::{hash_map::Iter, HashMap};

/// HTTP headers.
///
/// Header names are stored lowercase, so all lookups are case insensitive.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Headers {
    headers: HashMap<String, String>,
}

impl Headers {
    /// Create new empty headers storage.
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
        }
    }

    /// Add a header, replacing any previous value. The name will be converted to lowercase.
    ///
    /// # Example
    ///
    /// ```
    /// # use rwf_views::http::Headers;
    /// let mut headers = Headers::new();
    /// headers.insert("X-Request-Id", "134");
    /// assert_eq!(headers.get("x-request-id"), Some(&String::from("134")));
    /// ```
    pub fn insert(&mut self, name: impl ToString, value: impl ToString) {
        self.headers
            .insert(name.to_string().to_lowercase(), value.to_string());
    }

    /// Add a header only if no header with that name is set yet.
    ///
    /// Returns `true` if the header was added.
    ///
    /// # Example
    ///
    /// ```
    /// # use rwf_views::http::Headers;
    /// let mut headers = Headers::new();
    /// assert!(headers.insert_if_absent("content-type", "text/plain"));
    /// assert!(!headers.insert_if_absent("Content-Type", "text/html"));
    /// assert_eq!(headers.get("content-type"), Some(&String::from("text/plain")));
    /// ```
    pub fn insert_if_absent(&mut self, name: impl ToString, value: impl ToString) -> bool {
        let name = name.to_string().to_lowercase();

        if self.headers.contains_key(&name) {
            false
        } else {
            self.headers.insert(name, value.to_string());
            true
        }
    }

    /// Get a header value by name. Case insensitive.
    pub fn get(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_lowercase())
    }

    /// Check if a header is set. Case insensitive.
    pub fn contains(&self, name: &str) -> bool {
        self.headers.contains_key(&name.to_lowercase())
    }

    /// Remove a header by name. Case insensitive.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.headers.remove(&name.to_lowercase())
    }

    /// Number of headers set.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// No headers are set.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Get a borrowing interator to the headers.
    pub fn iter(&self) -> Iter<String, String> {
        self.headers.iter()
    }

    /// Convert headers to bytes, one `name: value` line each.
    /// Used to send headers to the client.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut names = self.headers.keys().collect::<Vec<_>>();
        names.sort();

        let mut bytes = Vec::new();
        for name in names {
            bytes.extend_from_slice(name.as_bytes());
            bytes.extend_from_slice(b": ");
            bytes.extend_from_slice(self.headers[name].as_bytes());
            bytes.extend_from_slice(b"\r\n");
        }
        bytes
    }
}

impl From<HashMap<String, String>> for Headers {
    fn from(headers: HashMap<String, String>) -> Self {
        Self {
            headers: headers
                .into_iter()
                .map(|(name, value)| (name.to_lowercase(), value))
                .collect(),
        }
    }
}
