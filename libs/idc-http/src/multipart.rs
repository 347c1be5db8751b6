use bytes::Bytes;
use rand::Rng;
use rand::distr::Alphanumeric;

/// A multipart/form-data payload of text fields.
///
/// Covers the console's tenant-creation call, where the backend expects
/// form-data rather than JSON. Every field is a text part; the boundary is
/// random per form so payloads never collide with field content in
/// practice.
///
/// The form knows its own `content-type` value (with boundary); the request
/// builder uses it instead of any JSON default.
///
/// # Example
///
/// ```ignore
/// let form = MultipartForm::new()
///     .text("tenantName", "Acme Corp")
///     .text("tenantCity", "Orlando");
///
/// client.post(url).multipart(&form).send().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<(String, String)>,
}

impl MultipartForm {
    /// Create an empty form with a fresh random boundary.
    #[must_use]
    pub fn new() -> Self {
        let boundary: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(30)
            .map(char::from)
            .collect();
        Self {
            boundary: format!("idc-form-{boundary}"),
            parts: Vec::new(),
        }
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push((name.into(), value.into()));
        self
    }

    /// The boundary used to frame parts.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The `content-type` header value for this form.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Number of fields in the form.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Encode the form body with CRLF framing per RFC 2046.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        let mut body = String::new();
        for (name, value) in &self.parts {
            body.push_str("--");
            body.push_str(&self.boundary);
            body.push_str("\r\n");
            // Double quotes in field names are escaped per RFC 7578 §4.2.
            let escaped = name.replace('"', "\\\"");
            body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{escaped}\"\r\n\r\n"
            ));
            body.push_str(value);
            body.push_str("\r\n");
        }
        body.push_str("--");
        body.push_str(&self.boundary);
        body.push_str("--\r\n");
        Bytes::from(body)
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}
