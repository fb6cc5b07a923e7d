//! In-process service-call conversion over HTTP.
//!
//! POSTs the docx bytes to a conversion endpoint (a Gotenberg-style
//! service) and treats the response body as the pdf. The agent-level
//! timeout bounds the whole call.

use std::io::Read;
use std::time::Duration;

use crate::error::ConvertError;
use crate::PdfConverter;

const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// [`PdfConverter`] backed by a remote HTTP conversion service.
#[derive(Debug, Clone)]
pub struct HttpConverter {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpConverter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }
}

impl PdfConverter for HttpConverter {
    fn convert(&self, docx: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", DOCX_MIME)
            .set("Accept", "application/pdf")
            .send_bytes(docx)
            .map_err(|e| ConvertError::Http(Box::new(e)))?;

        let mut pdf = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut pdf)
            .map_err(ConvertError::HttpRead)?;
        Ok(pdf)
    }
}
