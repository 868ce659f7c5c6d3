use crate::error::{Result, ShopError};
use crate::interfaces::api::Request;
use std::io::BufRead;

/// Reads one JSON request per line.
///
/// Blank lines are skipped. A line that is not UTF-8 or does not decode
/// yields an error for that line only; the following lines are still read.
pub struct RequestReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> RequestReader<R> {
    /// Creates a new `RequestReader` from any buffered source (e.g. a
    /// `BufReader<File>` or locked stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    /// Returns an iterator that lazily reads and decodes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<Request>> {
        self.source.split(b'\n').filter_map(|line| match line {
            Ok(bytes) => match String::from_utf8(bytes) {
                Ok(line) if line.trim().is_empty() => None,
                Ok(line) => Some(Request::from_json(&line)),
                Err(err) => {
                    tracing::warn!(error = %err, "request line is not valid UTF-8");
                    Some(Err(ShopError::validation(
                        "payload",
                        "invalid request payload",
                    )))
                }
            },
            Err(err) => Some(Err(ShopError::from(err))),
        })
    }
}
