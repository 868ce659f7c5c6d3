use crate::error::Result;
use crate::interfaces::api::Response;
use std::io::Write;

/// Writes one JSON response per line.
pub struct ResponseWriter<W: Write> {
    sink: W,
}

impl<W: Write> ResponseWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn write(&mut self, response: &Response) -> Result<()> {
        serde_json::to_writer(&mut self.sink, response).map_err(std::io::Error::from)?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }
}
