//! Pull-based reader for newline-delimited JSON bodies.
//!
//! Only the current partial line is buffered, so large exports are decoded one
//! record at a time as the bytes arrive. A stream is consumed as it is read and
//! cannot be restarted.

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use futures_util::stream::{self, BoxStream, Stream, StreamExt};
use serde::de::DeserializeOwned;

use crate::clients::errors::ndjson_errors::NdjsonError;

pub struct NdjsonStream<T> {
    chunks: BoxStream<'static, Result<Bytes, NdjsonError>>,
    buffer: Vec<u8>,
    exhausted: bool,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> NdjsonStream<T> {
    pub fn new<S, E>(chunks: S) -> Self
    where
        S: Stream<Item = Result<Bytes, E>> + Send + 'static,
        E: fmt::Display,
    {
        let chunks = chunks
            .map(|chunk| chunk.map_err(|e| NdjsonError::Transport(e.to_string())))
            .boxed();

        NdjsonStream {
            chunks,
            buffer: Vec::new(),
            exhausted: false,
            _record: PhantomData,
        }
    }

    /// A stream over already-available lines, one record per entry.
    #[cfg(test)]
    pub(crate) fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: Send + 'static,
    {
        let chunks = lines
            .into_iter()
            .map(|line| Ok::<_, NdjsonError>(Bytes::from(line + "\n")));
        Self::new(stream::iter(chunks))
    }

    /// The next decoded record, or `None` once the body is exhausted.
    ///
    /// Blank lines are skipped. A line that does not decode yields
    /// [`NdjsonError::Malformed`] and reading can continue; a transport failure
    /// yields [`NdjsonError::Transport`] and ends the stream.
    pub async fn next_record(&mut self) -> Option<Result<T, NdjsonError>> {
        loop {
            while let Some(raw) = self.take_line() {
                let line = raw.trim();
                if line.is_empty() {
                    continue;
                }
                return Some(
                    serde_json::from_str(line).map_err(|e| NdjsonError::Malformed(e.to_string())),
                );
            }

            if self.exhausted {
                return None;
            }

            match self.chunks.next().await {
                Some(Ok(chunk)) => self.buffer.extend_from_slice(&chunk),
                Some(Err(e)) => {
                    self.exhausted = true;
                    self.buffer.clear();
                    return Some(Err(e));
                }
                None => self.exhausted = true,
            }
        }
    }

    fn take_line(&mut self) -> Option<String> {
        if let Some(end) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            return Some(String::from_utf8_lossy(&line).into_owned());
        }

        // The last line of a body may lack its newline.
        if self.exhausted && !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            return Some(String::from_utf8_lossy(&rest).into_owned());
        }

        None
    }
}
