//! Corpus line sources
//!
//! Opens a corpus file and yields its lines with transparent
//! decompression. The decoder is picked by file extension; anything
//! unrecognized is read as plain text. Content is treated as
//! byte-transparent UTF-8, decoded lossily rather than rejected.

use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// A sequence of text lines from one corpus file.
pub struct LineSource {
    reader: Box<dyn BufRead + Send>,
    line_buffer: Vec<u8>,
}

/// Open `path` as a line source, decompressing `.gz` and `.bz2`
/// transparently.
pub fn open_lines(path: &Path) -> io::Result<LineSource> {
    let file = File::open(path)?;
    let reader: Box<dyn Read + Send> = match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => Box::new(MultiGzDecoder::new(file)),
        Some("bz2") => Box::new(BzDecoder::new(file)),
        _ => Box::new(file),
    };
    Ok(LineSource {
        reader: Box::new(BufReader::with_capacity(READ_BUFFER_SIZE, reader)),
        line_buffer: Vec::with_capacity(4096),
    })
}

impl Iterator for LineSource {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.line_buffer.clear();

        match self.reader.read_until(b'\n', &mut self.line_buffer) {
            Ok(0) => None, // EOF
            Ok(_) => {
                while self.line_buffer.last() == Some(&b'\n')
                    || self.line_buffer.last() == Some(&b'\r')
                {
                    self.line_buffer.pop();
                }

                match std::str::from_utf8(&self.line_buffer) {
                    Ok(s) => Some(Ok(s.to_string())),
                    Err(_) => Some(Ok(String::from_utf8_lossy(&self.line_buffer).into_owned())),
                }
            }
            Err(e) => Some(Err(e)),
        }
    }
}
