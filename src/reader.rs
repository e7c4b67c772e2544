//! Reading mnemonic records from byte streams.
//!
//! [`MnemonicReader`] reads a whole export file, decodes it (see
//! [`crate::encoding`]), and splits it into one text block per record. A new
//! block starts at a blank line or at an `=LDR` line, so files that run records
//! together without separators still split correctly.
//!
//! # Examples
//!
//! ```
//! use serial_holdings::MnemonicReader;
//! use std::io::Cursor;
//!
//! let data = "=LDR  00000cas a2200000 a 4500\n=001  1\n\n=LDR  00000cas a2200000 a 4500\n=001  2\n";
//! let mut reader = MnemonicReader::new(Cursor::new(data));
//!
//! let mut ids = Vec::new();
//! while let Some(record) = reader.read_record()? {
//!     ids.push(record.get_control_field("001").unwrap_or_default().to_string());
//! }
//! assert_eq!(ids, ["1", "2"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::config::HoldingsConfig;
use crate::encoding::{decode_stream, TextEncoding};
use crate::error::Result;
use crate::record::Record;
use std::collections::VecDeque;
use std::io::Read;

/// Reader for mnemonic (`=TAG  ...`) record streams.
///
/// The stream is read to the end on first use. A block that fails to parse
/// (no leader) is returned as an error and reading continues with the next
/// block.
#[derive(Debug)]
pub struct MnemonicReader<R: Read> {
    reader: R,
    config: HoldingsConfig,
    blocks: Option<VecDeque<String>>,
    encoding: Option<TextEncoding>,
    records_read: usize,
}

impl<R: Read> MnemonicReader<R> {
    /// Create a reader with the default configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, HoldingsConfig::default())
    }

    /// Create a reader whose records carry `config` (record source, local
    /// OCLC field).
    pub fn with_config(reader: R, config: HoldingsConfig) -> Self {
        MnemonicReader {
            reader,
            config,
            blocks: None,
            encoding: None,
            records_read: 0,
        }
    }

    /// Encoding chosen for the stream, once it has been read.
    #[must_use]
    pub fn encoding(&self) -> Option<TextEncoding> {
        self.encoding
    }

    /// Number of blocks handed out so far, including ones that failed to parse.
    #[must_use]
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    fn load(&mut self) -> Result<&mut VecDeque<String>> {
        if self.blocks.is_none() {
            let mut bytes = Vec::new();
            self.reader.read_to_end(&mut bytes)?;
            let (text, encoding) = decode_stream(&bytes);
            let blocks = split_records(&text);
            tracing::debug!(
                blocks = blocks.len(),
                encoding = encoding.name(),
                "split mnemonic stream"
            );
            self.encoding = Some(encoding);
            self.blocks = Some(blocks.into());
        }
        Ok(self.blocks.get_or_insert_with(VecDeque::new))
    }

    /// Next raw record block, or `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the underlying source fails.
    pub fn read_block(&mut self) -> Result<Option<String>> {
        let block = self.load()?.pop_front();
        if block.is_some() {
            self.records_read += 1;
        }
        Ok(block)
    }

    /// Parse the next record, or return `None` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an IO error from the source, or
    /// [`MarcError::MissingLeader`](crate::MarcError::MissingLeader) for a block
    /// without an `=LDR` line. Later blocks can still be read after that error.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        match self.read_block()? {
            Some(block) => Record::from_mnemonic_with_config(&block, &self.config).map(Some),
            None => Ok(None),
        }
    }
}

impl<R: Read> Iterator for MnemonicReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Split decoded text into record blocks.
///
/// Blank lines end a block and an `=LDR` line always starts one. Blocks made
/// only of whitespace are dropped.
#[must_use]
pub fn split_records(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let starts_record = line
            .get(..4)
            .is_some_and(|head| head.eq_ignore_ascii_case("=LDR"));
        if line.trim().is_empty() || starts_record {
            if !current.trim().is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            current.clear();
            if line.trim().is_empty() {
                continue;
            }
        }
        current.push_str(line);
        current.push('\n');
    }
    if !current.trim().is_empty() {
        blocks.push(current);
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarcError;
    use std::io::Cursor;

    const LDR: &str = "=LDR  00000cas a2200000 a 4500";

    #[test]
    fn test_split_on_blank_lines_and_leaders() {
        let text = format!("{LDR}\n=001  1\n\n\n{LDR}\n=001  2\n{LDR}\n=001  3\n");
        let blocks = split_records(&text);
        assert_eq!(blocks.len(), 3);
        assert!(blocks[1].ends_with("=001  2\n"));
    }

    #[test]
    fn test_crlf_input() {
        let text = format!("{LDR}\r\n=001  1\r\n\r\n{LDR}\r\n=001  2\r\n");
        let blocks = split_records(&text);
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_bad_block_does_not_stop_reading() {
        let text = format!("=001  orphan\n\n{LDR}\n=001  2\n");
        let mut reader = MnemonicReader::new(Cursor::new(text));
        assert!(matches!(reader.next(), Some(Err(MarcError::MissingLeader(_)))));
        let record = reader.next().unwrap().unwrap();
        assert_eq!(record.get_control_field("001"), Some("2"));
        assert!(reader.next().is_none());
        assert_eq!(reader.records_read(), 2);
    }

    #[test]
    fn test_latin1_stream() {
        let mut bytes = format!("{LDR}\n=245  00$aCaf").into_bytes();
        bytes.push(0xe9);
        let mut reader = MnemonicReader::new(Cursor::new(bytes));
        let record = reader.read_record().unwrap().unwrap();
        assert_eq!(record.get_field("245").unwrap().get_subfield('a'), Some("Café"));
        assert_eq!(reader.encoding(), Some(TextEncoding::Windows1252));
    }
}
