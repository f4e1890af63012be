//! Upload payloads

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Read};

/// Content handed to an upload
///
/// Text is uploaded as its UTF-8 bytes. A reader is drained fully before the
/// upload starts.
pub enum Payload<'a> {
    Bytes(Cow<'a, [u8]>),
    Text(Cow<'a, str>),
    Reader(Box<dyn Read + 'a>),
}

impl<'a> Payload<'a> {
    /// Wrap any reader
    pub fn reader(reader: impl Read + 'a) -> Self {
        Payload::Reader(Box::new(reader))
    }

    /// Collect the payload into an owned buffer
    pub fn into_bytes(self) -> io::Result<Vec<u8>> {
        match self {
            Payload::Bytes(bytes) => Ok(bytes.into_owned()),
            Payload::Text(text) => Ok(text.into_owned().into_bytes()),
            Payload::Reader(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf)?;
                Ok(buf)
            }
        }
    }
}

impl From<Vec<u8>> for Payload<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(Cow::Owned(bytes))
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Payload::Bytes(Cow::Borrowed(bytes))
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Payload<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Payload::Bytes(Cow::Borrowed(bytes.as_slice()))
    }
}

impl From<String> for Payload<'_> {
    fn from(text: String) -> Self {
        Payload::Text(Cow::Owned(text))
    }
}

impl<'a> From<&'a str> for Payload<'a> {
    fn from(text: &'a str) -> Self {
        Payload::Text(Cow::Borrowed(text))
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Bytes(bytes) => write!(f, "Payload::Bytes({} bytes)", bytes.len()),
            Payload::Text(text) => write!(f, "Payload::Text({} chars)", text.chars().count()),
            Payload::Reader(_) => f.write_str("Payload::Reader(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_utf8() {
        let payload = Payload::from("héllo");
        assert_eq!(payload.into_bytes().unwrap(), "héllo".as_bytes());
    }

    #[test]
    fn test_reader_is_drained() {
        let payload = Payload::reader(io::Cursor::new(vec![1u8, 2, 3]));
        assert_eq!(payload.into_bytes().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_reader_error_surfaces() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("stream closed"))
            }
        }
        let err = Payload::reader(Broken).into_bytes().unwrap_err();
        assert_eq!(err.to_string(), "stream closed");
    }

    #[test]
    fn test_debug_hides_content() {
        let rendered = format!("{:?}", Payload::from(b"secret".as_slice()));
        assert_eq!(rendered, "Payload::Bytes(6 bytes)");
    }
}
