// https://redis.io/docs/reference/protocol-spec

use bytes::{BufMut, Bytes, BytesMut};

static CRLF: &[u8; 2] = b"\r\n";

/// A single RESP frame, used both for decoded commands and for replies.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Simple(String),
    Error(String),
    Integer(i64),
    Bulk(Bytes),
    Null,
    Array(Vec<Frame>),
}

impl Frame {
    /// Exact number of bytes [`Frame::write_to`] appends for this frame,
    /// including type markers, decimal lengths and CRLF terminators.
    pub fn encoded_len(&self) -> usize {
        match self {
            Frame::Simple(s) => 1 + s.len() + CRLF.len(),
            Frame::Error(s) => 1 + s.len() + CRLF.len(),
            Frame::Integer(i) => 1 + signed_decimal_width(*i) + CRLF.len(),
            Frame::Bulk(bytes) => {
                let len = bytes.len();
                1 + decimal_width(len as u64) + CRLF.len() + len + CRLF.len()
            }
            // $-1\r\n
            Frame::Null => 5,
            Frame::Array(frames) => {
                let header = 1 + decimal_width(frames.len() as u64) + CRLF.len();
                frames.iter().fold(header, |size, f| size + f.encoded_len())
            }
        }
    }

    pub fn write_to(&self, buf: &mut BytesMut) {
        match self {
            Frame::Simple(s) => {
                buf.put_u8(b'+');
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Frame::Error(s) => {
                buf.put_u8(b'-');
                buf.extend_from_slice(s.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Frame::Integer(i) => {
                buf.put_u8(b':');
                buf.extend_from_slice(i.to_string().as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Frame::Bulk(bytes) => {
                buf.put_u8(b'$');
                buf.extend_from_slice(bytes.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(bytes);
                buf.extend_from_slice(CRLF);
            }
            Frame::Null => {
                buf.extend_from_slice(b"$-1\r\n");
            }
            Frame::Array(frames) => {
                buf.put_u8(b'*');
                buf.extend_from_slice(frames.len().to_string().as_bytes());
                buf.extend_from_slice(CRLF);
                for frame in frames {
                    frame.write_to(buf);
                }
            }
        }
    }
}

/// Frame encoder with a reusable output buffer. The buffer is reserved to the
/// exact encoded size before writing, and cleared (capacity retained) between
/// calls; the returned view is valid until the next call.
pub struct Serializer {
    buf: BytesMut,
}

impl Serializer {
    pub fn new() -> Serializer {
        Serializer {
            buf: BytesMut::with_capacity(256),
        }
    }

    pub fn serialize(&mut self, frame: &Frame) -> &[u8] {
        self.buf.clear();
        self.buf.reserve(frame.encoded_len());
        frame.write_to(&mut self.buf);
        &self.buf
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

fn decimal_width(mut n: u64) -> usize {
    let mut width = 1;
    while n >= 10 {
        n /= 10;
        width += 1;
    }
    width
}

fn signed_decimal_width(n: i64) -> usize {
    if n < 0 {
        1 + decimal_width(n.unsigned_abs())
    } else {
        decimal_width(n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact(frame: Frame, expected: &[u8]) {
        let mut serializer = Serializer::new();
        let encoded = serializer.serialize(&frame);
        assert_eq!(encoded, expected);
        assert_eq!(frame.encoded_len(), expected.len());
    }

    #[test]
    fn serialize_simple_string() {
        assert_exact(Frame::Simple("OK".to_string()), b"+OK\r\n");
    }

    #[test]
    fn serialize_error() {
        assert_exact(
            Frame::Error("ERR unknown command 'FOO'".to_string()),
            b"-ERR unknown command 'FOO'\r\n",
        );
    }

    #[test]
    fn serialize_integer() {
        assert_exact(Frame::Integer(0), b":0\r\n");
        assert_exact(Frame::Integer(1000), b":1000\r\n");
        assert_exact(Frame::Integer(-2), b":-2\r\n");
        assert_exact(Frame::Integer(i64::MIN), b":-9223372036854775808\r\n");
    }

    #[test]
    fn serialize_bulk_string() {
        assert_exact(Frame::Bulk(Bytes::from("hello")), b"$5\r\nhello\r\n");
        assert_exact(Frame::Bulk(Bytes::new()), b"$0\r\n\r\n");
    }

    #[test]
    fn serialize_bulk_string_with_crlf_payload() {
        assert_exact(
            Frame::Bulk(Bytes::from("a\r\nb")),
            b"$4\r\na\r\nb\r\n",
        );
    }

    #[test]
    fn serialize_null() {
        assert_exact(Frame::Null, b"$-1\r\n");
    }

    #[test]
    fn serialize_array() {
        assert_exact(Frame::Array(vec![]), b"*0\r\n");
        assert_exact(
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("GET")),
                Frame::Bulk(Bytes::from("key")),
            ]),
            b"*2\r\n$3\r\nGET\r\n$3\r\nkey\r\n",
        );
    }

    #[test]
    fn serialize_nested_array() {
        assert_exact(
            Frame::Array(vec![
                Frame::Array(vec![Frame::Integer(1), Frame::Integer(2)]),
                Frame::Simple("done".to_string()),
            ]),
            b"*2\r\n*2\r\n:1\r\n:2\r\n+done\r\n",
        );
    }

    #[test]
    fn serializer_buffer_is_reused() {
        let mut serializer = Serializer::new();
        assert_eq!(serializer.serialize(&Frame::Simple("a".to_string())), b"+a\r\n");
        assert_eq!(serializer.serialize(&Frame::Integer(7)), b":7\r\n");
    }
}
