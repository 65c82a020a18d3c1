use bytes::{Buf, BytesMut};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::frame::{Frame, Serializer};
use crate::parser::{Parser, Status};

/// Per-connection state: the socket, the scratch buffers, and the codec.
///
/// Bytes read from the socket land in the read buffer and are fed through the
/// incremental parser; replies for the batch accumulate in the write buffer
/// and go out in a single write. The buffers are cleared capacity-retained
/// between batches, so steady-state request handling does not allocate.
pub struct Connection {
    stream: TcpStream,
    read_buf: BytesMut,
    read_buffer_size: usize,
    write_buf: BytesMut,
    parser: Parser,
    serializer: Serializer,
}

/// Outcome of draining one value from the buffered input.
pub enum Drained {
    Frame(Frame),
    /// Buffered input exhausted without completing a value.
    Idle,
    /// The input is not valid RESP.
    ProtocolError,
}

impl Connection {
    pub fn new(stream: TcpStream, read_buffer_size: usize) -> Connection {
        Connection {
            stream,
            read_buf: BytesMut::with_capacity(read_buffer_size),
            read_buffer_size,
            write_buf: BytesMut::new(),
            parser: Parser::new(),
            serializer: Serializer::new(),
        }
    }

    /// Reads once from the socket into the read buffer. Returns the number of
    /// bytes read; 0 means the peer closed the connection.
    pub async fn read(&mut self) -> std::io::Result<usize> {
        // `advance` in drain_frame gives consumed head-room back only through
        // `reserve`; without it the capacity dwindles to zero and `read_buf`
        // reports 0 on a healthy connection. Steady state this memmoves the
        // existing allocation rather than growing it.
        self.read_buf.reserve(self.read_buffer_size);
        self.stream.read_buf(&mut self.read_buf).await
    }

    pub fn drain_frame(&mut self) -> Drained {
        if self.read_buf.is_empty() {
            return Drained::Idle;
        }
        let progress = self.parser.feed(&self.read_buf);
        self.read_buf.advance(progress.consumed);
        match progress.status {
            Status::Complete(frame) => Drained::Frame(frame),
            // The parser buffered everything it was fed; wait for more input.
            Status::Incomplete => Drained::Idle,
            Status::Invalid => Drained::ProtocolError,
        }
    }

    /// Serializes a reply into the batch buffer. [`Connection::flush`] sends
    /// the whole batch at once.
    pub fn queue_reply(&mut self, frame: &Frame) {
        let encoded = self.serializer.serialize(frame);
        self.write_buf.extend_from_slice(encoded);
    }

    pub async fn flush(&mut self) -> std::io::Result<()> {
        if self.write_buf.is_empty() {
            return Ok(());
        }
        self.stream.write_all(&self.write_buf).await?;
        self.write_buf.clear();
        Ok(())
    }

    /// Bulk-reclaims per-batch scratch memory, capacity retained. Only legal
    /// once the batch is flushed and no partial value is in flight; the
    /// parser owns its partial state, so this never invalidates it.
    pub fn reclaim(&mut self) {
        if self.parser.is_idle() {
            self.read_buf.clear();
        }
    }
}
