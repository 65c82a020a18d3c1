//! Incremental RESP parser. Unlike a cursor-based decoder, this parser is
//! resumable: it absorbs whatever bytes are available, remembers where it
//! stopped, and picks up mid-frame on the next call, so it tolerates any TCP
//! chunking of the input.

use bytes::Bytes;

use crate::frame::Frame;

/// Result of feeding a slice of input to the parser.
#[derive(Debug, PartialEq)]
pub struct Progress {
    /// How many of the fed bytes were consumed. Always <= the input length.
    pub consumed: usize,
    pub status: Status,
}

#[derive(Debug, PartialEq)]
pub enum Status {
    /// A complete top-level value was produced. The parser is back in its
    /// initial state; feed the remaining input to parse the next value.
    Complete(Frame),
    /// The consumed bytes were buffered; feed the continuation when it arrives.
    Incomplete,
    /// The input is not valid RESP. The parser is poisoned until [`Parser::reset`].
    Invalid,
}

pub struct Parser {
    state: State,
}

enum State {
    /// Awaiting the type byte of the next value.
    Dispatch,
    Simple(LineBuf),
    Error(LineBuf),
    Integer(LineBuf),
    Bulk(BulkState),
    Array(ArrayState),
    /// A previous feed reported invalid input; every feed reports `Invalid`
    /// until the parser is reset.
    Poisoned,
}

enum BulkState {
    Length(LineBuf),
    Data { expected: usize, buf: Vec<u8> },
    Trailer { data: Vec<u8>, seen_cr: bool },
}

enum ArrayState {
    Length(LineBuf),
    Elements {
        expected: usize,
        elements: Vec<Frame>,
        // One nested parser per array, reused for each element in turn.
        element_parser: Box<Parser>,
    },
}

impl Parser {
    pub fn new() -> Parser {
        Parser {
            state: State::Dispatch,
        }
    }

    /// Discards any partial progress and returns to the dispatch state.
    /// Required after a feed reported `Invalid`.
    pub fn reset(&mut self) {
        self.state = State::Dispatch;
    }

    /// True when no partial value is buffered.
    pub fn is_idle(&self) -> bool {
        matches!(self.state, State::Dispatch)
    }

    pub fn feed(&mut self, input: &[u8]) -> Progress {
        match self.state {
            State::Dispatch => {
                let Some(&type_byte) = input.first() else {
                    return incomplete(0);
                };
                self.state = match type_byte {
                    b'+' => State::Simple(LineBuf::new()),
                    b'-' => State::Error(LineBuf::new()),
                    b':' => State::Integer(LineBuf::new()),
                    b'$' => State::Bulk(BulkState::Length(LineBuf::new())),
                    b'*' => State::Array(ArrayState::Length(LineBuf::new())),
                    _ => {
                        self.state = State::Poisoned;
                        return invalid(0);
                    }
                };
                let mut progress = self.feed_value(&input[1..]);
                progress.consumed += 1;
                self.settle(progress)
            }
            State::Poisoned => invalid(0),
            _ => {
                let progress = self.feed_value(input);
                self.settle(progress)
            }
        }
    }

    /// Records the terminal outcomes: a completed value returns the parser to
    /// the dispatch state, invalid input poisons it.
    fn settle(&mut self, progress: Progress) -> Progress {
        match progress.status {
            Status::Complete(_) => self.state = State::Dispatch,
            Status::Invalid => self.state = State::Poisoned,
            Status::Incomplete => {}
        }
        progress
    }

    fn feed_value(&mut self, input: &[u8]) -> Progress {
        match &mut self.state {
            State::Simple(line) => feed_line(line, input, |payload| {
                String::from_utf8(payload).ok().map(Frame::Simple)
            }),
            State::Error(line) => feed_line(line, input, |payload| {
                String::from_utf8(payload).ok().map(Frame::Error)
            }),
            State::Integer(line) => feed_line(line, input, |payload| {
                parse_decimal(&payload).map(Frame::Integer)
            }),
            State::Bulk(bulk) => feed_bulk(bulk, input),
            State::Array(array) => feed_array(array, input),
            // Both are handled in `feed` before delegating here.
            State::Dispatch => incomplete(0),
            State::Poisoned => invalid(0),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn feed_line(
    line: &mut LineBuf,
    input: &[u8],
    build: impl FnOnce(Vec<u8>) -> Option<Frame>,
) -> Progress {
    let (consumed, payload) = line.feed(input);
    match payload {
        Some(payload) => match build(payload) {
            Some(frame) => complete(consumed, frame),
            None => invalid(consumed),
        },
        None => incomplete(consumed),
    }
}

fn feed_bulk(state: &mut BulkState, input: &[u8]) -> Progress {
    let mut consumed = 0;
    loop {
        match state {
            BulkState::Length(line) => {
                let (used, payload) = line.feed(&input[consumed..]);
                consumed += used;
                let Some(payload) = payload else {
                    return incomplete(consumed);
                };
                let Some(length) = parse_decimal(&payload) else {
                    return invalid(consumed);
                };
                if length == -1 {
                    return complete(consumed, Frame::Null);
                }
                if length < 0 {
                    return invalid(consumed);
                }
                let expected = length as usize;
                *state = BulkState::Data {
                    expected,
                    buf: Vec::with_capacity(expected),
                };
            }
            BulkState::Data { expected, buf } => {
                let wanted = *expected - buf.len();
                let take = wanted.min(input.len() - consumed);
                buf.extend_from_slice(&input[consumed..consumed + take]);
                consumed += take;
                if buf.len() < *expected {
                    return incomplete(consumed);
                }
                *state = BulkState::Trailer {
                    data: std::mem::take(buf),
                    seen_cr: false,
                };
            }
            BulkState::Trailer { data, seen_cr } => {
                while consumed < input.len() {
                    let byte = input[consumed];
                    if !*seen_cr {
                        if byte != b'\r' {
                            return invalid(consumed);
                        }
                        *seen_cr = true;
                        consumed += 1;
                    } else {
                        if byte != b'\n' {
                            return invalid(consumed);
                        }
                        consumed += 1;
                        let payload = Bytes::from(std::mem::take(data));
                        return complete(consumed, Frame::Bulk(payload));
                    }
                }
                return incomplete(consumed);
            }
        }
    }
}

fn feed_array(state: &mut ArrayState, input: &[u8]) -> Progress {
    let mut consumed = 0;
    loop {
        match state {
            ArrayState::Length(line) => {
                let (used, payload) = line.feed(&input[consumed..]);
                consumed += used;
                let Some(payload) = payload else {
                    return incomplete(consumed);
                };
                let Some(length) = parse_decimal(&payload) else {
                    return invalid(consumed);
                };
                if length == -1 {
                    return complete(consumed, Frame::Null);
                }
                if length < 0 {
                    return invalid(consumed);
                }
                if length == 0 {
                    return complete(consumed, Frame::Array(vec![]));
                }
                *state = ArrayState::Elements {
                    expected: length as usize,
                    elements: Vec::with_capacity(length as usize),
                    element_parser: Box::new(Parser::new()),
                };
            }
            ArrayState::Elements {
                expected,
                elements,
                element_parser,
            } => {
                while elements.len() < *expected {
                    if consumed == input.len() {
                        return incomplete(consumed);
                    }
                    let progress = element_parser.feed(&input[consumed..]);
                    consumed += progress.consumed;
                    match progress.status {
                        // The element parser returns to its dispatch state on
                        // completion, ready for the next element.
                        Status::Complete(frame) => elements.push(frame),
                        Status::Incomplete => return incomplete(consumed),
                        Status::Invalid => return invalid(consumed),
                    }
                }
                let frame = Frame::Array(std::mem::take(elements));
                return complete(consumed, frame);
            }
        }
    }
}

/// Accumulates bytes up to and including a CRLF terminator, surviving a CR/LF
/// pair split across feeds.
struct LineBuf {
    buf: Vec<u8>,
}

impl LineBuf {
    fn new() -> LineBuf {
        LineBuf { buf: Vec::new() }
    }

    fn feed(&mut self, input: &[u8]) -> (usize, Option<Vec<u8>>) {
        if self.buf.last() == Some(&b'\r') && !input.is_empty() {
            if input[0] == b'\n' {
                self.buf.pop();
                return (1, Some(std::mem::take(&mut self.buf)));
            }
            // The buffered CR was payload; keep scanning.
        }
        match find_crlf(input) {
            Some(pos) => {
                self.buf.extend_from_slice(&input[..pos]);
                (pos + 2, Some(std::mem::take(&mut self.buf)))
            }
            None => {
                self.buf.extend_from_slice(input);
                (input.len(), None)
            }
        }
    }
}

fn find_crlf(input: &[u8]) -> Option<usize> {
    input.windows(2).position(|window| window == b"\r\n")
}

fn parse_decimal(payload: &[u8]) -> Option<i64> {
    std::str::from_utf8(payload).ok()?.parse().ok()
}

fn complete(consumed: usize, frame: Frame) -> Progress {
    Progress {
        consumed,
        status: Status::Complete(frame),
    }
}

fn incomplete(consumed: usize) -> Progress {
    Progress {
        consumed,
        status: Status::Incomplete,
    }
}

fn invalid(consumed: usize) -> Progress {
    Progress {
        consumed,
        status: Status::Invalid,
    }
}
