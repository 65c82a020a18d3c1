use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

// https://redis.io/commands/ping
#[derive(Debug, PartialEq)]
pub struct Ping {
    pub message: Option<Bytes>,
}

impl Executable for Ping {
    fn exec(self, _store: &mut Store) -> Frame {
        match self.message {
            Some(message) => Frame::Bulk(message),
            None => Frame::Simple("PONG".to_string()),
        }
    }
}

impl TryFrom<&mut Args> for Ping {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        match args.remaining() {
            0 => Ok(Self { message: None }),
            1 => Ok(Self {
                message: Some(args.next_bulk()?),
            }),
            _ => Err(CommandError::WrongArgCount("PING")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn without_message() {
        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("PING"))]);
        let cmd = Command::from_frame(frame).unwrap();
        assert_eq!(cmd, Command::Ping(Ping { message: None }));

        let mut store = Store::new();
        assert_eq!(cmd.exec(&mut store), Frame::Simple("PONG".to_string()));
    }

    #[test]
    fn with_message() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("PING")),
            Frame::Bulk(Bytes::from("hello")),
        ]);
        let cmd = Command::from_frame(frame).unwrap();

        let mut store = Store::new();
        assert_eq!(cmd.exec(&mut store), Frame::Bulk(Bytes::from("hello")));
    }

    #[test]
    fn too_many_arguments() {
        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("PING")),
            Frame::Bulk(Bytes::from("a")),
            Frame::Bulk(Bytes::from("b")),
        ]);
        let err = Command::from_frame(frame).unwrap_err();
        assert_eq!(err, CommandError::WrongArgCount("PING"));
    }
}
