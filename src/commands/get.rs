use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

// https://redis.io/commands/get
#[derive(Debug, PartialEq)]
pub struct Get {
    pub key: Bytes,
}

impl Executable for Get {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find::<Bytes>(&self.key) {
            Ok(value) => Frame::Bulk(value.clone()),
            Err(store::Error::WrongKind) => wrong_type(),
            Err(store::Error::NotFound) => Frame::Null,
        }
    }
}

impl TryFrom<&mut Args> for Get {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 1 {
            return Err(CommandError::WrongArgCount("GET"));
        }
        Ok(Self {
            key: args.next_bulk()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    #[test]
    fn existing_key() {
        let mut store = Store::new();
        *store.find_or_create::<Bytes>(b"key1").unwrap() = Bytes::from("value1");

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from("key1")),
        ]);
        let cmd = Command::from_frame(frame).unwrap();

        assert_eq!(cmd.exec(&mut store), Frame::Bulk(Bytes::from("value1")));
    }

    #[test]
    fn missing_key() {
        let mut store = Store::new();

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from("nope")),
        ]);
        let cmd = Command::from_frame(frame).unwrap();

        assert_eq!(cmd.exec(&mut store), Frame::Null);
    }

    #[test]
    fn wrong_kind() {
        let mut store = Store::new();
        store
            .find_or_create::<std::collections::VecDeque<Bytes>>(b"list")
            .unwrap()
            .push_back(Bytes::from("a"));

        let frame = Frame::Array(vec![
            Frame::Bulk(Bytes::from("GET")),
            Frame::Bulk(Bytes::from("list")),
        ]);
        let cmd = Command::from_frame(frame).unwrap();

        assert_eq!(cmd.exec(&mut store), wrong_type());
    }

    #[test]
    fn wrong_number_of_arguments() {
        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("GET"))]);
        let err = Command::from_frame(frame).unwrap_err();
        assert_eq!(err, CommandError::WrongArgCount("GET"));
    }
}
