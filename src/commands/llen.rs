use std::collections::VecDeque;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

// https://redis.io/commands/llen
#[derive(Debug, PartialEq)]
pub struct Llen {
    pub key: Bytes,
}

impl Executable for Llen {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find::<VecDeque<Bytes>>(&self.key) {
            Ok(list) => Frame::Integer(list.len() as i64),
            Err(store::Error::WrongKind) => wrong_type(),
            Err(store::Error::NotFound) => Frame::Integer(0),
        }
    }
}

impl TryFrom<&mut Args> for Llen {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 1 {
            return Err(CommandError::WrongArgCount("LLEN"));
        }
        Ok(Self {
            key: args.next_bulk()?,
        })
    }
}
