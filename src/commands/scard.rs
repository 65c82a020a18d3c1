use std::collections::HashSet;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

// https://redis.io/commands/scard
#[derive(Debug, PartialEq)]
pub struct Scard {
    pub key: Bytes,
}

impl Executable for Scard {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find::<HashSet<Bytes>>(&self.key) {
            Ok(set) => Frame::Integer(set.len() as i64),
            Err(store::Error::WrongKind) => wrong_type(),
            Err(store::Error::NotFound) => Frame::Integer(0),
        }
    }
}

impl TryFrom<&mut Args> for Scard {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 1 {
            return Err(CommandError::WrongArgCount("SCARD"));
        }
        Ok(Self {
            key: args.next_bulk()?,
        })
    }
}
