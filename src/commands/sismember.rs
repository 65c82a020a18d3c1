use std::collections::HashSet;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

// https://redis.io/commands/sismember
#[derive(Debug, PartialEq)]
pub struct Sismember {
    pub key: Bytes,
    pub member: Bytes,
}

impl Executable for Sismember {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find::<HashSet<Bytes>>(&self.key) {
            Ok(set) => Frame::Integer(i64::from(set.contains(&self.member))),
            Err(store::Error::WrongKind) => wrong_type(),
            Err(store::Error::NotFound) => Frame::Integer(0),
        }
    }
}

impl TryFrom<&mut Args> for Sismember {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 2 {
            return Err(CommandError::WrongArgCount("SISMEMBER"));
        }
        Ok(Self {
            key: args.next_bulk()?,
            member: args.next_bulk()?,
        })
    }
}
