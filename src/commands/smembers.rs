use std::collections::HashSet;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

/// All members of a set, in no particular order.
// https://redis.io/commands/smembers
#[derive(Debug, PartialEq)]
pub struct Smembers {
    pub key: Bytes,
}

impl Executable for Smembers {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find::<HashSet<Bytes>>(&self.key) {
            Ok(set) => {
                let members = set.iter().cloned().map(Frame::Bulk).collect();
                Frame::Array(members)
            }
            Err(store::Error::WrongKind) => wrong_type(),
            Err(store::Error::NotFound) => Frame::Array(vec![]),
        }
    }
}

impl TryFrom<&mut Args> for Smembers {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 1 {
            return Err(CommandError::WrongArgCount("SMEMBERS"));
        }
        Ok(Self {
            key: args.next_bulk()?,
        })
    }
}
