use std::collections::HashSet;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

// https://redis.io/commands/srem
#[derive(Debug, PartialEq)]
pub struct Srem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Srem {
    fn exec(self, store: &mut Store) -> Frame {
        let set = match store.find::<HashSet<Bytes>>(&self.key) {
            Ok(set) => set,
            Err(store::Error::WrongKind) => return wrong_type(),
            Err(store::Error::NotFound) => return Frame::Integer(0),
        };

        let mut removed = 0;
        for member in &self.members {
            if set.remove(member) {
                removed += 1;
            }
        }
        Frame::Integer(removed)
    }
}

impl TryFrom<&mut Args> for Srem {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() < 2 {
            return Err(CommandError::WrongArgCount("SREM"));
        }
        let key = args.next_bulk()?;
        let mut members = Vec::with_capacity(args.remaining());
        while args.remaining() > 0 {
            members.push(args.next_bulk()?);
        }
        Ok(Self { key, members })
    }
}
