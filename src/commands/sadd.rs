use std::collections::HashSet;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

// https://redis.io/commands/sadd
#[derive(Debug, PartialEq)]
pub struct Sadd {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl Executable for Sadd {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find_or_create::<HashSet<Bytes>>(&self.key) {
            Ok(set) => {
                let mut added = 0;
                for member in self.members {
                    if set.insert(member) {
                        added += 1;
                    }
                }
                Frame::Integer(added)
            }
            Err(_) => wrong_type(),
        }
    }
}

impl TryFrom<&mut Args> for Sadd {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() < 2 {
            return Err(CommandError::WrongArgCount("SADD"));
        }
        let key = args.next_bulk()?;
        let mut members = Vec::with_capacity(args.remaining());
        while args.remaining() > 0 {
            members.push(args.next_bulk()?);
        }
        Ok(Self { key, members })
    }
}
