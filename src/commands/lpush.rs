use std::collections::VecDeque;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

/// Each value is inserted at the head in argument order, so a multi-value
/// LPUSH ends up reversed relative to the argument list.
///
/// Ref: <https://redis.io/docs/latest/commands/lpush>
#[derive(Debug, PartialEq)]
pub struct Lpush {
    pub key: Bytes,
    pub values: Vec<Bytes>,
}

impl Executable for Lpush {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find_or_create::<VecDeque<Bytes>>(&self.key) {
            Ok(list) => {
                for value in self.values {
                    list.push_front(value);
                }
                Frame::Integer(list.len() as i64)
            }
            Err(_) => wrong_type(),
        }
    }
}

impl TryFrom<&mut Args> for Lpush {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() < 2 {
            return Err(CommandError::WrongArgCount("LPUSH"));
        }
        let key = args.next_bulk()?;
        let mut values = Vec::with_capacity(args.remaining());
        while args.remaining() > 0 {
            values.push(args.next_bulk()?);
        }
        Ok(Self { key, values })
    }
}
