use std::collections::VecDeque;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

// https://redis.io/commands/rpop
#[derive(Debug, PartialEq)]
pub struct Rpop {
    pub key: Bytes,
    pub count: Option<usize>,
}

impl Executable for Rpop {
    fn exec(self, store: &mut Store) -> Frame {
        let list = match store.find::<VecDeque<Bytes>>(&self.key) {
            Ok(list) => list,
            Err(store::Error::WrongKind) => return wrong_type(),
            Err(store::Error::NotFound) => return Frame::Null,
        };

        match self.count {
            None => match list.pop_back() {
                Some(value) => Frame::Bulk(value),
                None => Frame::Null,
            },
            Some(count) => {
                let mut popped = Vec::new();
                for _ in 0..count {
                    match list.pop_back() {
                        Some(value) => popped.push(Frame::Bulk(value)),
                        None => break,
                    }
                }
                Frame::Array(popped)
            }
        }
    }
}

impl TryFrom<&mut Args> for Rpop {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        let has_count = match args.remaining() {
            1 => false,
            2 => true,
            _ => return Err(CommandError::WrongArgCount("RPOP")),
        };
        let key = args.next_bulk()?;
        let count = if has_count {
            let count = args.next_int()?;
            if count < 0 {
                return Err(CommandError::NotInteger);
            }
            Some(count as usize)
        } else {
            None
        };
        Ok(Self { key, count })
    }
}
