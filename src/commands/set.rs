use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

// https://redis.io/commands/set
#[derive(Debug, PartialEq)]
pub struct Set {
    pub key: Bytes,
    pub value: Bytes,
}

impl Executable for Set {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find_or_create::<Bytes>(&self.key) {
            Ok(slot) => {
                *slot = self.value;
                Frame::Simple("OK".to_string())
            }
            Err(_) => wrong_type(),
        }
    }
}

impl TryFrom<&mut Args> for Set {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 2 {
            return Err(CommandError::WrongArgCount("SET"));
        }
        Ok(Self {
            key: args.next_bulk()?,
            value: args.next_bulk()?,
        })
    }
}
