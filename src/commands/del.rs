use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

// https://redis.io/commands/del
#[derive(Debug, PartialEq)]
pub struct Del {
    pub keys: Vec<Bytes>,
}

impl Executable for Del {
    fn exec(self, store: &mut Store) -> Frame {
        let mut deleted = 0;
        for key in &self.keys {
            if store.erase(key) {
                deleted += 1;
            }
        }
        Frame::Integer(deleted)
    }
}

impl TryFrom<&mut Args> for Del {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() == 0 {
            return Err(CommandError::WrongArgCount("DEL"));
        }
        let mut keys = Vec::with_capacity(args.remaining());
        while args.remaining() > 0 {
            keys.push(args.next_bulk()?);
        }
        Ok(Self { keys })
    }
}
