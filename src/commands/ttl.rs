use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

/// TTL returns the remaining time to live of a key that has a timeout:
/// -2 when the key does not exist, -1 when it exists without a deadline.
///
/// Ref: <https://redis.io/docs/latest/commands/ttl>
#[derive(Debug, PartialEq)]
pub struct Ttl {
    pub key: Bytes,
}

impl Executable for Ttl {
    fn exec(self, store: &mut Store) -> Frame {
        Frame::Integer(store.get_ttl(&self.key))
    }
}

impl TryFrom<&mut Args> for Ttl {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 1 {
            return Err(CommandError::WrongArgCount("TTL"));
        }
        Ok(Self {
            key: args.next_bulk()?,
        })
    }
}
