use crate::commands::executable::Executable;
use crate::commands::{Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

/// Returns every live key in the keyspace. O(n) over the keyspace, the only
/// command here that is.
// https://redis.io/commands/keys
#[derive(Debug, PartialEq)]
pub struct Keys;

impl Executable for Keys {
    fn exec(self, store: &mut Store) -> Frame {
        let keys = store.keys().into_iter().map(Frame::Bulk).collect();
        Frame::Array(keys)
    }
}

impl TryFrom<&mut Args> for Keys {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 0 {
            return Err(CommandError::WrongArgCount("KEYS"));
        }
        Ok(Self)
    }
}
