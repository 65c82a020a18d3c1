use std::time::Duration;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

/// Sets a time to live, in whole seconds, on an existing key. The deadline is
/// measured on the monotonic clock.
///
/// Ref: <https://redis.io/docs/latest/commands/expire>
#[derive(Debug, PartialEq)]
pub struct Expire {
    pub key: Bytes,
    pub seconds: u64,
}

impl Executable for Expire {
    fn exec(self, store: &mut Store) -> Frame {
        let set = store.set_expiry(&self.key, Duration::from_secs(self.seconds));
        Frame::Integer(i64::from(set))
    }
}

impl TryFrom<&mut Args> for Expire {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 2 {
            return Err(CommandError::WrongArgCount("EXPIRE"));
        }
        let key = args.next_bulk()?;
        let seconds = args.next_int()?;
        if seconds < 0 {
            return Err(CommandError::NotInteger);
        }
        Ok(Self {
            key,
            seconds: seconds as u64,
        })
    }
}
