use crate::commands::executable::Executable;
use crate::commands::{Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

// https://redis.io/commands/flushdb
#[derive(Debug, PartialEq)]
pub struct Flushdb;

impl Executable for Flushdb {
    fn exec(self, store: &mut Store) -> Frame {
        store.clear();
        Frame::Simple("OK".to_string())
    }
}

impl TryFrom<&mut Args> for Flushdb {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 0 {
            return Err(CommandError::WrongArgCount("FLUSHDB"));
        }
        Ok(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use bytes::Bytes;

    #[test]
    fn clears_the_keyspace() {
        let mut store = Store::new();
        *store.find_or_create::<Bytes>(b"a").unwrap() = Bytes::from("1");

        let frame = Frame::Array(vec![Frame::Bulk(Bytes::from("FLUSHDB"))]);
        let cmd = Command::from_frame(frame).unwrap();

        assert_eq!(cmd.exec(&mut store), Frame::Simple("OK".to_string()));
        assert!(store.is_empty());
    }
}
