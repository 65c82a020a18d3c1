use std::collections::HashSet;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

/// Members of the first set present in every other set. Any absent operand
/// makes the intersection empty; any non-set operand is a type error.
///
/// Ref: <https://redis.io/docs/latest/commands/sinter>
#[derive(Debug, PartialEq)]
pub struct Sinter {
    pub keys: Vec<Bytes>,
}

impl Executable for Sinter {
    fn exec(self, store: &mut Store) -> Frame {
        let mut members: Vec<Bytes> = match store.find::<HashSet<Bytes>>(&self.keys[0]) {
            Ok(set) => set.iter().cloned().collect(),
            Err(store::Error::WrongKind) => return wrong_type(),
            Err(store::Error::NotFound) => return Frame::Array(vec![]),
        };

        for key in &self.keys[1..] {
            match store.find::<HashSet<Bytes>>(key) {
                Ok(set) => members.retain(|member| set.contains(member)),
                Err(store::Error::WrongKind) => return wrong_type(),
                Err(store::Error::NotFound) => return Frame::Array(vec![]),
            }
        }

        Frame::Array(members.into_iter().map(Frame::Bulk).collect())
    }
}

impl TryFrom<&mut Args> for Sinter {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() == 0 {
            return Err(CommandError::WrongArgCount("SINTER"));
        }
        let mut keys = Vec::with_capacity(args.remaining());
        while args.remaining() > 0 {
            keys.push(args.next_bulk()?);
        }
        Ok(Self { keys })
    }
}
