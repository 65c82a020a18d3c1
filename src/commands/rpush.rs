use std::collections::VecDeque;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::Store;

// https://redis.io/commands/rpush
#[derive(Debug, PartialEq)]
pub struct Rpush {
    pub key: Bytes,
    pub values: Vec<Bytes>,
}

impl Executable for Rpush {
    fn exec(self, store: &mut Store) -> Frame {
        match store.find_or_create::<VecDeque<Bytes>>(&self.key) {
            Ok(list) => {
                for value in self.values {
                    list.push_back(value);
                }
                Frame::Integer(list.len() as i64)
            }
            Err(_) => wrong_type(),
        }
    }
}

impl TryFrom<&mut Args> for Rpush {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() < 2 {
            return Err(CommandError::WrongArgCount("RPUSH"));
        }
        let key = args.next_bulk()?;
        let mut values = Vec::with_capacity(args.remaining());
        while args.remaining() > 0 {
            values.push(args.next_bulk()?);
        }
        Ok(Self { key, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    fn rpush_frame(key: &str, values: &[&str]) -> Frame {
        let mut parts = vec![
            Frame::Bulk(Bytes::from("RPUSH")),
            Frame::Bulk(Bytes::from(key.to_string())),
        ];
        parts.extend(
            values
                .iter()
                .map(|v| Frame::Bulk(Bytes::from(v.to_string()))),
        );
        Frame::Array(parts)
    }

    #[test]
    fn preserves_argument_order() {
        let mut store = Store::new();

        let cmd = Command::from_frame(rpush_frame("list", &["a", "b", "c"])).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Integer(3));

        let list = store.find::<VecDeque<Bytes>>(b"list").unwrap();
        assert_eq!(
            list.iter().cloned().collect::<Vec<_>>(),
            vec![Bytes::from("a"), Bytes::from("b"), Bytes::from("c")]
        );
    }

    #[test]
    fn refuses_non_list_keys() {
        let mut store = Store::new();
        *store.find_or_create::<Bytes>(b"text").unwrap() = Bytes::from("v");

        let cmd = Command::from_frame(rpush_frame("text", &["a"])).unwrap();
        assert_eq!(cmd.exec(&mut store), wrong_type());
    }
}
