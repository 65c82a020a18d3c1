use std::collections::VecDeque;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

/// Inclusive range over a list. Negative indices count from the end; the
/// start is clamped to the head, the stop to the tail.
///
/// Ref: <https://redis.io/docs/latest/commands/lrange>
#[derive(Debug, PartialEq)]
pub struct Lrange {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
}

impl Executable for Lrange {
    fn exec(self, store: &mut Store) -> Frame {
        let list = match store.find::<VecDeque<Bytes>>(&self.key) {
            Ok(list) => list,
            Err(store::Error::WrongKind) => return wrong_type(),
            Err(store::Error::NotFound) => return Frame::Array(vec![]),
        };

        let len = list.len() as i64;
        let start = if self.start < 0 {
            (len + self.start).max(0)
        } else {
            self.start
        };
        let stop = if self.stop < 0 {
            len + self.stop
        } else {
            self.stop
        };
        let stop = stop.min(len - 1);

        let mut elements = Vec::new();
        let mut index = start;
        while index <= stop {
            if let Some(value) = list.get(index as usize) {
                elements.push(Frame::Bulk(value.clone()));
            }
            index += 1;
        }
        Frame::Array(elements)
    }
}

impl TryFrom<&mut Args> for Lrange {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        if args.remaining() != 3 {
            return Err(CommandError::WrongArgCount("LRANGE"));
        }
        Ok(Self {
            key: args.next_bulk()?,
            start: args.next_int()?,
            stop: args.next_int()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    fn seed_list(store: &mut Store, key: &[u8], values: &[&str]) {
        let list = store.find_or_create::<VecDeque<Bytes>>(key).unwrap();
        for value in values {
            list.push_back(Bytes::from(value.to_string()));
        }
    }

    fn lrange_frame(key: &str, start: &str, stop: &str) -> Frame {
        Frame::Array(vec![
            Frame::Bulk(Bytes::from("LRANGE")),
            Frame::Bulk(Bytes::from(key.to_string())),
            Frame::Bulk(Bytes::from(start.to_string())),
            Frame::Bulk(Bytes::from(stop.to_string())),
        ])
    }

    fn bulks(values: &[&str]) -> Frame {
        Frame::Array(
            values
                .iter()
                .map(|v| Frame::Bulk(Bytes::from(v.to_string())))
                .collect(),
        )
    }

    #[test]
    fn full_range() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a", "b", "c", "d"]);

        let cmd = Command::from_frame(lrange_frame("list", "0", "-1")).unwrap();
        assert_eq!(cmd.exec(&mut store), bulks(&["a", "b", "c", "d"]));
    }

    #[test]
    fn negative_indices_count_from_the_end() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a", "b", "c", "d"]);

        let cmd = Command::from_frame(lrange_frame("list", "-2", "-1")).unwrap();
        assert_eq!(cmd.exec(&mut store), bulks(&["c", "d"]));
    }

    #[test]
    fn start_is_clamped_to_the_head() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a", "b", "c"]);

        let cmd = Command::from_frame(lrange_frame("list", "-100", "1")).unwrap();
        assert_eq!(cmd.exec(&mut store), bulks(&["a", "b"]));
    }

    #[test]
    fn stop_is_clamped_to_the_tail() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a", "b", "c"]);

        let cmd = Command::from_frame(lrange_frame("list", "1", "100")).unwrap();
        assert_eq!(cmd.exec(&mut store), bulks(&["b", "c"]));
    }

    #[test]
    fn inverted_range_is_empty() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a", "b", "c"]);

        let cmd = Command::from_frame(lrange_frame("list", "2", "1")).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Array(vec![]));
    }

    #[test]
    fn absent_key_is_an_empty_array() {
        let mut store = Store::new();
        let cmd = Command::from_frame(lrange_frame("missing", "0", "-1")).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Array(vec![]));
    }

    #[test]
    fn parse() {
        let cmd = Command::from_frame(lrange_frame("list", "-2", "-1")).unwrap();
        assert_eq!(
            cmd,
            Command::Lrange(Lrange {
                key: Bytes::from("list"),
                start: -2,
                stop: -1,
            })
        );
    }

    #[test]
    fn non_integer_index_is_rejected() {
        let err = Command::from_frame(lrange_frame("list", "zero", "1")).unwrap_err();
        assert_eq!(err, CommandError::NotInteger);
    }

    #[test]
    fn wrong_kind() {
        let mut store = Store::new();
        *store.find_or_create::<Bytes>(b"text").unwrap() = Bytes::from("v");

        let cmd = Command::from_frame(lrange_frame("text", "0", "-1")).unwrap();
        assert_eq!(cmd.exec(&mut store), wrong_type());
    }
}
