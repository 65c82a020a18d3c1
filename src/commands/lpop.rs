use std::collections::VecDeque;

use bytes::Bytes;

use crate::commands::executable::Executable;
use crate::commands::{wrong_type, Args, CommandError};
use crate::frame::Frame;
use crate::store::{self, Store};

/// Without a count, pops one element (nil when the list is empty or the key
/// absent). With a non-negative count, pops up to that many elements as an
/// array; an absent key still replies nil.
///
/// Ref: <https://redis.io/docs/latest/commands/lpop>
#[derive(Debug, PartialEq)]
pub struct Lpop {
    pub key: Bytes,
    pub count: Option<usize>,
}

impl Executable for Lpop {
    fn exec(self, store: &mut Store) -> Frame {
        let list = match store.find::<VecDeque<Bytes>>(&self.key) {
            Ok(list) => list,
            Err(store::Error::WrongKind) => return wrong_type(),
            Err(store::Error::NotFound) => return Frame::Null,
        };

        match self.count {
            None => match list.pop_front() {
                Some(value) => Frame::Bulk(value),
                None => Frame::Null,
            },
            Some(count) => {
                let mut popped = Vec::new();
                for _ in 0..count {
                    match list.pop_front() {
                        Some(value) => popped.push(Frame::Bulk(value)),
                        None => break,
                    }
                }
                Frame::Array(popped)
            }
        }
    }
}

impl TryFrom<&mut Args> for Lpop {
    type Error = CommandError;

    fn try_from(args: &mut Args) -> Result<Self, Self::Error> {
        let has_count = match args.remaining() {
            1 => false,
            2 => true,
            _ => return Err(CommandError::WrongArgCount("LPOP")),
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

    fn lpop_frame(parts: &[&str]) -> Frame {
        let mut frames = vec![Frame::Bulk(Bytes::from("LPOP"))];
        frames.extend(parts.iter().map(|p| Frame::Bulk(Bytes::from(p.to_string()))));
        Frame::Array(frames)
    }

    #[test]
    fn pops_from_the_head() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a", "b"]);

        let cmd = Command::from_frame(lpop_frame(&["list"])).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Bulk(Bytes::from("a")));
    }

    #[test]
    fn empty_list_yields_nil() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &[]);

        let cmd = Command::from_frame(lpop_frame(&["list"])).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Null);
    }

    #[test]
    fn absent_key_yields_nil_in_both_forms() {
        let mut store = Store::new();

        let cmd = Command::from_frame(lpop_frame(&["missing"])).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Null);

        let cmd = Command::from_frame(lpop_frame(&["missing", "2"])).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Null);
    }

    #[test]
    fn count_form_pops_up_to_count() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a", "b", "c"]);

        let cmd = Command::from_frame(lpop_frame(&["list", "2"])).unwrap();
        assert_eq!(
            cmd.exec(&mut store),
            Frame::Array(vec![
                Frame::Bulk(Bytes::from("a")),
                Frame::Bulk(Bytes::from("b")),
            ])
        );

        // Asking for more than remains drains the list.
        let cmd = Command::from_frame(lpop_frame(&["list", "5"])).unwrap();
        assert_eq!(
            cmd.exec(&mut store),
            Frame::Array(vec![Frame::Bulk(Bytes::from("c"))])
        );
    }

    #[test]
    fn zero_count_yields_empty_array() {
        let mut store = Store::new();
        seed_list(&mut store, b"list", &["a"]);

        let cmd = Command::from_frame(lpop_frame(&["list", "0"])).unwrap();
        assert_eq!(cmd.exec(&mut store), Frame::Array(vec![]));
    }

    #[test]
    fn parse_both_forms() {
        let cmd = Command::from_frame(lpop_frame(&["list"])).unwrap();
        assert_eq!(
            cmd,
            Command::Lpop(Lpop {
                key: Bytes::from("list"),
                count: None,
            })
        );

        let cmd = Command::from_frame(lpop_frame(&["list", "3"])).unwrap();
        assert_eq!(
            cmd,
            Command::Lpop(Lpop {
                key: Bytes::from("list"),
                count: Some(3),
            })
        );
    }

    #[test]
    fn negative_count_is_rejected() {
        let err = Command::from_frame(lpop_frame(&["list", "-1"])).unwrap_err();
        assert_eq!(err, CommandError::NotInteger);

        let err = Command::from_frame(lpop_frame(&["list", "many"])).unwrap_err();
        assert_eq!(err, CommandError::NotInteger);
    }

    #[test]
    fn wrong_kind() {
        let mut store = Store::new();
        *store.find_or_create::<Bytes>(b"text").unwrap() = Bytes::from("v");

        let cmd = Command::from_frame(lpop_frame(&["text"])).unwrap();
        assert_eq!(cmd.exec(&mut store), wrong_type());
    }
}
