pub mod del;
pub mod executable;
pub mod expire;
pub mod flushdb;
pub mod get;
pub mod keys;
pub mod llen;
pub mod lpop;
pub mod lpush;
pub mod lrange;
pub mod ping;
pub mod rpop;
pub mod rpush;
pub mod sadd;
pub mod scard;
pub mod set;
pub mod sinter;
pub mod sismember;
pub mod smembers;
pub mod srem;
pub mod ttl;

use std::{str, vec};

use bytes::Bytes;
use thiserror::Error as ThisError;

use crate::commands::executable::Executable;
use crate::frame::Frame;
use crate::store::Store;

use del::Del;
use expire::Expire;
use flushdb::Flushdb;
use get::Get;
use keys::Keys;
use llen::Llen;
use lpop::Lpop;
use lpush::Lpush;
use lrange::Lrange;
use ping::Ping;
use rpop::Rpop;
use rpush::Rpush;
use sadd::Sadd;
use scard::Scard;
use set::Set;
use sinter::Sinter;
use sismember::Sismember;
use smembers::Smembers;
use srem::Srem;
use ttl::Ttl;

#[derive(Debug, PartialEq)]
pub enum Command {
    Get(Get),
    Set(Set),
    Del(Del),
    Ping(Ping),
    Keys(Keys),
    Flushdb(Flushdb),
    Lpush(Lpush),
    Rpush(Rpush),
    Lpop(Lpop),
    Rpop(Rpop),
    Llen(Llen),
    Lrange(Lrange),
    Sadd(Sadd),
    Srem(Srem),
    Scard(Scard),
    Smembers(Smembers),
    Sinter(Sinter),
    Sismember(Sismember),
    Expire(Expire),
    Ttl(Ttl),
}

impl Command {
    /// Parses a decoded frame into a command. Clients send commands as RESP
    /// arrays of bulk strings; the first element names the command. Every
    /// error here maps to a RESP error reply, never to a closed connection.
    pub fn from_frame(frame: Frame) -> Result<Command, CommandError> {
        let Frame::Array(frames) = frame else {
            return Err(CommandError::InvalidFormat);
        };

        let mut parts = frames.into_iter();
        let name = match parts.next() {
            None => return Err(CommandError::InvalidFormat),
            Some(Frame::Bulk(name)) => name,
            Some(_) => return Err(CommandError::InvalidName),
        };

        let Ok(dispatch_name) = str::from_utf8(&name).map(|s| s.to_ascii_uppercase()) else {
            return Err(CommandError::unknown(&name));
        };

        let mut args = Args { parts };

        // Hot commands first.
        match dispatch_name.as_str() {
            "GET" => Get::try_from(&mut args).map(Command::Get),
            "SET" => Set::try_from(&mut args).map(Command::Set),
            "DEL" => Del::try_from(&mut args).map(Command::Del),
            "PING" => Ping::try_from(&mut args).map(Command::Ping),
            "KEYS" => Keys::try_from(&mut args).map(Command::Keys),
            "FLUSHDB" => Flushdb::try_from(&mut args).map(Command::Flushdb),
            "LPUSH" => Lpush::try_from(&mut args).map(Command::Lpush),
            "RPUSH" => Rpush::try_from(&mut args).map(Command::Rpush),
            "LPOP" => Lpop::try_from(&mut args).map(Command::Lpop),
            "RPOP" => Rpop::try_from(&mut args).map(Command::Rpop),
            "LLEN" => Llen::try_from(&mut args).map(Command::Llen),
            "LRANGE" => Lrange::try_from(&mut args).map(Command::Lrange),
            "SADD" => Sadd::try_from(&mut args).map(Command::Sadd),
            "SREM" => Srem::try_from(&mut args).map(Command::Srem),
            "SCARD" => Scard::try_from(&mut args).map(Command::Scard),
            "SMEMBERS" => Smembers::try_from(&mut args).map(Command::Smembers),
            "SINTER" => Sinter::try_from(&mut args).map(Command::Sinter),
            "SISMEMBER" => Sismember::try_from(&mut args).map(Command::Sismember),
            "EXPIRE" => Expire::try_from(&mut args).map(Command::Expire),
            "TTL" => Ttl::try_from(&mut args).map(Command::Ttl),
            _ => Err(CommandError::unknown(&name)),
        }
    }
}

impl Executable for Command {
    fn exec(self, store: &mut Store) -> Frame {
        match self {
            Command::Get(cmd) => cmd.exec(store),
            Command::Set(cmd) => cmd.exec(store),
            Command::Del(cmd) => cmd.exec(store),
            Command::Ping(cmd) => cmd.exec(store),
            Command::Keys(cmd) => cmd.exec(store),
            Command::Flushdb(cmd) => cmd.exec(store),
            Command::Lpush(cmd) => cmd.exec(store),
            Command::Rpush(cmd) => cmd.exec(store),
            Command::Lpop(cmd) => cmd.exec(store),
            Command::Rpop(cmd) => cmd.exec(store),
            Command::Llen(cmd) => cmd.exec(store),
            Command::Lrange(cmd) => cmd.exec(store),
            Command::Sadd(cmd) => cmd.exec(store),
            Command::Srem(cmd) => cmd.exec(store),
            Command::Scard(cmd) => cmd.exec(store),
            Command::Smembers(cmd) => cmd.exec(store),
            Command::Sinter(cmd) => cmd.exec(store),
            Command::Sismember(cmd) => cmd.exec(store),
            Command::Expire(cmd) => cmd.exec(store),
            Command::Ttl(cmd) => cmd.exec(store),
        }
    }
}

/// Command arguments, already stripped of the command name. Every argument
/// must arrive as a bulk string.
pub struct Args {
    parts: vec::IntoIter<Frame>,
}

impl Args {
    pub fn remaining(&self) -> usize {
        self.parts.len()
    }

    pub fn next_bulk(&mut self) -> Result<Bytes, CommandError> {
        match self.parts.next() {
            Some(Frame::Bulk(bytes)) => Ok(bytes),
            _ => Err(CommandError::NotBulkString),
        }
    }

    pub fn next_int(&mut self) -> Result<i64, CommandError> {
        let bytes = self.next_bulk()?;
        str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(CommandError::NotInteger)
    }
}

/// Command-layer failures. The display strings are the exact RESP error
/// messages sent back to the client.
#[derive(Debug, ThisError, PartialEq)]
pub enum CommandError {
    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArgCount(&'static str),
    #[error("ERR value is not a bulk string")]
    NotBulkString,
    #[error("ERR value is not an integer")]
    NotInteger,
    #[error("ERR unknown command '{0}'")]
    UnknownCommand(String),
    #[error("ERR invalid command format")]
    InvalidFormat,
    #[error("ERR command name must be a bulk string")]
    InvalidName,
}

impl CommandError {
    fn unknown(name: &[u8]) -> CommandError {
        CommandError::UnknownCommand(String::from_utf8_lossy(name).into_owned())
    }
}

impl From<CommandError> for Frame {
    fn from(err: CommandError) -> Frame {
        Frame::Error(err.to_string())
    }
}

pub(crate) fn wrong_type() -> Frame {
    Frame::Error("WRONGTYPE Operation against a key holding the wrong kind of value".to_string())
}
