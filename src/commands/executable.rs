use crate::frame::Frame;
use crate::store::Store;

/// A fully parsed command, ready to run against the keyspace. Execution is
/// infallible: every failure mode is expressed as a RESP error reply.
pub trait Executable {
    fn exec(self, store: &mut Store) -> Frame;
}
