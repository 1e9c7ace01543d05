//! Moves universes in and out of the engine: reading universe files,
//! picking a fallback from a directory, and serializing/sending snapshots.

mod error;
mod sender;
mod serializer;
mod source;

pub use self::error::TransportError;
pub use self::sender::{create_sender, FileSender, Sender, StdioSender};
pub use self::serializer::{
    create_serializer, JsonSerializer, Serializer, Snapshot, UniverseTextSerializer,
};
pub use self::source::{pick_default_universe, read_universe_file, DefaultUniverse};
