//! Tile meta file codec.
//!
//! Converts between the compact binary tile meta format loaded by the
//! emulator runtime and an editable JSON form:
//!
//! - `codec`: binary layout, header validation, `decode`/`encode` and the
//!   text conversions built on them
//! - `record`: the `MetaRecord` schema and validation of text input
//! - `table`: tile-hash keyed store with the runtime's upsert semantics
//! - `error`: `MetaError`
//!
//! The binaries (`src/main.rs` and `src/bin/inspect.rs`) do the I/O; every
//! function here is a pure transform over in-memory buffers.
pub mod codec;
pub mod error;
pub mod record;
pub mod table;

pub use codec::{bin_to_text, decode, encode, encode_value, text_to_bin};
pub use error::MetaError;
pub use record::{Color, MetaRecord};
pub use table::{MetaTable, MetaUpdate};
