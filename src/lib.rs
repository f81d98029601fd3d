pub mod ast;
pub mod config;
pub mod error;
pub mod load;
pub mod options;
pub mod parser;
pub mod resolver;
pub mod source;
pub mod unpack;

pub use ast::{Number, Object, Value};
pub use config::{from_value, TsonConfig};
pub use error::{ErrorKind, TsonError};
pub use load::{from_file, from_file_in, from_file_with, from_text, from_text_in, from_text_with};
pub use options::{Options, MAX_REFERENCE_DEPTH};
pub use resolver::{ReferenceCache, Resolver};
pub use source::{FsLoader, TextLoader};
pub use unpack::unpack;
