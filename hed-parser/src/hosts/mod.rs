//! Main module for hosts file functionality

pub mod address;
pub mod folding;
pub mod formats;
pub mod grouping;
pub mod lexing;
pub mod line;
pub mod loader;
pub mod model;
pub mod synthesis;

pub use address::is_ip;
pub use folding::fold;
pub use formats::render;
pub use grouping::split_groups;
pub use lexing::classify;
pub use line::Line;
pub use loader::{parse_text, synthesize_text, synthesize_text_with, HostsDocument, LoaderError};
pub use model::{Group, Host, Item, SYSTEM_GROUP};
pub use synthesis::{hosts_chunk, synthesize, synthesize_with, SynthesisOptions};
