//! I/O around the pure core: template loading, vault traversal, and writing

pub mod fs;
pub mod loader;
pub mod vault;
pub mod writer;

pub use fs::{is_markdown, read_to_string, relative_path};
pub use loader::{load_chain, FsTemplateLoader, LoadFailure, LoadedChain, TemplateLoader};
pub use vault::{markdown_files, walk, VaultEntry, Visit};
pub use writer::{generate_diff, write_atomic, DocumentWriter, WriteResult, WriterConfig};
