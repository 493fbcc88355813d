//! Core types and pure logic for frontmatter templating
//!
//! Everything in this module is synchronous and does no I/O:
//! - codec: parse and serialize the frontmatter subset
//! - block: find and replace the `---` delimited block in a text
//! - merge: two-way merge with precedence and list concatenation
//! - delete_list: cascading key exclusion across a template chain
//! - chain: folder→template resolution and the root-to-leaf fold

pub mod block;
pub mod chain;
pub mod codec;
pub mod delete_list;
pub mod document;
pub mod glob;
pub mod merge;
pub mod value;

pub use chain::{
    accumulate_chain, AccumulatedTemplate, ChainResolver, TemplateChain, TemplateChainItem,
    TemplateMapping,
};
pub use delete_list::{
    apply_delete_list, extract_delete_list, process_with_delete_list, DeleteListFold,
    ProcessedFrontmatter,
};
pub use document::{FrontmatterDocument, DELETE_KEY};
pub use glob::PatternCache;
pub use merge::{apply_to_file, merge_documents, merge_frontmatter, merge_with_file, MergeResult};
pub use value::Value;
