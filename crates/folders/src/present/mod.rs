//! Proxy presentation building

mod tree;

pub use tree::{ProxyItem, ProxyTree, Section, SectionKind, build_tree};
