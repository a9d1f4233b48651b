pub mod catalog;
pub mod error;
pub mod gambits;
pub mod logging;
pub mod template;
pub mod writer;
