//! minic-util - Foundation types shared by every compiler phase.
//!
//! This crate hosts the pieces that more than one phase needs:
//! - `diagnostic` - the structured compile error carried through the pipeline
//! - `line_index` - 1-based access to source lines for error snippets
//! - `index_vec` - typed-index vectors used by the scope tree

pub mod diagnostic;
pub mod index_vec;
pub mod line_index;

pub use diagnostic::{CompileError, ErrorKind, Result};
pub use index_vec::{Idx, IndexVec};
pub use line_index::LineIndex;
