//! Purpose: Group the internal JSON parse boundary modules.
//! Exports: `parse`.
//! Role: Keeps parser usage details out of the decode and fixture layers.
//! Invariants: Callsites own the mapping from parse failures to crate errors.
pub(crate) mod parse;
