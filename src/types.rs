use crate::record::{Extensible, OwnedExtensible};
use std::fmt;

// ─── Type Tag ───────────────────────────────────────────────────────────────

/// Discriminator naming a record's concrete shape. One tag per record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(u32);

impl TypeTag {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag#{}", self.0)
    }
}

// ─── Iterators ──────────────────────────────────────────────────────────────

/// Walks a borrowed source chain head to tail. Never allocates.
#[derive(Clone, Copy)]
pub struct SourceIter<'a> {
    cur: Option<&'a (dyn Extensible + 'a)>,
}

impl<'a> SourceIter<'a> {
    #[inline]
    pub fn new(head: Option<&'a (dyn Extensible + 'a)>) -> Self {
        Self { cur: head }
    }
}

impl<'a> Iterator for SourceIter<'a> {
    type Item = &'a (dyn Extensible + 'a);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rec = self.cur?;
        self.cur = rec.next();
        Some(rec)
    }
}

/// Walks an owned chain head to tail.
#[derive(Clone, Copy)]
pub struct ChainIter<'a> {
    pub(crate) cur: Option<&'a dyn OwnedExtensible>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = &'a dyn OwnedExtensible;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.cur?;
        self.cur = node.next().head();
        Some(node)
    }
}
