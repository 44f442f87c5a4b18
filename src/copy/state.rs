use crate::record::{Extensible, OwnedExtensible};
use std::fmt;

type InitFn<'h> = dyn FnMut(&mut dyn OwnedExtensible, &dyn Extensible) -> bool + 'h;

// ─── CopyState ──────────────────────────────────────────────────────────────

/// Caller-supplied override for one copy call.
///
/// The hook receives the destination record (fixed-size fields already copied,
/// pointer members still empty) and its source. Returning `true` marks the
/// destination as fully populated and skips the default member copy for that
/// record; its `next` chain is still copied. Returning `false` is the same as
/// passing no state.
///
/// The top-level record handed to a [`Copier`](super::Copier) entry point is
/// not offered. Every record reached from it is offered once: chain nodes,
/// nested records, sub-record array elements, and their own chains.
pub struct CopyState<'h> {
    init: Box<InitFn<'h>>,
}

impl<'h> CopyState<'h> {
    pub fn new<F>(init: F) -> Self
    where
        F: FnMut(&mut dyn OwnedExtensible, &dyn Extensible) -> bool + 'h,
    {
        Self {
            init: Box::new(init),
        }
    }

    #[inline]
    pub(crate) fn offer(&mut self, dst: &mut dyn OwnedExtensible, src: &dyn Extensible) -> bool {
        (self.init)(dst, src)
    }
}

impl fmt::Debug for CopyState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyState").finish_non_exhaustive()
    }
}
