use super::state::CopyState;
use crate::catalog::Catalog;
use crate::chain::Chain;
use crate::config::CopyConfig;
use crate::error::CopyError;
use crate::record::{Extensible, OwnedExtensible, OwnedRecord};
use tracing::trace;

// ─── CopyCx ─────────────────────────────────────────────────────────────────

/// Per-call copy session handed to [`OwnedRecord::copy_members`].
///
/// Carries the catalog used to resolve chain nodes, the caller's hook, and the
/// current nesting depth.
pub struct CopyCx<'c, 'h> {
    pub(super) catalog: &'c dyn Catalog,
    pub(super) config: &'c CopyConfig,
    state: Option<&'c mut CopyState<'h>>,
    depth: usize,
}

impl<'c, 'h> CopyCx<'c, 'h> {
    pub(super) fn new(
        catalog: &'c dyn Catalog,
        config: &'c CopyConfig,
        state: Option<&'c mut CopyState<'h>>,
    ) -> Self {
        Self {
            catalog,
            config,
            state,
            depth: 0,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Member copies (called from copy_members)
    // ════════════════════════════════════════════════════════════════════════

    /// Copy a nested single record together with its own chain.
    pub fn nested<R: OwnedRecord>(
        &mut self,
        src: Option<&R::Source<'_>>,
    ) -> Result<Option<Box<R>>, CopyError> {
        src.map(|s| self.rooted::<R>(s, true).map(Box::new))
            .transpose()
    }

    /// Copy an array of sub-records element by element.
    pub fn records<R: OwnedRecord>(
        &mut self,
        src: &[R::Source<'_>],
    ) -> Result<Option<Box<[R]>>, CopyError> {
        if src.is_empty() {
            return Ok(None);
        }
        let mut out = Vec::new();
        out.try_reserve_exact(src.len())
            .map_err(|_| CopyError::AllocationFailed {
                bytes: src.len() * std::mem::size_of::<R>(),
            })?;
        for s in src {
            out.push(self.rooted::<R>(s, true)?);
        }
        Ok(Some(out.into_boxed_slice()))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Internal: single record
    // ════════════════════════════════════════════════════════════════════════

    /// One record plus the chain hanging off its `next` link.
    pub(crate) fn rooted<R: OwnedRecord>(
        &mut self,
        src: &R::Source<'_>,
        offer: bool,
    ) -> Result<R, CopyError> {
        let mut dst = self.record::<R>(src, offer)?;
        *dst.next_mut() = self.chain(src.next())?;
        Ok(dst)
    }

    /// Fixed fields, then the hook, then pointer members. `next` stays empty.
    pub(crate) fn record<R: OwnedRecord>(
        &mut self,
        src: &R::Source<'_>,
        offer: bool,
    ) -> Result<R, CopyError> {
        let mut dst = R::copy_fields(src);
        if offer {
            let handled = self.offer(&mut dst, src);
            // linkage belongs to the engine, whatever the hook wrote there
            *dst.next_mut() = Chain::new();
            if handled {
                trace!(tag = %R::TAG, "record populated by hook");
                return Ok(dst);
            }
        }

        if self.depth >= self.config.max_depth {
            return Err(CopyError::NestingTooDeep {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let res = dst.copy_members(src, self);
        self.depth -= 1;
        res?;
        Ok(dst)
    }

    fn offer(&mut self, dst: &mut dyn OwnedExtensible, src: &dyn Extensible) -> bool {
        match self.state.as_deref_mut() {
            Some(state) => state.offer(dst, src),
            None => false,
        }
    }
}

/// Type-erased copy routine stored in catalog entries.
pub(crate) fn copy_erased<R: OwnedRecord>(
    src: &dyn Extensible,
    cx: &mut CopyCx<'_, '_>,
) -> Result<Box<dyn OwnedExtensible>, CopyError> {
    let typed = src.downcast::<R>().ok_or(CopyError::TagMismatch {
        expected: R::TAG,
        found: src.type_tag(),
    })?;
    Ok(Box::new(cx.record::<R>(typed, true)?))
}
