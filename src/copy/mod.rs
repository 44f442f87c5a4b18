pub mod buffer;
mod chain;
mod record;
mod state;

pub use buffer::{copy_bytes, copy_slice, copy_str, copy_strs};
pub use record::CopyCx;
pub(crate) use record::copy_erased;
pub use state::CopyState;

use crate::catalog::{Catalog, Registry};
use crate::chain::Chain;
use crate::config::CopyConfig;
use crate::error::CopyError;
use crate::record::{Extensible, OwnedRecord};
use std::sync::OnceLock;
use tracing::debug;

// ─── Copier ─────────────────────────────────────────────────────────────────

/// Entry points of the copy engine, bound to one catalog and one set of limits.
///
/// A copy is all-or-nothing: on error every allocation made so far is dropped
/// and nothing partially built is returned.
#[derive(Clone)]
pub struct Copier<'c> {
    catalog: &'c dyn Catalog,
    config: CopyConfig,
}

impl<'c> Copier<'c> {
    pub fn new(catalog: &'c dyn Catalog) -> Self {
        Self {
            catalog,
            config: CopyConfig::default(),
        }
    }

    pub fn with_config(mut self, config: CopyConfig) -> Self {
        self.config = config;
        self
    }

    /// Copier over [`Registry::standard`] with default limits.
    pub fn standard() -> &'static Copier<'static> {
        static STANDARD: OnceLock<Copier<'static>> = OnceLock::new();
        STANDARD.get_or_init(|| Copier::new(Registry::standard()))
    }

    #[inline]
    pub fn config(&self) -> &CopyConfig {
        &self.config
    }

    /// Construct-and-copy: a new owned record with its whole chain.
    pub fn copy<R: OwnedRecord>(
        &self,
        src: &R::Source<'_>,
        state: Option<&mut CopyState<'_>>,
    ) -> Result<R, CopyError> {
        debug!(tag = %R::TAG, hooked = state.is_some(), "copying record");
        let mut cx = CopyCx::new(self.catalog, &self.config, state);
        cx.rooted::<R>(src, false)
    }

    /// Initialize-into-existing. The replacement is built first and then
    /// swapped in, releasing everything `dst` held; on error `dst` is untouched.
    pub fn initialize<R: OwnedRecord>(
        &self,
        dst: &mut R,
        src: &R::Source<'_>,
        state: Option<&mut CopyState<'_>>,
    ) -> Result<(), CopyError> {
        *dst = self.copy(src, state)?;
        Ok(())
    }

    /// Copy a bare chain, e.g. to attach under a different parent's `next`.
    pub fn copy_chain(
        &self,
        head: Option<&dyn Extensible>,
        state: Option<&mut CopyState<'_>>,
    ) -> Result<Chain, CopyError> {
        debug!(
            head = ?head.map(|h| h.type_tag()),
            hooked = state.is_some(),
            "copying chain"
        );
        CopyCx::new(self.catalog, &self.config, state).chain(head)
    }
}

impl std::fmt::Debug for Copier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Copier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
