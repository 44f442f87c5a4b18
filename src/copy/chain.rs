use super::record::CopyCx;
use crate::chain::Chain;
use crate::error::CopyError;
use crate::record::Extensible;
use crate::types::SourceIter;
use tracing::trace;

impl CopyCx<'_, '_> {
    /// Copy a source chain head to tail into a freshly owned run.
    ///
    /// Each node is resolved through the catalog by its tag. Traversal is a
    /// loop; only nesting inside record members recurses.
    pub fn chain(&mut self, head: Option<&dyn Extensible>) -> Result<Chain, CopyError> {
        let catalog = self.catalog;
        let limit = self.config.max_chain_len;

        let mut out = Chain::new();
        let mut slot = &mut out.head;
        for (pos, src) in SourceIter::new(head).enumerate() {
            if pos >= limit {
                return Err(CopyError::ChainTooLong { limit });
            }
            let tag = src.type_tag();
            let entry = catalog.lookup(tag).ok_or(CopyError::UnknownTypeTag(tag))?;
            trace!(%tag, name = %entry.name, pos, "copying chain node");

            let node = (entry.copy)(src, self)?;
            slot = &mut slot.insert(node).next_mut().head;
        }
        Ok(out)
    }
}
