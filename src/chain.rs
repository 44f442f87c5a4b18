use crate::record::OwnedExtensible;
use crate::types::{ChainIter, TypeTag};
use std::fmt;

// ─── Chain ──────────────────────────────────────────────────────────────────

/// Exclusive owner of a run of linked records.
///
/// Each record owns its successor through its own `next` slot, so releasing the
/// head releases the whole run. Dropping unlinks nodes one at a time; chain
/// length never turns into stack depth.
#[derive(Default)]
pub struct Chain {
    pub(crate) head: Option<Box<dyn OwnedExtensible>>,
}

impl Chain {
    #[inline]
    pub const fn new() -> Self {
        Self { head: None }
    }

    /// Take ownership of `head` and everything already linked after it.
    #[inline]
    pub fn from_head(head: Box<dyn OwnedExtensible>) -> Self {
        Self { head: Some(head) }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Number of records in the run. Walks the chain.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[inline]
    pub fn head(&self) -> Option<&dyn OwnedExtensible> {
        self.head.as_deref()
    }

    #[inline]
    pub fn head_mut(&mut self) -> Option<&mut dyn OwnedExtensible> {
        self.head.as_deref_mut()
    }

    #[inline]
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter { cur: self.head() }
    }

    /// Tags in chain order.
    pub fn tags(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.iter().map(|node| node.type_tag())
    }

    /// First record of type `T` in chain order.
    pub fn find<T: OwnedExtensible>(&self) -> Option<&T> {
        self.iter().find_map(|node| node.downcast_ref::<T>())
    }

    pub fn find_mut<T: OwnedExtensible>(&mut self) -> Option<&mut T> {
        let mut cur = self.head.as_deref_mut();
        while let Some(node) = cur {
            if node.is::<T>() {
                return node.downcast_mut::<T>();
            }
            cur = node.next_mut().head.as_deref_mut();
        }
        None
    }

    /// First record carrying `tag` in chain order.
    pub fn find_tag(&self, tag: TypeTag) -> Option<&dyn OwnedExtensible> {
        self.iter().find(|node| node.type_tag() == tag)
    }

    /// Detach the whole run, leaving this chain empty.
    #[inline]
    pub fn take(&mut self) -> Chain {
        Chain {
            head: self.head.take(),
        }
    }

    /// Link `other` after the last record of this run.
    pub fn append(&mut self, mut other: Chain) {
        let mut slot = &mut self.head;
        loop {
            match slot {
                Some(node) => slot = &mut node.next_mut().head,
                None => {
                    *slot = other.head.take();
                    return;
                }
            }
        }
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            cur = node.next_mut().head.take();
        }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tags()).finish()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = &'a dyn OwnedExtensible;
    type IntoIter = ChainIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        OwnedDebugMessengerCreateInfo, OwnedGraphicsPipelineLibraryCreateInfo,
        TAG_DEBUG_MESSENGER_CREATE_INFO, TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO,
    };

    fn library(flags: u32) -> Box<dyn OwnedExtensible> {
        Box::new(OwnedGraphicsPipelineLibraryCreateInfo {
            flags,
            ..Default::default()
        })
    }

    fn messenger(severity: u32) -> Box<dyn OwnedExtensible> {
        Box::new(OwnedDebugMessengerCreateInfo {
            message_severity: severity,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_chain() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
        assert!(chain.head().is_none());
        assert!(chain.find::<OwnedDebugMessengerCreateInfo>().is_none());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut chain = Chain::from_head(library(1));
        chain.append(Chain::from_head(messenger(2)));
        chain.append(Chain::from_head(library(3)));

        let tags: Vec<_> = chain.tags().collect();
        assert_eq!(
            tags,
            vec![
                TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO,
                TAG_DEBUG_MESSENGER_CREATE_INFO,
                TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO,
            ]
        );
        // first match wins
        assert_eq!(
            chain.find::<OwnedGraphicsPipelineLibraryCreateInfo>().map(|l| l.flags),
            Some(1)
        );
    }

    #[test]
    fn test_find_mut_and_find_tag() {
        let mut chain = Chain::from_head(library(1));
        chain.append(Chain::from_head(messenger(0x10)));

        if let Some(m) = chain.find_mut::<OwnedDebugMessengerCreateInfo>() {
            m.message_severity = 0x1000;
        }
        let node = chain.find_tag(TAG_DEBUG_MESSENGER_CREATE_INFO).unwrap();
        assert_eq!(
            node.downcast_ref::<OwnedDebugMessengerCreateInfo>()
                .unwrap()
                .message_severity,
            0x1000
        );
    }

    #[test]
    fn test_take_detaches_run() {
        let mut chain = Chain::from_head(library(1));
        chain.append(Chain::from_head(messenger(2)));
        let taken = chain.take();
        assert!(chain.is_empty());
        assert_eq!(taken.len(), 2);
    }

    #[test]
    fn test_long_chain_drops_without_recursion() {
        let mut chain = Chain::new();
        for i in 0..200_000u32 {
            let mut node = library(i);
            *node.next_mut() = chain.take();
            chain = Chain::from_head(node);
        }
        assert_eq!(chain.len(), 200_000);
        drop(chain);
    }

    #[test]
    fn test_debug_lists_tags() {
        let chain = Chain::from_head(messenger(1));
        assert_eq!(format!("{chain:?}"), "[TypeTag(3)]");
    }
}
