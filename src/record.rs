use crate::chain::Chain;
use crate::copy::{Copier, CopyCx, CopyState};
use crate::error::CopyError;
use crate::types::{SourceIter, TypeTag};
use std::any::Any;
use std::fmt::Debug;

// ─── Source side (borrowed) ─────────────────────────────────────────────────

/// A caller-owned record: a type tag, type-specific fields and an optional
/// link to the next record of the chain.
///
/// # Safety
///
/// `type_tag` must return one fixed tag for the implementing type, and no other
/// type may report that tag. [`downcast`](#method.downcast) reinterprets a
/// record based on its tag alone.
pub unsafe trait Extensible: Debug {
    fn type_tag(&self) -> TypeTag;
    fn next(&self) -> Option<&dyn Extensible>;
}

impl<'a> dyn Extensible + 'a {
    /// View this record as the source type paired with `R`, if the tag matches.
    #[inline]
    pub fn downcast<R: OwnedRecord>(&'a self) -> Option<&'a R::Source<'a>> {
        if self.type_tag() != R::TAG {
            return None;
        }
        // SAFETY: the tag is unique to `R::Source` (Extensible contract) and
        // `R::Source` is covariant in its lifetime (OwnedRecord contract), so the
        // erased value is an `R::Source<'x>` with `'x: 'a`.
        Some(unsafe { &*(self as *const (dyn Extensible + 'a) as *const R::Source<'a>) })
    }

    #[inline]
    pub fn is<R: OwnedRecord>(&self) -> bool {
        self.type_tag() == R::TAG
    }

    /// This record followed by everything linked after it.
    #[inline]
    pub fn iter(&'a self) -> SourceIter<'a> {
        SourceIter::new(Some(self))
    }
}

/// First record of type `R::Source` in chain order.
pub fn find_source<'a, R: OwnedRecord>(
    head: Option<&'a (dyn Extensible + 'a)>,
) -> Option<&'a R::Source<'a>> {
    SourceIter::new(head).find_map(|rec| rec.downcast::<R>())
}

// ─── Owned side ─────────────────────────────────────────────────────────────

/// An owned record produced by the copy engine. Its `next` slot owns the rest
/// of its chain.
pub trait OwnedExtensible: Any + Debug + Send + Sync {
    fn type_tag(&self) -> TypeTag;
    fn next(&self) -> &Chain;
    fn next_mut(&mut self) -> &mut Chain;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<'o> dyn OwnedExtensible + 'o {
    #[inline]
    pub fn downcast_ref<T: OwnedExtensible>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: OwnedExtensible>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    #[inline]
    pub fn is<T: OwnedExtensible>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// Pairs an owned record type with the borrowed source it is copied from.
///
/// `copy_fields` covers fixed-size fields (step one of a record copy);
/// `copy_members` duplicates every pointer-typed member in declaration order
/// and is skipped when a [`CopyState`] hook reports the record as handled.
/// The `next` slot is filled by the engine, never by these routines.
///
/// # Safety
///
/// `Source<'a>` must report `TAG` from [`Extensible::type_tag`] and must be
/// covariant in `'a`.
pub unsafe trait OwnedRecord: OwnedExtensible + Sized {
    const TAG: TypeTag;
    type Source<'a>: Extensible + 'a;

    fn copy_fields(src: &Self::Source<'_>) -> Self;

    fn copy_members(
        &mut self,
        src: &Self::Source<'_>,
        cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError>;

    /// Construct-and-copy through the standard catalog.
    fn from_source(
        src: &Self::Source<'_>,
        state: Option<&mut CopyState<'_>>,
    ) -> Result<Self, CopyError> {
        Copier::standard().copy(src, state)
    }

    /// Re-populate `self` from `src` through the standard catalog.
    /// On error `self` is left as it was.
    fn initialize(
        &mut self,
        src: &Self::Source<'_>,
        state: Option<&mut CopyState<'_>>,
    ) -> Result<(), CopyError> {
        Copier::standard().initialize(self, src, state)
    }
}

// ─── Impl helpers ───────────────────────────────────────────────────────────

/// Implements [`Extensible`] for a source view with a `next` field.
/// Every invocation must use a distinct tag.
macro_rules! source_record {
    ($ty:ident, $tag:expr) => {
        // SAFETY: each record kind is declared with its own tag constant.
        unsafe impl $crate::record::Extensible for $ty<'_> {
            #[inline]
            fn type_tag(&self) -> $crate::types::TypeTag {
                $tag
            }

            #[inline]
            fn next(&self) -> Option<&dyn $crate::record::Extensible> {
                self.next
            }
        }
    };
}

/// Implements [`OwnedExtensible`] for an owned record with a `next: Chain` field.
macro_rules! owned_record {
    ($ty:ty, $tag:expr) => {
        impl $crate::record::OwnedExtensible for $ty {
            #[inline]
            fn type_tag(&self) -> $crate::types::TypeTag {
                $tag
            }

            #[inline]
            fn next(&self) -> &$crate::chain::Chain {
                &self.next
            }

            #[inline]
            fn next_mut(&mut self) -> &mut $crate::chain::Chain {
                &mut self.next
            }

            #[inline]
            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }
        }
    };
}

pub(crate) use owned_record;
pub(crate) use source_record;
