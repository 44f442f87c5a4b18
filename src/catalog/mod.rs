//! Record catalog: maps a type tag to the routine that copies that record kind,
//! plus the standard record kinds shipped with the crate.

mod instance;
mod pipeline;

pub use instance::*;
pub use pipeline::*;

use crate::copy::{CopyCx, copy_erased};
use crate::error::CopyError;
use crate::record::{Extensible, OwnedExtensible, OwnedRecord};
use crate::types::TypeTag;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::fmt;
use std::sync::OnceLock;

// ─── Type Tags ──────────────────────────────────────────────────────────────
pub const TAG_APPLICATION_INFO: TypeTag = TypeTag::new(1);
pub const TAG_INSTANCE_CREATE_INFO: TypeTag = TypeTag::new(2);
pub const TAG_DEBUG_MESSENGER_CREATE_INFO: TypeTag = TypeTag::new(3);
pub const TAG_SPECIALIZATION_INFO: TypeTag = TypeTag::new(4);
pub const TAG_SHADER_STAGE_CREATE_INFO: TypeTag = TypeTag::new(5);
pub const TAG_COLOR_BLEND_STATE_CREATE_INFO: TypeTag = TypeTag::new(6);
pub const TAG_DEPTH_STENCIL_STATE_CREATE_INFO: TypeTag = TypeTag::new(7);
pub const TAG_PIPELINE_RENDERING_CREATE_INFO: TypeTag = TypeTag::new(8);
pub const TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO: TypeTag = TypeTag::new(9);
pub const TAG_GRAPHICS_PIPELINE_CREATE_INFO: TypeTag = TypeTag::new(10);
pub const TAG_PIPELINE_EXECUTABLE_INTERNAL_REPRESENTATION: TypeTag = TypeTag::new(11);

// ─── Catalog ────────────────────────────────────────────────────────────────

/// Copies one chain node of a known kind into an owned record.
pub type CopyFn =
    fn(&dyn Extensible, &mut CopyCx<'_, '_>) -> Result<Box<dyn OwnedExtensible>, CopyError>;

#[derive(Clone)]
pub struct CatalogEntry {
    pub tag: TypeTag,
    pub name: SmolStr,
    pub copy: CopyFn,
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogEntry")
            .field("tag", &self.tag)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Tag → copy routine lookup consulted for every chain node.
///
/// Every tag that can legally appear in a chain must resolve; a miss fails
/// the copy with [`CopyError::UnknownTypeTag`].
pub trait Catalog: Send + Sync {
    fn lookup(&self, tag: TypeTag) -> Option<&CatalogEntry>;
}

// ─── Registry ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct Registry {
    entries: FxHashMap<TypeTag, CatalogEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every standard record kind.
    pub fn standard() -> &'static Registry {
        static STANDARD: OnceLock<Registry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Registry::new()
                .with::<OwnedApplicationInfo>("ApplicationInfo")
                .with::<OwnedInstanceCreateInfo>("InstanceCreateInfo")
                .with::<OwnedDebugMessengerCreateInfo>("DebugMessengerCreateInfo")
                .with::<OwnedSpecializationInfo>("SpecializationInfo")
                .with::<OwnedShaderStageCreateInfo>("ShaderStageCreateInfo")
                .with::<OwnedColorBlendStateCreateInfo>("ColorBlendStateCreateInfo")
                .with::<OwnedDepthStencilStateCreateInfo>("DepthStencilStateCreateInfo")
                .with::<OwnedPipelineRenderingCreateInfo>("PipelineRenderingCreateInfo")
                .with::<OwnedGraphicsPipelineLibraryCreateInfo>(
                    "GraphicsPipelineLibraryCreateInfo",
                )
                .with::<OwnedGraphicsPipelineCreateInfo>("GraphicsPipelineCreateInfo")
                .with::<OwnedPipelineExecutableInternalRepresentation>(
                    "PipelineExecutableInternalRepresentation",
                )
        })
    }

    /// Register `R` under its tag. Returns the entry it replaced, if any.
    pub fn register<R: OwnedRecord>(&mut self, name: &str) -> Option<CatalogEntry> {
        self.entries.insert(
            R::TAG,
            CatalogEntry {
                tag: R::TAG,
                name: SmolStr::new(name),
                copy: copy_erased::<R>,
            },
        )
    }

    pub fn with<R: OwnedRecord>(mut self, name: &str) -> Self {
        self.register::<R>(name);
        self
    }

    /// Insert a hand-written entry, e.g. to route a tag to a custom routine.
    pub fn insert(&mut self, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries.insert(entry.tag, entry)
    }

    pub fn remove(&mut self, tag: TypeTag) -> Option<CatalogEntry> {
        self.entries.remove(&tag)
    }

    #[inline]
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.entries.contains_key(&tag)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display name for a tag, for diagnostics.
    pub fn name_of(&self, tag: TypeTag) -> Option<&str> {
        self.entries.get(&tag).map(|e| e.name.as_str())
    }
}

impl Catalog for Registry {
    #[inline]
    fn lookup(&self, tag: TypeTag) -> Option<&CatalogEntry> {
        self.entries.get(&tag)
    }
}
