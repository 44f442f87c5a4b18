use super::{
    TAG_COLOR_BLEND_STATE_CREATE_INFO, TAG_DEPTH_STENCIL_STATE_CREATE_INFO,
    TAG_GRAPHICS_PIPELINE_CREATE_INFO, TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO,
    TAG_PIPELINE_EXECUTABLE_INTERNAL_REPRESENTATION, TAG_PIPELINE_RENDERING_CREATE_INFO,
    TAG_SHADER_STAGE_CREATE_INFO, TAG_SPECIALIZATION_INFO,
};
use crate::chain::Chain;
use crate::copy::{CopyCx, CopyState, Copier, copy_bytes, copy_slice, copy_str};
use crate::error::CopyError;
use crate::record::{Extensible, OwnedRecord, owned_record, source_record};
use crate::types::TypeTag;
use arrayvec::ArrayString;

pub const MAX_DESCRIPTION_SIZE: usize = 256;

// ─── Format ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Format(pub u32);

impl Format {
    pub const UNDEFINED: Format = Format(0);
    pub const R8G8B8A8_UNORM: Format = Format(37);
    pub const B8G8R8A8_UNORM: Format = Format(44);
    pub const D32_SFLOAT: Format = Format(126);
    pub const S8_UINT: Format = Format(127);
}

// ─── Shader stage / library bits ────────────────────────────────────────────
pub const STAGE_VERTEX: u32 = 0x01;
pub const STAGE_FRAGMENT: u32 = 0x10;

pub const LIBRARY_VERTEX_INPUT_INTERFACE: u32 = 0x1;
pub const LIBRARY_PRE_RASTERIZATION_SHADERS: u32 = 0x2;
pub const LIBRARY_FRAGMENT_SHADER: u32 = 0x4;
pub const LIBRARY_FRAGMENT_OUTPUT_INTERFACE: u32 = 0x8;

// ════════════════════════════════════════════════════════════════════════════
// SpecializationInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecializationMapEntry {
    pub constant_id: u32,
    pub offset: u32,
    pub size: usize,
}

/// Constant values patched into a shader; `data` is an opaque byte payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecializationInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub map_entries: &'a [SpecializationMapEntry],
    pub data: &'a [u8],
}

#[derive(Debug, Default)]
pub struct OwnedSpecializationInfo {
    pub next: Chain,
    pub map_entries: Option<Box<[SpecializationMapEntry]>>,
    pub data: Option<Box<[u8]>>,
}

impl OwnedSpecializationInfo {
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    #[inline]
    pub fn data_size(&self) -> usize {
        self.data().len()
    }

    #[inline]
    pub fn map_entries(&self) -> &[SpecializationMapEntry] {
        self.map_entries.as_deref().unwrap_or_default()
    }
}

source_record!(SpecializationInfo, TAG_SPECIALIZATION_INFO);
owned_record!(OwnedSpecializationInfo, TAG_SPECIALIZATION_INFO);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedSpecializationInfo {
    const TAG: TypeTag = TAG_SPECIALIZATION_INFO;
    type Source<'a> = SpecializationInfo<'a>;

    fn copy_fields(_src: &SpecializationInfo<'_>) -> Self {
        Self::default()
    }

    fn copy_members(
        &mut self,
        src: &SpecializationInfo<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.map_entries = copy_slice(src.map_entries)?;
        self.data = copy_bytes(src.data)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ShaderStageCreateInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderStageCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub flags: u32,
    pub stage: u32,
    pub module: u64,
    pub name: Option<&'a str>,
    pub specialization_info: Option<&'a SpecializationInfo<'a>>,
}

#[derive(Debug, Default)]
pub struct OwnedShaderStageCreateInfo {
    pub next: Chain,
    pub flags: u32,
    pub stage: u32,
    pub module: u64,
    pub name: Option<Box<str>>,
    pub specialization_info: Option<Box<OwnedSpecializationInfo>>,
}

source_record!(ShaderStageCreateInfo, TAG_SHADER_STAGE_CREATE_INFO);
owned_record!(OwnedShaderStageCreateInfo, TAG_SHADER_STAGE_CREATE_INFO);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedShaderStageCreateInfo {
    const TAG: TypeTag = TAG_SHADER_STAGE_CREATE_INFO;
    type Source<'a> = ShaderStageCreateInfo<'a>;

    fn copy_fields(src: &ShaderStageCreateInfo<'_>) -> Self {
        Self {
            flags: src.flags,
            stage: src.stage,
            module: src.module,
            ..Self::default()
        }
    }

    fn copy_members(
        &mut self,
        src: &ShaderStageCreateInfo<'_>,
        cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.name = copy_str(src.name)?;
        self.specialization_info =
            cx.nested::<OwnedSpecializationInfo>(src.specialization_info)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ColorBlendStateCreateInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorBlendAttachmentState {
    pub blend_enable: bool,
    pub color_write_mask: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorBlendStateCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub logic_op_enable: bool,
    pub logic_op: u32,
    pub attachments: &'a [ColorBlendAttachmentState],
    pub blend_constants: [f32; 4],
}

#[derive(Debug, Default)]
pub struct OwnedColorBlendStateCreateInfo {
    pub next: Chain,
    pub logic_op_enable: bool,
    pub logic_op: u32,
    pub attachments: Option<Box<[ColorBlendAttachmentState]>>,
    pub blend_constants: [f32; 4],
}

source_record!(ColorBlendStateCreateInfo, TAG_COLOR_BLEND_STATE_CREATE_INFO);
owned_record!(OwnedColorBlendStateCreateInfo, TAG_COLOR_BLEND_STATE_CREATE_INFO);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedColorBlendStateCreateInfo {
    const TAG: TypeTag = TAG_COLOR_BLEND_STATE_CREATE_INFO;
    type Source<'a> = ColorBlendStateCreateInfo<'a>;

    fn copy_fields(src: &ColorBlendStateCreateInfo<'_>) -> Self {
        Self {
            logic_op_enable: src.logic_op_enable,
            logic_op: src.logic_op,
            blend_constants: src.blend_constants,
            ..Self::default()
        }
    }

    fn copy_members(
        &mut self,
        src: &ColorBlendStateCreateInfo<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.attachments = copy_slice(src.attachments)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DepthStencilStateCreateInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct DepthStencilStateCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: u32,
    pub min_depth_bounds: f32,
    pub max_depth_bounds: f32,
}

#[derive(Debug, Default)]
pub struct OwnedDepthStencilStateCreateInfo {
    pub next: Chain,
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare_op: u32,
    pub min_depth_bounds: f32,
    pub max_depth_bounds: f32,
}

source_record!(DepthStencilStateCreateInfo, TAG_DEPTH_STENCIL_STATE_CREATE_INFO);
owned_record!(OwnedDepthStencilStateCreateInfo, TAG_DEPTH_STENCIL_STATE_CREATE_INFO);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedDepthStencilStateCreateInfo {
    const TAG: TypeTag = TAG_DEPTH_STENCIL_STATE_CREATE_INFO;
    type Source<'a> = DepthStencilStateCreateInfo<'a>;

    fn copy_fields(src: &DepthStencilStateCreateInfo<'_>) -> Self {
        Self {
            next: Chain::new(),
            depth_test_enable: src.depth_test_enable,
            depth_write_enable: src.depth_write_enable,
            depth_compare_op: src.depth_compare_op,
            min_depth_bounds: src.min_depth_bounds,
            max_depth_bounds: src.max_depth_bounds,
        }
    }

    fn copy_members(
        &mut self,
        _src: &DepthStencilStateCreateInfo<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PipelineRenderingCreateInfo
// ════════════════════════════════════════════════════════════════════════════

/// Attachment formats for dynamic rendering. Extends a graphics pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineRenderingCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub view_mask: u32,
    pub color_attachment_formats: &'a [Format],
    pub depth_attachment_format: Format,
    pub stencil_attachment_format: Format,
}

#[derive(Debug, Default)]
pub struct OwnedPipelineRenderingCreateInfo {
    pub next: Chain,
    pub view_mask: u32,
    pub color_attachment_count: usize,
    pub color_attachment_formats: Option<Box<[Format]>>,
    pub depth_attachment_format: Format,
    pub stencil_attachment_format: Format,
}

source_record!(PipelineRenderingCreateInfo, TAG_PIPELINE_RENDERING_CREATE_INFO);
owned_record!(OwnedPipelineRenderingCreateInfo, TAG_PIPELINE_RENDERING_CREATE_INFO);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedPipelineRenderingCreateInfo {
    const TAG: TypeTag = TAG_PIPELINE_RENDERING_CREATE_INFO;
    type Source<'a> = PipelineRenderingCreateInfo<'a>;

    fn copy_fields(src: &PipelineRenderingCreateInfo<'_>) -> Self {
        Self {
            view_mask: src.view_mask,
            color_attachment_count: src.color_attachment_formats.len(),
            depth_attachment_format: src.depth_attachment_format,
            stencil_attachment_format: src.stencil_attachment_format,
            ..Self::default()
        }
    }

    fn copy_members(
        &mut self,
        src: &PipelineRenderingCreateInfo<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.color_attachment_formats = copy_slice(src.color_attachment_formats)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GraphicsPipelineLibraryCreateInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicsPipelineLibraryCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub flags: u32,
}

#[derive(Debug, Default)]
pub struct OwnedGraphicsPipelineLibraryCreateInfo {
    pub next: Chain,
    pub flags: u32,
}

source_record!(
    GraphicsPipelineLibraryCreateInfo,
    TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO
);
owned_record!(
    OwnedGraphicsPipelineLibraryCreateInfo,
    TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO
);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedGraphicsPipelineLibraryCreateInfo {
    const TAG: TypeTag = TAG_GRAPHICS_PIPELINE_LIBRARY_CREATE_INFO;
    type Source<'a> = GraphicsPipelineLibraryCreateInfo<'a>;

    fn copy_fields(src: &GraphicsPipelineLibraryCreateInfo<'_>) -> Self {
        Self {
            next: Chain::new(),
            flags: src.flags,
        }
    }

    fn copy_members(
        &mut self,
        _src: &GraphicsPipelineLibraryCreateInfo<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GraphicsPipelineCreateInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphicsPipelineCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub flags: u32,
    pub stages: &'a [ShaderStageCreateInfo<'a>],
    pub color_blend_state: Option<&'a ColorBlendStateCreateInfo<'a>>,
    pub depth_stencil_state: Option<&'a DepthStencilStateCreateInfo<'a>>,
    pub layout: u64,
    pub subpass: u32,
}

#[derive(Debug, Default)]
pub struct OwnedGraphicsPipelineCreateInfo {
    pub next: Chain,
    pub flags: u32,
    pub stages: Option<Box<[OwnedShaderStageCreateInfo]>>,
    pub color_blend_state: Option<Box<OwnedColorBlendStateCreateInfo>>,
    pub depth_stencil_state: Option<Box<OwnedDepthStencilStateCreateInfo>>,
    pub layout: u64,
    pub subpass: u32,
}

/// Which attachment state the pipeline's subpass actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachmentUsage {
    pub color: bool,
    pub depth_stencil: bool,
}

impl Default for AttachmentUsage {
    fn default() -> Self {
        Self {
            color: true,
            depth_stencil: true,
        }
    }
}

impl OwnedGraphicsPipelineCreateInfo {
    /// Copy through the standard catalog, leaving out color-blend and
    /// depth-stencil state the subpass has no attachment for.
    pub fn from_source_with_usage(
        src: &GraphicsPipelineCreateInfo<'_>,
        usage: AttachmentUsage,
        state: Option<&mut CopyState<'_>>,
    ) -> Result<Self, CopyError> {
        Copier::standard().copy::<Self>(&src.restricted_to(usage), state)
    }

    pub fn stage_count(&self) -> usize {
        self.stages.as_deref().map_or(0, <[_]>::len)
    }
}

impl<'a> GraphicsPipelineCreateInfo<'a> {
    /// Same record with unused attachment state dropped.
    pub fn restricted_to(&self, usage: AttachmentUsage) -> Self {
        Self {
            color_blend_state: self.color_blend_state.filter(|_| usage.color),
            depth_stencil_state: self.depth_stencil_state.filter(|_| usage.depth_stencil),
            ..*self
        }
    }
}

source_record!(GraphicsPipelineCreateInfo, TAG_GRAPHICS_PIPELINE_CREATE_INFO);
owned_record!(OwnedGraphicsPipelineCreateInfo, TAG_GRAPHICS_PIPELINE_CREATE_INFO);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedGraphicsPipelineCreateInfo {
    const TAG: TypeTag = TAG_GRAPHICS_PIPELINE_CREATE_INFO;
    type Source<'a> = GraphicsPipelineCreateInfo<'a>;

    fn copy_fields(src: &GraphicsPipelineCreateInfo<'_>) -> Self {
        Self {
            flags: src.flags,
            layout: src.layout,
            subpass: src.subpass,
            ..Self::default()
        }
    }

    fn copy_members(
        &mut self,
        src: &GraphicsPipelineCreateInfo<'_>,
        cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.stages = cx.records::<OwnedShaderStageCreateInfo>(src.stages)?;
        self.color_blend_state =
            cx.nested::<OwnedColorBlendStateCreateInfo>(src.color_blend_state)?;
        self.depth_stencil_state =
            cx.nested::<OwnedDepthStencilStateCreateInfo>(src.depth_stencil_state)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// PipelineExecutableInternalRepresentation
// ════════════════════════════════════════════════════════════════════════════

/// Driver-internal representation of a compiled pipeline executable.
/// `name` and `description` are fixed-capacity inline strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineExecutableInternalRepresentation<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub name: ArrayString<MAX_DESCRIPTION_SIZE>,
    pub description: ArrayString<MAX_DESCRIPTION_SIZE>,
    pub is_text: bool,
    pub data: &'a [u8],
}

#[derive(Debug, Default)]
pub struct OwnedPipelineExecutableInternalRepresentation {
    pub next: Chain,
    pub name: ArrayString<MAX_DESCRIPTION_SIZE>,
    pub description: ArrayString<MAX_DESCRIPTION_SIZE>,
    pub is_text: bool,
    pub data: Option<Box<[u8]>>,
}

impl OwnedPipelineExecutableInternalRepresentation {
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_deref().unwrap_or_default()
    }

    #[inline]
    pub fn data_size(&self) -> usize {
        self.data().len()
    }
}

source_record!(
    PipelineExecutableInternalRepresentation,
    TAG_PIPELINE_EXECUTABLE_INTERNAL_REPRESENTATION
);
owned_record!(
    OwnedPipelineExecutableInternalRepresentation,
    TAG_PIPELINE_EXECUTABLE_INTERNAL_REPRESENTATION
);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedPipelineExecutableInternalRepresentation {
    const TAG: TypeTag = TAG_PIPELINE_EXECUTABLE_INTERNAL_REPRESENTATION;
    type Source<'a> = PipelineExecutableInternalRepresentation<'a>;

    fn copy_fields(src: &PipelineExecutableInternalRepresentation<'_>) -> Self {
        Self {
            next: Chain::new(),
            name: src.name,
            description: src.description,
            is_text: src.is_text,
            data: None,
        }
    }

    fn copy_members(
        &mut self,
        src: &PipelineExecutableInternalRepresentation<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.data = copy_bytes(src.data)?;
        Ok(())
    }
}
