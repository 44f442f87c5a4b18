use super::{TAG_APPLICATION_INFO, TAG_DEBUG_MESSENGER_CREATE_INFO, TAG_INSTANCE_CREATE_INFO};
use crate::chain::Chain;
use crate::copy::{CopyCx, copy_str, copy_strs};
use crate::error::CopyError;
use crate::record::{Extensible, OwnedRecord, owned_record, source_record};
use crate::types::TypeTag;

// ─── Message severity / type bits ───────────────────────────────────────────
pub const SEVERITY_VERBOSE: u32 = 0x0001;
pub const SEVERITY_INFO: u32 = 0x0010;
pub const SEVERITY_WARNING: u32 = 0x0100;
pub const SEVERITY_ERROR: u32 = 0x1000;

pub const MESSAGE_GENERAL: u32 = 0x1;
pub const MESSAGE_VALIDATION: u32 = 0x2;
pub const MESSAGE_PERFORMANCE: u32 = 0x4;

// ════════════════════════════════════════════════════════════════════════════
// ApplicationInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct ApplicationInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub application_name: Option<&'a str>,
    pub application_version: u32,
    pub engine_name: Option<&'a str>,
    pub engine_version: u32,
    pub api_version: u32,
}

#[derive(Debug, Default)]
pub struct OwnedApplicationInfo {
    pub next: Chain,
    pub application_name: Option<Box<str>>,
    pub application_version: u32,
    pub engine_name: Option<Box<str>>,
    pub engine_version: u32,
    pub api_version: u32,
}

impl OwnedApplicationInfo {
    #[inline]
    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    #[inline]
    pub fn engine_name(&self) -> Option<&str> {
        self.engine_name.as_deref()
    }
}

source_record!(ApplicationInfo, TAG_APPLICATION_INFO);
owned_record!(OwnedApplicationInfo, TAG_APPLICATION_INFO);

// SAFETY: ApplicationInfo reports TAG_APPLICATION_INFO and only holds shared
// references, so it is covariant.
unsafe impl OwnedRecord for OwnedApplicationInfo {
    const TAG: TypeTag = TAG_APPLICATION_INFO;
    type Source<'a> = ApplicationInfo<'a>;

    fn copy_fields(src: &ApplicationInfo<'_>) -> Self {
        Self {
            application_version: src.application_version,
            engine_version: src.engine_version,
            api_version: src.api_version,
            ..Self::default()
        }
    }

    fn copy_members(
        &mut self,
        src: &ApplicationInfo<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.application_name = copy_str(src.application_name)?;
        self.engine_name = copy_str(src.engine_name)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InstanceCreateInfo
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, Default)]
pub struct InstanceCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub flags: u32,
    pub application_info: Option<&'a ApplicationInfo<'a>>,
    pub enabled_layer_names: &'a [&'a str],
    pub enabled_extension_names: &'a [&'a str],
}

#[derive(Debug, Default)]
pub struct OwnedInstanceCreateInfo {
    pub next: Chain,
    pub flags: u32,
    pub application_info: Option<Box<OwnedApplicationInfo>>,
    pub enabled_layer_names: Option<Box<[Box<str>]>>,
    pub enabled_extension_names: Option<Box<[Box<str>]>>,
}

impl OwnedInstanceCreateInfo {
    pub fn enabled_layer_count(&self) -> usize {
        self.enabled_layer_names.as_deref().map_or(0, <[_]>::len)
    }

    pub fn enabled_extension_count(&self) -> usize {
        self.enabled_extension_names.as_deref().map_or(0, <[_]>::len)
    }
}

source_record!(InstanceCreateInfo, TAG_INSTANCE_CREATE_INFO);
owned_record!(OwnedInstanceCreateInfo, TAG_INSTANCE_CREATE_INFO);

// SAFETY: tag matches the source view; all borrowed members are shared refs.
unsafe impl OwnedRecord for OwnedInstanceCreateInfo {
    const TAG: TypeTag = TAG_INSTANCE_CREATE_INFO;
    type Source<'a> = InstanceCreateInfo<'a>;

    fn copy_fields(src: &InstanceCreateInfo<'_>) -> Self {
        Self {
            flags: src.flags,
            ..Self::default()
        }
    }

    fn copy_members(
        &mut self,
        src: &InstanceCreateInfo<'_>,
        cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        self.application_info = cx.nested::<OwnedApplicationInfo>(src.application_info)?;
        self.enabled_layer_names = copy_strs(src.enabled_layer_names)?;
        self.enabled_extension_names = copy_strs(src.enabled_extension_names)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DebugMessengerCreateInfo
// ════════════════════════════════════════════════════════════════════════════

/// Scalars only; usually found in an instance chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugMessengerCreateInfo<'a> {
    pub next: Option<&'a dyn Extensible>,
    pub flags: u32,
    pub message_severity: u32,
    pub message_type: u32,
}

#[derive(Debug, Default)]
pub struct OwnedDebugMessengerCreateInfo {
    pub next: Chain,
    pub flags: u32,
    pub message_severity: u32,
    pub message_type: u32,
}

source_record!(DebugMessengerCreateInfo, TAG_DEBUG_MESSENGER_CREATE_INFO);
owned_record!(OwnedDebugMessengerCreateInfo, TAG_DEBUG_MESSENGER_CREATE_INFO);

// SAFETY: tag matches the source view; covariant.
unsafe impl OwnedRecord for OwnedDebugMessengerCreateInfo {
    const TAG: TypeTag = TAG_DEBUG_MESSENGER_CREATE_INFO;
    type Source<'a> = DebugMessengerCreateInfo<'a>;

    fn copy_fields(src: &DebugMessengerCreateInfo<'_>) -> Self {
        Self {
            next: Chain::new(),
            flags: src.flags,
            message_severity: src.message_severity,
            message_type: src.message_type,
        }
    }

    fn copy_members(
        &mut self,
        _src: &DebugMessengerCreateInfo<'_>,
        _cx: &mut CopyCx<'_, '_>,
    ) -> Result<(), CopyError> {
        Ok(())
    }
}
