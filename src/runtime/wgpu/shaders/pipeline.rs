//! WGSL compute pipeline infrastructure
//!
//! [`KernelCache`] compiles each registered kernel at most once per context
//! and hands out the cached pipeline on every later demand. Programs are
//! shared: all kernels of one program reuse a single shader module.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use wgpu::naga::{
    self,
    front::wgsl::Frontend,
    valid::{Capabilities, ValidationFlags, Validator},
};
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, Buffer, BufferBindingType, ComputePipeline,
    ComputePipelineDescriptor, Device, PipelineLayoutDescriptor, ShaderModule,
    ShaderModuleDescriptor, ShaderSource, ShaderStages,
};

use super::kernel::{BindingKind, KernelId};
use crate::error::{Error, Result};

/// Workgroup size for 1-D compute shaders
pub const WORKGROUP_SIZE: u32 = 256;

/// Workgroup edge for the 2-D matmul shader
pub const MATMUL_TILE: u32 = 16;

// ============================================================================
// Kernel Cache
// ============================================================================

/// Bind group layout and pipeline for one kernel entry point
pub struct ProgramCacheEntry {
    layout: BindGroupLayout,
    pipeline: ComputePipeline,
}

impl ProgramCacheEntry {
    /// Bind group layout built from the kernel's declared bindings
    pub fn layout(&self) -> &BindGroupLayout {
        &self.layout
    }

    /// Compute pipeline for the kernel's entry point
    pub fn pipeline(&self) -> &ComputePipeline {
        &self.pipeline
    }
}

/// Compilation counters of a [`KernelCache`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernelCacheStats {
    /// Shader modules created (one per program)
    pub programs_compiled: usize,
    /// Pipelines created (one per kernel)
    pub kernels_compiled: usize,
    /// Demands served from the cache
    pub hits: usize,
}

struct CompiledProgram {
    module: Arc<ShaderModule>,
    entry_points: Vec<String>,
}

/// Lazily populated map from [`KernelId`] to compiled pipeline
#[derive(Default)]
pub struct KernelCache {
    /// Compiled programs by name
    programs: Mutex<HashMap<&'static str, CompiledProgram>>,
    /// Ready kernels by id
    entries: Mutex<HashMap<KernelId, Arc<ProgramCacheEntry>>>,
    stats: Mutex<KernelCacheStats>,
}

impl KernelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the pipeline for `id`, compiling its program on first demand.
    ///
    /// # Errors
    ///
    /// - `ProgramBuildFailed` if the program source does not compile
    /// - `KernelCreationFailed` if the entry point is missing
    ///
    /// Failures are not cached; the next demand compiles again.
    pub fn get_or_compile(&self, device: &Device, id: KernelId) -> Result<Arc<ProgramCacheEntry>> {
        // Held across compilation so concurrent demands compile once.
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(&id) {
            self.stats.lock().hits += 1;
            return Ok(entry.clone());
        }

        let module = self.get_or_compile_program(device, id)?;
        let layout = create_layout(device, id);

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some(&format!("{}_layout", id.name())),
            bind_group_layouts: &[&layout],
            immediate_size: 0,
        });

        let pipeline = device.create_compute_pipeline(&ComputePipelineDescriptor {
            label: Some(&format!("{}_{}", id.program().name, id.entry_point())),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some(id.entry_point()),
            compilation_options: Default::default(),
            cache: None,
        });

        tracing::debug!(target: "densr", kernel = id.name(), "compiled kernel");

        let entry = Arc::new(ProgramCacheEntry {
            layout,
            pipeline,
        });
        entries.insert(id, entry.clone());
        self.stats.lock().kernels_compiled += 1;
        Ok(entry)
    }

    fn get_or_compile_program(&self, device: &Device, id: KernelId) -> Result<Arc<ShaderModule>> {
        let program = id.program();
        let mut programs = self.programs.lock();

        if !programs.contains_key(program.name) {
            let entry_points = validate_wgsl(id.name(), program.source)?;
            let module = device.create_shader_module(ShaderModuleDescriptor {
                label: Some(program.name),
                source: ShaderSource::Wgsl(program.source.into()),
            });
            tracing::debug!(target: "densr", program = program.name, "compiled program");
            programs.insert(
                program.name,
                CompiledProgram {
                    module: Arc::new(module),
                    entry_points,
                },
            );
            self.stats.lock().programs_compiled += 1;
        }

        let compiled = programs
            .get(program.name)
            .ok_or_else(|| Error::backend(format!("program '{}' vanished", program.name)))?;

        if !compiled.entry_points.iter().any(|ep| ep == id.entry_point()) {
            return Err(Error::KernelCreationFailed {
                kernel: id.name(),
                reason: format!(
                    "entry point '{}' not found in program '{}'",
                    id.entry_point(),
                    program.name
                ),
            });
        }

        Ok(compiled.module.clone())
    }

    /// Compile every registered kernel
    pub fn compile_all(&self, device: &Device) -> Result<()> {
        for id in KernelId::ALL {
            self.get_or_compile(device, id)?;
        }
        Ok(())
    }

    /// Whether `id` has a compiled entry
    pub fn contains(&self, id: KernelId) -> bool {
        self.entries.lock().contains_key(&id)
    }

    /// Snapshot of the compilation counters
    pub fn stats(&self) -> KernelCacheStats {
        *self.stats.lock()
    }

    /// Drop every compiled kernel and program
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.programs.lock().clear();
    }
}

/// Validate WGSL source and list its entry points.
///
/// Runs the naga front end and validator so a broken program reports its
/// full compiler diagnostic instead of a device-lost error at dispatch.
pub(crate) fn validate_wgsl(kernel: &'static str, source: &str) -> Result<Vec<String>> {
    let module = Frontend::new()
        .parse(source)
        .map_err(|e| Error::ProgramBuildFailed {
            kernel,
            diagnostic: e.emit_to_string(source),
        })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| Error::ProgramBuildFailed {
            kernel,
            diagnostic: e.emit_to_string(source),
        })?;

    Ok(entry_point_names(&module))
}

fn entry_point_names(module: &naga::Module) -> Vec<String> {
    module
        .entry_points
        .iter()
        .map(|ep| ep.name.clone())
        .collect()
}

fn create_layout(device: &Device, id: KernelId) -> BindGroupLayout {
    let entries: Vec<BindGroupLayoutEntry> = id
        .bindings()
        .iter()
        .enumerate()
        .map(|(i, kind)| BindGroupLayoutEntry {
            binding: i as u32,
            visibility: ShaderStages::COMPUTE,
            ty: BindingType::Buffer {
                ty: match kind {
                    BindingKind::StorageRead => BufferBindingType::Storage { read_only: true },
                    BindingKind::StorageReadWrite => {
                        BufferBindingType::Storage { read_only: false }
                    }
                    BindingKind::Uniform => BufferBindingType::Uniform,
                },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        })
        .collect();

    device.create_bind_group_layout(&BindGroupLayoutDescriptor {
        label: Some(&format!("{}_bind_group_layout", id.name())),
        entries: &entries,
    })
}

/// Create a bind group binding `buffers` in declaration order
pub fn create_bind_group(
    device: &Device,
    entry: &ProgramCacheEntry,
    buffers: &[&Buffer],
) -> BindGroup {
    let entries: Vec<BindGroupEntry> = buffers
        .iter()
        .enumerate()
        .map(|(i, buffer)| BindGroupEntry {
            binding: i as u32,
            resource: buffer.as_entire_binding(),
        })
        .collect();

    device.create_bind_group(&BindGroupDescriptor {
        label: Some("compute_bind_group"),
        layout: entry.layout(),
        entries: &entries,
    })
}

// ============================================================================
// Dispatch Helpers
// ============================================================================

/// Workgroup grid covering `n` elements with 1-D workgroups.
///
/// Counts above `max_per_dim` fold into a second grid dimension; kernels
/// linearize the index as `x + y * groups.x * WORKGROUP_SIZE`.
pub fn elementwise_grid(n: usize, max_per_dim: u32) -> Result<(u32, u32, u32)> {
    let groups = n.div_ceil(WORKGROUP_SIZE as usize);
    let max = max_per_dim.max(1) as usize;
    if groups <= max {
        return Ok((groups as u32, 1, 1));
    }
    let y = groups.div_ceil(max);
    if y > max {
        return Err(Error::backend(format!(
            "{n} elements exceed the dispatch limit of {max}x{max} workgroups"
        )));
    }
    Ok((max as u32, y as u32, 1))
}
