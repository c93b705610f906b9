/*
 * // Copyright (c) Radzivon Bartoshyk 10/2026. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::axis::{AxisRef, AxisRole};
use crate::binding::{PassContext, SlotBindings, resolve_slots};
use crate::config::FftConfiguration;
use crate::constants::SpecializationConstants;
use crate::kernel::{ConvolutionShape, KernelKey, KernelVariant, WideClass, select_kernel};
use crate::layout::{
    FormattedBoundary, StrideLayout, TransposeBookkeeping, offsets, pass_strides,
    transpose_bookkeeping, zero_pad,
};
use crate::pass_search::{MAX_AXIS_PASSES, search};
use crate::sequencer::{Segment, boundaries, schedule};
use crate::stages::{StageFactorization, contiguous_pass_bits, factorize, strided_pass_bits};
use crate::util::{log2, to_u32};
use crate::workgroup::{axis_block, dispatch_extent, grouped_batch};
use crate::{FftDirection, GpuFftError};

/// Which of the two plans of a configuration a stage belongs to.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum PlanKind {
    /// Forward or inverse transform, the forward half of a convolution.
    Main,
    /// Inverse transform after the convolution multiply, iterated per kernel.
    InverseConvolution,
}

/// Identity of a stage: one pass of one axis of one plan.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct StageKey {
    pub plan: PlanKind,
    pub axis: AxisRef,
    pub upload: usize,
}

/// Fully resolved description of one pass.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct StageDescriptor {
    pub key: StageKey,
    pub direction: FftDirection,
    /// Pass index counted from the last pass, `passes - 1 - upload`.
    pub pass_id: usize,
    pub factorization: StageFactorization,
    pub fft_dim_full: usize,
    pub fft_dim_x: usize,
    /// Product of the lengths handled by all earlier passes of the axis.
    pub stage_start_size: usize,
    pub strides: StrideLayout,
    pub zero_pad: [bool; 2],
    pub transpose: TransposeBookkeeping,
    pub input_offset: usize,
    pub output_offset: usize,
    pub grouped_batch: usize,
    /// Local size `[x, y, z]` followed by the per-workgroup transform length.
    pub axis_block: [usize; 4],
    pub kernel: KernelVariant,
    pub slots: SlotBindings,
    pub dispatch: [u32; 3],
    pub constants: SpecializationConstants,
}

impl StageDescriptor {
    pub fn fft_dim(&self) -> usize {
        self.factorization.fft_dim
    }

    pub fn local_size(&self) -> [u32; 3] {
        self.constants.local_size
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AxisPlan {
    pub axis: AxisRef,
    pub passes: Vec<StageDescriptor>,
}

impl AxisPlan {
    /// Length covered by all passes together.
    pub fn covered_length(&self) -> usize {
        self.passes.iter().map(|p| p.fft_dim()).product()
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct FftPlan {
    pub kind: PlanKind,
    pub direction: FftDirection,
    pub axes: Vec<AxisPlan>,
}

impl FftPlan {
    pub fn axis(&self, axis: AxisRef) -> Option<&AxisPlan> {
        self.axes.iter().find(|a| a.axis == axis)
    }
}

/// Immutable result of planning a configuration.
#[derive(Debug, Clone)]
pub struct PlanSet {
    configuration: FftConfiguration,
    main: FftPlan,
    inverse_convolution: Option<FftPlan>,
    schedule: Vec<Segment>,
}

impl PlanSet {
    pub fn configuration(&self) -> &FftConfiguration {
        &self.configuration
    }

    pub fn main(&self) -> &FftPlan {
        &self.main
    }

    pub fn inverse_convolution(&self) -> Option<&FftPlan> {
        self.inverse_convolution.as_ref()
    }

    pub fn schedule(&self) -> &[Segment] {
        &self.schedule
    }

    pub fn plan(&self, kind: PlanKind) -> Option<&FftPlan> {
        match kind {
            PlanKind::Main => Some(&self.main),
            PlanKind::InverseConvolution => self.inverse_convolution.as_ref(),
        }
    }

    pub fn stage(&self, key: &StageKey) -> Option<&StageDescriptor> {
        self.plan(key.plan)?
            .axis(key.axis)?
            .passes
            .get(key.upload)
    }

    /// Stages that are dispatched, in order of first dispatch.
    pub fn scheduled_stages(&self) -> impl Iterator<Item = StageKey> + '_ {
        self.schedule.iter().flat_map(|segment| {
            segment.uploads.iter().map(|&upload| StageKey {
                plan: segment.plan,
                axis: segment.axis,
                upload,
            })
        })
    }
}

/// Pass bit budgets of one axis.
struct AxisShape {
    axis: AxisRef,
    bits: Vec<u32>,
}

fn axis_refs(config: &FftConfiguration) -> Vec<AxisRef> {
    let mut axes: Vec<AxisRef> = (0..config.dimensions).map(AxisRef::main).collect();
    if config.real_to_complex && config.dimensions > 1 {
        axes.extend((1..config.dimensions).map(AxisRef::support));
    }
    axes
}

fn shape_axis(config: &FftConfiguration, axis: AxisRef) -> Result<AxisShape, GpuFftError> {
    let length = config.size[axis.axis];
    let log_size = log2(length);
    let role = axis.role();
    let found = search(role, length, config.register_boost, config.coalesced_memory);
    if found.passes > MAX_AXIS_PASSES {
        return Err(GpuFftError::TooManyPasses(axis.axis, found.passes));
    }
    let bits = match role {
        AxisRole::Contiguous => contiguous_pass_bits(log_size, &found, config.radix),
        AxisRole::Strided => strided_pass_bits(log_size, &found, config.radix),
    };
    let covered: u32 = bits.iter().sum();
    if covered != log_size || bits.is_empty() {
        return Err(GpuFftError::InconsistentFactorization(
            axis.axis,
            1usize << covered.min(usize::BITS - 1),
        ));
    }
    Ok(AxisShape { axis, bits })
}

struct StageInput {
    key: StageKey,
    direction: FftDirection,
    bits: u32,
    passes: usize,
    stage_start_size: usize,
    entry: bool,
    exit: bool,
}

fn flag(value: bool) -> u32 {
    u32::from(value)
}

fn stride_words(what: &'static str, strides: &[usize; 5]) -> Result<[u32; 5], GpuFftError> {
    let mut words = [0u32; 5];
    for (word, &stride) in words.iter_mut().zip(strides.iter()) {
        *word = to_u32(what, stride)?;
    }
    Ok(words)
}

fn describe_stage(
    config: &FftConfiguration,
    input: StageInput,
) -> Result<StageDescriptor, GpuFftError> {
    let StageInput {
        key,
        direction,
        bits,
        passes,
        stage_start_size,
        entry,
        exit,
    } = input;
    let axis = key.axis;
    let factorization = factorize(bits, config.radix);
    let fft_dim = factorization.fft_dim;

    let convolution_pass =
        config.convolution && axis.axis == config.dimensions - 1 && key.upload == 0;
    let boundary = FormattedBoundary {
        input: entry && config.input_formatted && direction == FftDirection::Forward,
        output: exit
            && config.output_formatted
            && (direction == FftDirection::Inverse || config.convolution),
    };
    let strides = pass_strides(config, axis, boundary);
    let zero_pad = zero_pad(config, axis);
    let transpose = transpose_bookkeeping(config, axis, direction);
    let (input_offset, output_offset) = offsets(config, axis);
    let grouped_batch = grouped_batch(fft_dim, config.coalesced_memory);
    let axis_block = axis_block(config, axis, key.upload, fft_dim, stage_start_size);

    let shape = if convolution_pass {
        ConvolutionShape::from_matrix(config.matrix_convolution, config.symmetric_kernel)
    } else {
        None
    };
    let kernel = select_kernel(&KernelKey::new(
        axis,
        key.upload,
        direction,
        config.real_to_complex,
        shape,
        WideClass::classify(config.register_boost, fft_dim),
    ))?;
    let slots = resolve_slots(
        config,
        &PassContext {
            direction,
            support: axis.support,
            entry,
            exit,
            convolution_pass,
        },
    );
    let dispatch = dispatch_extent(config, axis, key.upload, &axis_block)?;

    let pass_id = passes - 1 - key.upload;
    let fft_dim_full = config.size[axis.axis];
    let fft_dim_x = if config.real_to_complex {
        config.size[0] / 2
    } else {
        config.size[0]
    };
    let constants = SpecializationConstants {
        local_size: [
            to_u32("local size x", axis_block[0])?,
            to_u32("local size y", axis_block[1])?,
            to_u32("local size z", axis_block[2])?,
        ],
        fft_dim: to_u32("fft dim", fft_dim)?,
        inverse: flag(direction == FftDirection::Inverse),
        zero_pad: [flag(zero_pad[0]), flag(zero_pad[1])],
        input_stride: stride_words("input stride", &strides.input)?,
        output_stride: stride_words("output stride", &strides.output)?,
        fft_dim_full: to_u32("full fft dim", fft_dim_full)?,
        stage_start_size: to_u32("stage start size", stage_start_size)?,
        fft_dim_x: to_u32("fft dim x", fft_dim_x)?,
        num_stages: factorization.num_stages,
        stage_radix: factorization.stage_radix,
        ratio: [
            to_u32("ratio", transpose.ratio[0])?,
            to_u32("ratio", transpose.ratio[1])?,
        ],
        ratio_direction: [
            flag(transpose.ratio_direction[0]),
            flag(transpose.ratio_direction[1]),
        ],
        input_offset: to_u32("input offset", input_offset)?,
        output_offset: to_u32("output offset", output_offset)?,
        pass_id: to_u32("pass id", pass_id)?,
    };

    Ok(StageDescriptor {
        key,
        direction,
        pass_id,
        factorization,
        fft_dim_full,
        fft_dim_x,
        stage_start_size,
        strides,
        zero_pad,
        transpose,
        input_offset,
        output_offset,
        grouped_batch,
        axis_block,
        kernel,
        slots,
        dispatch,
        constants,
    })
}

fn build_fft_plan(
    config: &FftConfiguration,
    kind: PlanKind,
    direction: FftDirection,
    shapes: &[AxisShape],
    entry: Option<StageKey>,
    exit: Option<StageKey>,
) -> Result<FftPlan, GpuFftError> {
    let mut axes = Vec::with_capacity(shapes.len());
    for shape in shapes {
        let mut passes: Vec<StageDescriptor> = Vec::with_capacity(shape.bits.len());
        for (upload, &bits) in shape.bits.iter().enumerate() {
            let stage_start_size = passes
                .last()
                .map(|previous| previous.stage_start_size * previous.fft_dim())
                .unwrap_or(1);
            let key = StageKey {
                plan: kind,
                axis: shape.axis,
                upload,
            };
            passes.push(describe_stage(
                config,
                StageInput {
                    key,
                    direction,
                    bits,
                    passes: shape.bits.len(),
                    stage_start_size,
                    entry: entry == Some(key),
                    exit: exit == Some(key),
                },
            )?);
        }
        let axis_plan = AxisPlan {
            axis: shape.axis,
            passes,
        };
        let covered = axis_plan.covered_length();
        if covered != config.size[shape.axis.axis] {
            return Err(GpuFftError::InconsistentFactorization(
                shape.axis.axis,
                covered,
            ));
        }
        axes.push(axis_plan);
    }
    Ok(FftPlan {
        kind,
        direction,
        axes,
    })
}

/// Plans every pass of a configuration. Pure, backend objects are created elsewhere.
pub fn build_plan(config: &FftConfiguration) -> Result<PlanSet, GpuFftError> {
    config.validate()?;
    let shapes = axis_refs(config)
        .into_iter()
        .map(|axis| shape_axis(config, axis))
        .collect::<Result<Vec<_>, _>>()?;
    let pass_count = |axis: AxisRef| {
        shapes
            .iter()
            .find(|s| s.axis == axis)
            .map(|s| s.bits.len())
            .unwrap_or(0)
    };
    let segments = schedule(config, pass_count);
    let (entry, exit) = boundaries(&segments);

    let main = build_fft_plan(
        config,
        PlanKind::Main,
        config.main_direction(),
        &shapes,
        entry,
        exit,
    )?;
    let inverse_convolution = if config.convolution {
        Some(build_fft_plan(
            config,
            PlanKind::InverseConvolution,
            FftDirection::Inverse,
            &shapes,
            entry,
            exit,
        )?)
    } else {
        None
    };

    Ok(PlanSet {
        configuration: config.clone(),
        main,
        inverse_convolution,
        schedule: segments,
    })
}
