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
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Planner and dispatch sequencer for multi-pass FFTs on GPU compute backends.
//!
//! A [`FftConfiguration`] is planned once into an immutable [`PlanSet`]: pass counts per
//! axis, radix stages, strides, kernel variants, buffer roles and workgroup sizes.
//! [`FftApplication`] binds the plan to a [`ComputeBackend`] and records the ordered,
//! barrier separated dispatch stream as many times as needed.
mod application;
mod axis;
mod backend;
mod binding;
mod config;
mod constants;
mod err;
mod kernel;
mod layout;
#[cfg(test)]
mod mock_backend;
mod pass_search;
mod plan;
mod sequencer;
mod stages;
mod util;
mod workgroup;

pub use application::FftApplication;
pub use axis::{AxisRef, AxisRole};
pub use backend::{BufferBinding, ComputeBackend, PipelineDescriptor};
pub use binding::{BufferHandle, BufferRole, BufferSet, SlotBindings};
pub use config::{COMPLEX_ELEMENT_SIZE, FftConfiguration, Radix, TransposeStrategy};
pub use constants::{PushConstants, SPECIALIZATION_WORDS, SpecializationConstants};
pub use err::{ErrorKind, GpuFftError};
pub use kernel::{ConvolutionShape, KernelKey, KernelVariant, WideClass, select_kernel};
pub use layout::{StrideLayout, TransposeBookkeeping};
pub use pass_search::MAX_AXIS_PASSES;
pub use plan::{AxisPlan, FftPlan, PlanKind, PlanSet, StageDescriptor, StageKey};
pub use sequencer::{Command, DispatchGroup, OuterLoop, Segment};
pub use stages::StageFactorization;

pub struct GpuFft {}

impl GpuFft {
    /// Plans a configuration without touching any backend.
    pub fn build_plan(configuration: &FftConfiguration) -> Result<PlanSet, GpuFftError> {
        plan::build_plan(configuration)
    }

    /// Flattens a plan into the command stream every execution replays.
    pub fn record(plans: &PlanSet) -> Result<Vec<Command>, GpuFftError> {
        sequencer::record(plans)
    }

    /// Plans a configuration and creates its backend objects.
    pub fn make_application<'a, B: ComputeBackend>(
        backend: &'a B,
        configuration: &FftConfiguration,
        buffers: &BufferSet<B::Buffer>,
    ) -> Result<FftApplication<'a, B>, GpuFftError> {
        FftApplication::new(backend, configuration, buffers)
    }
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum FftDirection {
    Forward,
    Inverse,
}
