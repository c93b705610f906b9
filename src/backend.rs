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
use crate::binding::BufferRole;
use crate::constants::{PushConstants, SpecializationConstants};
use crate::kernel::KernelVariant;
use std::fmt::Display;

/// One descriptor slot of a binding set.
#[derive(Debug)]
pub struct BufferBinding<'a, H> {
    pub slot: u32,
    pub role: BufferRole,
    pub buffer: &'a H,
    pub offset: u64,
    pub range: u64,
}

/// Everything needed to create the compute pipeline of one pass.
#[derive(Debug, Copy, Clone)]
pub struct PipelineDescriptor<'a> {
    pub kernel: KernelVariant,
    pub local_size: [u32; 3],
    pub constants: &'a SpecializationConstants,
}

/// Compute API the planner records into.
///
/// Objects are created while an application is built and handed back for
/// destruction in reverse creation order. Recording calls never fail, errors of
/// submitted work are reported by the backend itself.
pub trait ComputeBackend {
    type Buffer;
    type BindingSet;
    type Pipeline;
    type CommandStream;
    type Error: Display;

    fn create_binding_set(
        &self,
        kernel: KernelVariant,
        bindings: &[BufferBinding<'_, Self::Buffer>],
    ) -> Result<Self::BindingSet, Self::Error>;

    fn destroy_binding_set(&self, binding_set: Self::BindingSet);

    fn create_pipeline(
        &self,
        descriptor: &PipelineDescriptor<'_>,
        binding_set: &Self::BindingSet,
    ) -> Result<Self::Pipeline, Self::Error>;

    fn destroy_pipeline(&self, pipeline: Self::Pipeline);

    fn bind(
        &self,
        stream: &mut Self::CommandStream,
        pipeline: &Self::Pipeline,
        binding_set: &Self::BindingSet,
    );

    fn push_constants(
        &self,
        stream: &mut Self::CommandStream,
        pipeline: &Self::Pipeline,
        constants: PushConstants,
    );

    fn dispatch(&self, stream: &mut Self::CommandStream, workgroups: [u32; 3]);

    /// Compute shader write to compute shader read dependency.
    fn barrier(&self, stream: &mut Self::CommandStream);
}
