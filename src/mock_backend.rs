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
use crate::backend::{BufferBinding, ComputeBackend, PipelineDescriptor};
use crate::binding::{BufferHandle, BufferRole, BufferSet};
use crate::config::FftConfiguration;
use crate::constants::PushConstants;
use crate::kernel::KernelVariant;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Recorded {
    Bind { pipeline: u64, binding_set: u64 },
    Push(PushConstants),
    Dispatch([u32; 3]),
    Barrier,
}

/// Hands out integer handles and remembers what is alive.
#[derive(Default)]
pub(crate) struct RecordingBackend {
    next_handle: Cell<u64>,
    pipelines_created: Cell<usize>,
    fail_pipeline_at: Option<usize>,
    live: RefCell<BTreeSet<u64>>,
    created: RefCell<Vec<u64>>,
    released: RefCell<Vec<u64>>,
    binding_sets: RefCell<Vec<(u32, Vec<BufferRole>)>>,
}

impl RecordingBackend {
    pub(crate) fn new() -> RecordingBackend {
        RecordingBackend::default()
    }

    /// Fails the n-th pipeline creation, counted from one.
    pub(crate) fn failing_at(n: usize) -> RecordingBackend {
        RecordingBackend {
            fail_pipeline_at: Some(n),
            ..RecordingBackend::default()
        }
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.live.borrow().len()
    }

    pub(crate) fn created_order(&self) -> Vec<u64> {
        self.created.borrow().clone()
    }

    pub(crate) fn released_order(&self) -> Vec<u64> {
        self.released.borrow().clone()
    }

    pub(crate) fn binding_sets(&self) -> Vec<(u32, Vec<BufferRole>)> {
        self.binding_sets.borrow().clone()
    }

    fn allocate(&self) -> u64 {
        let handle = self.next_handle.get() + 1;
        self.next_handle.set(handle);
        self.live.borrow_mut().insert(handle);
        self.created.borrow_mut().push(handle);
        handle
    }

    fn free(&self, handle: u64) {
        assert!(self.live.borrow_mut().remove(&handle), "double free of {handle}");
        self.released.borrow_mut().push(handle);
    }
}

impl ComputeBackend for RecordingBackend {
    type Buffer = u32;
    type BindingSet = u64;
    type Pipeline = u64;
    type CommandStream = Vec<Recorded>;
    type Error = String;

    fn create_binding_set(
        &self,
        kernel: KernelVariant,
        bindings: &[BufferBinding<'_, u32>],
    ) -> Result<u64, String> {
        self.binding_sets
            .borrow_mut()
            .push((kernel.id(), bindings.iter().map(|b| b.role).collect()));
        Ok(self.allocate())
    }

    fn destroy_binding_set(&self, binding_set: u64) {
        self.free(binding_set);
    }

    fn create_pipeline(
        &self,
        descriptor: &PipelineDescriptor<'_>,
        binding_set: &u64,
    ) -> Result<u64, String> {
        assert!(self.live.borrow().contains(binding_set));
        assert_eq!(descriptor.local_size, descriptor.constants.local_size);
        let count = self.pipelines_created.get() + 1;
        self.pipelines_created.set(count);
        if self.fail_pipeline_at == Some(count) {
            return Err(format!("pipeline {count} for {} refused", descriptor.kernel));
        }
        Ok(self.allocate())
    }

    fn destroy_pipeline(&self, pipeline: u64) {
        self.free(pipeline);
    }

    fn bind(&self, stream: &mut Vec<Recorded>, pipeline: &u64, binding_set: &u64) {
        stream.push(Recorded::Bind {
            pipeline: *pipeline,
            binding_set: *binding_set,
        });
    }

    fn push_constants(&self, stream: &mut Vec<Recorded>, _: &u64, constants: PushConstants) {
        stream.push(Recorded::Push(constants));
    }

    fn dispatch(&self, stream: &mut Vec<Recorded>, workgroups: [u32; 3]) {
        stream.push(Recorded::Dispatch(workgroups));
    }

    fn barrier(&self, stream: &mut Vec<Recorded>) {
        stream.push(Recorded::Barrier);
    }
}

/// Buffers large enough for every role a configuration may bind.
pub(crate) fn buffers_for(config: &FftConfiguration) -> BufferSet<u32> {
    let scratch = config.scratch_buffer_size().unwrap();
    let output = scratch.max(config.kernel_output_size().unwrap());
    BufferSet::new(BufferHandle::new(0, scratch))
        .with_input(BufferHandle::new(1, scratch))
        .with_output(BufferHandle::new(2, output))
        .with_kernel(BufferHandle::new(3, config.kernel_buffer_size().unwrap()))
}
