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
#![no_main]

use gpufft::{
    BufferBinding, BufferHandle, BufferSet, Command, ComputeBackend, FftConfiguration, GpuFft,
    KernelVariant, PipelineDescriptor, PushConstants,
};
use libfuzzer_sys::fuzz_target;
use std::cell::Cell;

#[derive(arbitrary::Arbitrary, Debug)]
struct Target {
    log_sizes: [u8; 3],
    dimensions: u8,
    batches: u8,
    features: u8,
    real_to_complex: bool,
    inverse: bool,
    convolution: bool,
    kernels: u8,
    fail_at: u8,
}

#[derive(Default)]
struct CountingBackend {
    next: Cell<u64>,
    live: Cell<usize>,
    pipelines: Cell<u8>,
    fail_at: u8,
}

#[derive(Debug, PartialEq, Eq)]
enum Op {
    Bind(u64),
    Push(PushConstants),
    Dispatch([u32; 3]),
    Barrier,
}

impl CountingBackend {
    fn allocate(&self) -> u64 {
        self.next.set(self.next.get() + 1);
        self.live.set(self.live.get() + 1);
        self.next.get()
    }
}

impl ComputeBackend for CountingBackend {
    type Buffer = u8;
    type BindingSet = u64;
    type Pipeline = u64;
    type CommandStream = Vec<Op>;
    type Error = &'static str;

    fn create_binding_set(
        &self,
        _: KernelVariant,
        _: &[BufferBinding<'_, u8>],
    ) -> Result<u64, &'static str> {
        Ok(self.allocate())
    }

    fn destroy_binding_set(&self, _: u64) {
        self.live.set(self.live.get() - 1);
    }

    fn create_pipeline(&self, _: &PipelineDescriptor<'_>, _: &u64) -> Result<u64, &'static str> {
        self.pipelines.set(self.pipelines.get().wrapping_add(1));
        if self.fail_at != 0 && self.pipelines.get() == self.fail_at {
            return Err("refused");
        }
        Ok(self.allocate())
    }

    fn destroy_pipeline(&self, _: u64) {
        self.live.set(self.live.get() - 1);
    }

    fn bind(&self, stream: &mut Vec<Op>, pipeline: &u64, _: &u64) {
        stream.push(Op::Bind(*pipeline));
    }

    fn push_constants(&self, stream: &mut Vec<Op>, _: &u64, constants: PushConstants) {
        stream.push(Op::Push(constants));
    }

    fn dispatch(&self, stream: &mut Vec<Op>, workgroups: [u32; 3]) {
        stream.push(Op::Dispatch(workgroups));
    }

    fn barrier(&self, stream: &mut Vec<Op>) {
        stream.push(Op::Barrier);
    }
}

fuzz_target!(|data: Target| {
    let dimensions = (data.dimensions % 3) as usize + 1;
    let mut size = [1usize; 3];
    for (s, &log) in size.iter_mut().zip(data.log_sizes.iter()).take(dimensions) {
        *s = 1 << (log % 10 + 3);
    }
    let mut config = FftConfiguration::new(size, dimensions)
        .with_batches((data.batches % 4) as usize + 1)
        .with_coordinate_features((data.features % 3) as usize + 1)
        .with_real_to_complex(data.real_to_complex && dimensions > 1)
        .with_inverse(data.inverse);
    if data.convolution {
        config = config
            .with_convolution(1, false)
            .with_kernels((data.kernels % 3) as usize + 1);
    }
    let (Ok(scratch), Ok(output), Ok(kernel)) = (
        config.scratch_buffer_size(),
        config.kernel_output_size(),
        config.kernel_buffer_size(),
    ) else {
        return;
    };
    let buffers = BufferSet::new(BufferHandle::new(0u8, scratch))
        .with_output(BufferHandle::new(1, scratch.max(output)))
        .with_kernel(BufferHandle::new(2, kernel));

    let backend = CountingBackend {
        fail_at: data.fail_at % 8,
        ..CountingBackend::default()
    };
    let mut app = match GpuFft::make_application(&backend, &config, &buffers) {
        Ok(app) => app,
        Err(_) => {
            assert_eq!(backend.live.get(), 0);
            return;
        }
    };
    let mut first = Vec::new();
    let mut second = Vec::new();
    app.execute(&mut first).unwrap();
    app.execute(&mut second).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), app.commands().len());
    assert_ne!(app.commands().last(), Some(&Command::Barrier));
    app.destroy();
    assert_eq!(backend.live.get(), 0);
    assert!(app.execute(&mut first).is_err());
});
