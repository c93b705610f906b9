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
use gpufft::{
    BufferBinding, BufferHandle, BufferSet, Command, ComputeBackend, FftConfiguration,
    GpuFft, GpuFftError, KernelVariant, PipelineDescriptor, PushConstants, Radix,
};
use std::cell::Cell;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Counts recorded work instead of talking to a device.
#[derive(Default)]
struct CountingBackend {
    handles: Cell<u64>,
}

#[derive(Default, Debug)]
struct Stream {
    binds: usize,
    pushes: usize,
    workgroups: u64,
    barriers: usize,
}

impl ComputeBackend for CountingBackend {
    type Buffer = &'static str;
    type BindingSet = u64;
    type Pipeline = u64;
    type CommandStream = Stream;
    type Error = String;

    fn create_binding_set(
        &self,
        kernel: KernelVariant,
        bindings: &[BufferBinding<'_, &'static str>],
    ) -> Result<u64, String> {
        let names: Vec<&str> = bindings.iter().map(|b| *b.buffer).collect();
        info!(%kernel, ?names, "binding set");
        self.handles.set(self.handles.get() + 1);
        Ok(self.handles.get())
    }

    fn destroy_binding_set(&self, _: u64) {}

    fn create_pipeline(&self, descriptor: &PipelineDescriptor<'_>, _: &u64) -> Result<u64, String> {
        info!(
            kernel = %descriptor.kernel,
            local_size = ?descriptor.local_size,
            stages = descriptor.constants.num_stages,
            radix = ?descriptor.constants.stage_radix,
            "pipeline"
        );
        self.handles.set(self.handles.get() + 1);
        Ok(self.handles.get())
    }

    fn destroy_pipeline(&self, _: u64) {}

    fn bind(&self, stream: &mut Stream, _: &u64, _: &u64) {
        stream.binds += 1;
    }

    fn push_constants(&self, stream: &mut Stream, _: &u64, _: PushConstants) {
        stream.pushes += 1;
    }

    fn dispatch(&self, stream: &mut Stream, workgroups: [u32; 3]) {
        stream.workgroups += workgroups.iter().map(|&w| w as u64).product::<u64>();
    }

    fn barrier(&self, stream: &mut Stream) {
        stream.barriers += 1;
    }
}

fn buffers(config: &FftConfiguration) -> Result<BufferSet<&'static str>, GpuFftError> {
    let scratch = config.scratch_buffer_size()?;
    let output = scratch.max(config.kernel_output_size()?);
    Ok(BufferSet::new(BufferHandle::new("scratch", scratch))
        .with_input(BufferHandle::new("input", scratch))
        .with_output(BufferHandle::new("output", output))
        .with_kernel(BufferHandle::new("kernel", config.kernel_buffer_size()?)))
}

fn describe(name: &str, config: &FftConfiguration) -> Result<(), GpuFftError> {
    let plans = GpuFft::build_plan(config)?;
    for axis in &plans.main().axes {
        let dims: Vec<usize> = axis.passes.iter().map(|p| p.fft_dim()).collect();
        info!(name, axis = %axis.axis, ?dims, "passes");
    }
    let backend = CountingBackend::default();
    let buffers = buffers(config)?;
    let app = GpuFft::make_application(&backend, config, &buffers)?;
    let mut stream = Stream::default();
    app.execute(&mut stream)?;
    let dispatches = app
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::Dispatch(_)))
        .count();
    info!(name, stages = app.stage_count(), dispatches, ?stream, "recorded");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let configurations = [
        ("c2c 1d 8192", FftConfiguration::new([8192, 1, 1], 1)),
        (
            "r2c 2d 1024x512",
            FftConfiguration::new([1024, 512, 1], 2)
                .with_real_to_complex(true)
                .with_formatted(true, true),
        ),
        (
            "boosted 16384",
            FftConfiguration::new([16384, 1, 1], 1).with_register_boost(4),
        ),
        (
            "radix 4 3d",
            FftConfiguration::new([256, 128, 64], 3).with_radix(Radix::R4),
        ),
        (
            "convolution 2d, 3 kernels",
            FftConfiguration::new([512, 512, 1], 2)
                .with_convolution(1, false)
                .with_kernels(3),
        ),
    ];
    for (name, config) in configurations.iter() {
        if let Err(err) = describe(name, config) {
            tracing::error!(name, %err, "planning failed");
        }
    }
}
