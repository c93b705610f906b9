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
use crate::binding::{BufferSet, check_buffers};
use crate::config::{FftConfiguration, TransposeStrategy};
use crate::err::try_vec;
use crate::plan::{PlanSet, StageDescriptor, StageKey, build_plan};
use crate::sequencer::{Command, record};
use crate::GpuFftError;
use std::collections::HashMap;
use tracing::{debug, info, trace, warn};

struct StageResources<B: ComputeBackend> {
    key: StageKey,
    binding_set: B::BindingSet,
    pipeline: B::Pipeline,
}

struct StageTable<B: ComputeBackend> {
    stages: Vec<StageResources<B>>,
    index: HashMap<StageKey, usize>,
}

impl<B: ComputeBackend> StageTable<B> {
    fn get(&self, key: &StageKey) -> Option<&StageResources<B>> {
        self.index.get(key).and_then(|&i| self.stages.get(i))
    }
}

/// Releases stages in reverse creation order, pipeline before its binding set.
fn release<B: ComputeBackend>(backend: &B, stages: Vec<StageResources<B>>) {
    for stage in stages.into_iter().rev() {
        backend.destroy_pipeline(stage.pipeline);
        backend.destroy_binding_set(stage.binding_set);
    }
}

fn create_stage<B: ComputeBackend>(
    backend: &B,
    stage: &StageDescriptor,
    buffers: &BufferSet<B::Buffer>,
) -> Result<StageResources<B>, GpuFftError> {
    let roles = stage.slots.roles();
    let mut bindings = Vec::with_capacity(roles.len());
    for (slot, &role) in roles.iter().enumerate() {
        let buffer = buffers.get(role).ok_or(GpuFftError::MissingBuffer(role))?;
        bindings.push(BufferBinding {
            slot: slot as u32,
            role,
            buffer: &buffer.handle,
            offset: 0,
            range: buffer.size,
        });
    }
    let binding_set = backend
        .create_binding_set(stage.kernel, &bindings)
        .map_err(|e| GpuFftError::Backend(e.to_string()))?;
    let descriptor = PipelineDescriptor {
        kernel: stage.kernel,
        local_size: stage.local_size(),
        constants: &stage.constants,
    };
    let pipeline = match backend.create_pipeline(&descriptor, &binding_set) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            backend.destroy_binding_set(binding_set);
            return Err(GpuFftError::Backend(e.to_string()));
        }
    };
    debug!(
        axis = %stage.key.axis,
        pass = stage.key.upload,
        plan = ?stage.key.plan,
        kernel = %stage.kernel,
        fft_dim = stage.fft_dim(),
        local_size = ?stage.local_size(),
        dispatch = ?stage.dispatch,
        "created stage"
    );
    Ok(StageResources {
        key: stage.key,
        binding_set,
        pipeline,
    })
}

/// A planned transform bound to backend objects, ready to be recorded any number of times.
///
/// Owns one binding set and one pipeline per dispatched pass. They are released by
/// [`FftApplication::destroy`] or on drop, whichever comes first.
pub struct FftApplication<'a, B: ComputeBackend> {
    backend: &'a B,
    plans: PlanSet,
    commands: Vec<Command>,
    stages: Option<StageTable<B>>,
}

impl<'a, B: ComputeBackend> FftApplication<'a, B> {
    pub fn new(
        backend: &'a B,
        configuration: &FftConfiguration,
        buffers: &BufferSet<B::Buffer>,
    ) -> Result<FftApplication<'a, B>, GpuFftError> {
        let plans = build_plan(configuration)?;
        FftApplication::from_plan(backend, plans, buffers)
    }

    /// Creates backend objects for an already built plan. On failure nothing stays allocated.
    pub fn from_plan(
        backend: &'a B,
        plans: PlanSet,
        buffers: &BufferSet<B::Buffer>,
    ) -> Result<FftApplication<'a, B>, GpuFftError> {
        let configuration = plans.configuration();
        if configuration.transpose == TransposeStrategy::ExplicitTranspose {
            warn!("explicit transpose plans are layout only and cannot be recorded");
            return Err(GpuFftError::UnvalidatedTransposeStrategy);
        }
        let keys: Vec<StageKey> = plans.scheduled_stages().collect();
        let mut descriptors = Vec::with_capacity(keys.len());
        for key in &keys {
            let stage = plans
                .stage(key)
                .ok_or(GpuFftError::MissingStage(key.axis.axis, key.upload))?;
            descriptors.push(stage);
        }
        check_buffers(
            configuration,
            descriptors.iter().flat_map(|s| s.slots.roles()),
            buffers,
        )?;
        let commands = record(&plans)?;

        let mut created: Vec<StageResources<B>> = try_vec!(descriptors.len());
        for stage in &descriptors {
            match create_stage(backend, stage, buffers) {
                Ok(resources) => created.push(resources),
                Err(err) => {
                    warn!(
                        axis = %stage.key.axis,
                        pass = stage.key.upload,
                        error = %err,
                        "stage creation failed, releasing {} stages",
                        created.len()
                    );
                    release(backend, created);
                    return Err(err);
                }
            }
        }
        let index = created
            .iter()
            .enumerate()
            .map(|(i, stage)| (stage.key, i))
            .collect();

        info!(
            dimensions = configuration.dimensions,
            size = ?configuration.size,
            stages = created.len(),
            commands = commands.len(),
            convolution = configuration.convolution,
            "built fft application"
        );

        Ok(FftApplication {
            backend,
            plans,
            commands,
            stages: Some(StageTable {
                stages: created,
                index,
            }),
        })
    }

    pub fn plans(&self) -> &PlanSet {
        &self.plans
    }

    /// Command stream replayed by every [`FftApplication::execute`].
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn stage_count(&self) -> usize {
        self.stages.as_ref().map(|t| t.stages.len()).unwrap_or(0)
    }

    pub fn is_destroyed(&self) -> bool {
        self.stages.is_none()
    }

    /// Records the full dispatch sequence into `stream`. Repeatable, the plan is not modified.
    pub fn execute(&self, stream: &mut B::CommandStream) -> Result<(), GpuFftError> {
        let table = self.stages.as_ref().ok_or(GpuFftError::PlanDestroyed)?;
        let mut bound: Option<&StageResources<B>> = None;
        for command in &self.commands {
            match command {
                Command::Bind(key) => {
                    let stage = table
                        .get(key)
                        .ok_or(GpuFftError::MissingStage(key.axis.axis, key.upload))?;
                    self.backend.bind(stream, &stage.pipeline, &stage.binding_set);
                    bound = Some(stage);
                }
                Command::PushConstants(constants) => {
                    if let Some(stage) = bound {
                        self.backend.push_constants(stream, &stage.pipeline, *constants);
                    }
                }
                Command::Dispatch(workgroups) => self.backend.dispatch(stream, *workgroups),
                Command::Barrier => self.backend.barrier(stream),
            }
        }
        trace!(commands = self.commands.len(), "recorded fft dispatches");
        Ok(())
    }

    /// Releases every backend object. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if let Some(table) = self.stages.take() {
            debug!(stages = table.stages.len(), "destroying fft application");
            release(self.backend, table.stages);
        }
    }
}

impl<B: ComputeBackend> Drop for FftApplication<'_, B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
