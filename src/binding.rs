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
use crate::config::FftConfiguration;
use crate::layout::formatted_plane_elements;
use crate::{FftDirection, GpuFftError};
use std::fmt::{Display, Formatter};

/// Logical buffer a descriptor slot is bound to.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum BufferRole {
    Input,
    Scratch,
    Output,
    Kernel,
}

impl Display for BufferRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BufferRole::Input => "input",
            BufferRole::Scratch => "scratch",
            BufferRole::Output => "output",
            BufferRole::Kernel => "kernel",
        })
    }
}

/// Backend buffer together with its size in bytes.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct BufferHandle<H> {
    pub handle: H,
    pub size: u64,
}

impl<H> BufferHandle<H> {
    pub fn new(handle: H, size: u64) -> BufferHandle<H> {
        BufferHandle { handle, size }
    }
}

/// Buffers a plan may bind. Scratch is always required.
#[derive(Debug, Clone)]
pub struct BufferSet<H> {
    pub scratch: BufferHandle<H>,
    pub input: Option<BufferHandle<H>>,
    pub output: Option<BufferHandle<H>>,
    pub kernel: Option<BufferHandle<H>>,
}

impl<H> BufferSet<H> {
    pub fn new(scratch: BufferHandle<H>) -> BufferSet<H> {
        BufferSet {
            scratch,
            input: None,
            output: None,
            kernel: None,
        }
    }

    pub fn with_input(mut self, input: BufferHandle<H>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_output(mut self, output: BufferHandle<H>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_kernel(mut self, kernel: BufferHandle<H>) -> Self {
        self.kernel = Some(kernel);
        self
    }

    pub fn get(&self, role: BufferRole) -> Option<&BufferHandle<H>> {
        match role {
            BufferRole::Scratch => Some(&self.scratch),
            BufferRole::Input => self.input.as_ref(),
            BufferRole::Output => self.output.as_ref(),
            BufferRole::Kernel => self.kernel.as_ref(),
        }
    }
}

/// Buffers bound by one pass: slot 0 is read, slot 1 written, slot 2 holds the kernel.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct SlotBindings {
    pub read: BufferRole,
    pub write: BufferRole,
    pub kernel: bool,
}

impl SlotBindings {
    pub fn slot_count(&self) -> usize {
        if self.kernel { 3 } else { 2 }
    }

    pub fn roles(&self) -> Vec<BufferRole> {
        let mut roles = vec![self.read, self.write];
        if self.kernel {
            roles.push(BufferRole::Kernel);
        }
        roles
    }
}

/// Position of a pass within the complete dispatch sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct PassContext {
    pub(crate) direction: FftDirection,
    pub(crate) support: bool,
    /// First main axis pass dispatched by the whole sequence.
    pub(crate) entry: bool,
    /// Last main axis pass dispatched by the whole sequence.
    pub(crate) exit: bool,
    pub(crate) convolution_pass: bool,
}

/// Buffer role bound to each slot of a pass.
pub(crate) fn resolve_slots(config: &FftConfiguration, pass: &PassContext) -> SlotBindings {
    let fan_out = config.number_kernels > 1;
    let inverse = pass.direction == FftDirection::Inverse;

    let read = if !pass.support && pass.entry && config.input_formatted {
        BufferRole::Input
    } else if fan_out && inverse {
        BufferRole::Output
    } else {
        BufferRole::Scratch
    };

    let write = if !pass.support && pass.exit && config.output_formatted {
        BufferRole::Output
    } else if fan_out && (inverse || pass.convolution_pass) {
        BufferRole::Output
    } else {
        BufferRole::Scratch
    };

    SlotBindings {
        read,
        write,
        kernel: pass.convolution_pass,
    }
}

/// Bytes a caller visible buffer needs for `count` transforms. Unformatted boundaries
/// use the internal layout.
fn boundary_size(
    config: &FftConfiguration,
    formatted: bool,
    count: usize,
) -> Result<u64, GpuFftError> {
    if formatted {
        config.buffer_bytes(
            "formatted buffer",
            formatted_plane_elements(config),
            config.features(),
            count,
        )
    } else {
        config.buffer_bytes(
            "boundary buffer",
            config.plane_elements()?,
            config.features(),
            count,
        )
    }
}

fn required_size(config: &FftConfiguration, role: BufferRole) -> Result<u64, GpuFftError> {
    let forward = config.main_direction() == FftDirection::Forward;
    match role {
        BufferRole::Scratch => config.scratch_buffer_size(),
        BufferRole::Input => boundary_size(
            config,
            config.input_formatted && forward,
            config.number_batches,
        ),
        BufferRole::Output => {
            let exit_count = if config.convolution {
                config.number_kernels
            } else {
                config.number_batches
            };
            let exit = if config.output_formatted {
                boundary_size(config, !forward || config.convolution, exit_count)?
            } else {
                0
            };
            if config.number_kernels > 1 {
                Ok(exit.max(config.kernel_output_size()?))
            } else {
                Ok(exit)
            }
        }
        BufferRole::Kernel => config.kernel_buffer_size(),
    }
}

/// Checks that every role a plan binds was supplied with a sufficient size.
pub(crate) fn check_buffers<H>(
    config: &FftConfiguration,
    used: impl IntoIterator<Item = BufferRole>,
    buffers: &BufferSet<H>,
) -> Result<(), GpuFftError> {
    let scratch_required = config.scratch_buffer_size()?;
    if buffers.scratch.size < scratch_required {
        return Err(GpuFftError::BufferTooSmall(
            BufferRole::Scratch,
            buffers.scratch.size,
            scratch_required,
        ));
    }
    for role in used {
        let buffer = buffers.get(role).ok_or(GpuFftError::MissingBuffer(role))?;
        let required = required_size(config, role)?;
        if buffer.size < required {
            return Err(GpuFftError::BufferTooSmall(role, buffer.size, required));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(direction: FftDirection) -> PassContext {
        PassContext {
            direction,
            support: false,
            entry: false,
            exit: false,
            convolution_pass: false,
        }
    }

    #[test]
    fn test_in_place_uses_scratch() {
        let config = FftConfiguration::new([256, 1, 1], 1);
        let mut pass = context(FftDirection::Forward);
        pass.entry = true;
        pass.exit = true;
        let slots = resolve_slots(&config, &pass);
        assert_eq!(slots.roles(), vec![BufferRole::Scratch, BufferRole::Scratch]);
        assert_eq!(slots.slot_count(), 2);
    }

    #[test]
    fn test_formatted_boundaries() {
        let config = FftConfiguration::new([256, 1, 1], 1).with_formatted(true, true);
        let mut pass = context(FftDirection::Forward);
        pass.entry = true;
        let slots = resolve_slots(&config, &pass);
        assert_eq!((slots.read, slots.write), (BufferRole::Input, BufferRole::Scratch));
        pass.entry = false;
        pass.exit = true;
        let slots = resolve_slots(&config, &pass);
        assert_eq!((slots.read, slots.write), (BufferRole::Scratch, BufferRole::Output));
        pass.support = true;
        let slots = resolve_slots(&config, &pass);
        assert_eq!((slots.read, slots.write), (BufferRole::Scratch, BufferRole::Scratch));
    }

    #[test]
    fn test_kernel_fan_out() {
        let config = FftConfiguration::new([256, 1, 1], 1)
            .with_convolution(1, false)
            .with_kernels(4);
        let mut pass = context(FftDirection::Forward);
        pass.convolution_pass = true;
        let slots = resolve_slots(&config, &pass);
        assert_eq!(
            slots.roles(),
            vec![BufferRole::Scratch, BufferRole::Output, BufferRole::Kernel]
        );
        let slots = resolve_slots(&config, &context(FftDirection::Inverse));
        assert_eq!((slots.read, slots.write), (BufferRole::Output, BufferRole::Output));
        let slots = resolve_slots(&config, &context(FftDirection::Forward));
        assert_eq!((slots.read, slots.write), (BufferRole::Scratch, BufferRole::Scratch));
    }

    #[test]
    fn test_check_buffers() {
        let config = FftConfiguration::new([256, 1, 1], 1);
        let required = config.scratch_buffer_size().unwrap();
        let buffers = BufferSet::new(BufferHandle::new(0u32, required));
        assert!(check_buffers(&config, [BufferRole::Scratch], &buffers).is_ok());
        assert!(matches!(
            check_buffers(&config, [BufferRole::Input], &buffers),
            Err(GpuFftError::MissingBuffer(BufferRole::Input))
        ));
        let small = BufferSet::new(BufferHandle::new(0u32, required - 8));
        assert!(matches!(
            check_buffers(&config, [], &small),
            Err(GpuFftError::BufferTooSmall(BufferRole::Scratch, _, _))
        ));
        let config = config.with_convolution(1, false).with_kernels(2);
        let kernel_size = config.kernel_buffer_size().unwrap();
        let buffers = buffers
            .with_kernel(BufferHandle::new(1, kernel_size))
            .with_output(BufferHandle::new(2, 64));
        assert!(matches!(
            check_buffers(&config, [BufferRole::Kernel, BufferRole::Output], &buffers),
            Err(GpuFftError::BufferTooSmall(BufferRole::Output, 64, _))
        ));
    }

    #[test]
    fn test_boundary_sizes() {
        let config = FftConfiguration::new([256, 1, 1], 1)
            .with_formatted(true, true)
            .with_batches(2);
        assert_eq!(required_size(&config, BufferRole::Input).unwrap(), 256 * 2 * 8);
        assert_eq!(required_size(&config, BufferRole::Output).unwrap(), 256 * 2 * 8);

        let padded = FftConfiguration::new([256, 1, 1], 1)
            .with_formatted(true, true)
            .with_zero_padding([true, false, false]);
        assert_eq!(required_size(&padded, BufferRole::Input).unwrap(), 128 * 8);
        // forward exit is addressed with the internal layout
        assert_eq!(required_size(&padded, BufferRole::Output).unwrap(), 256 * 8);

        let r2c = FftConfiguration::new([64, 8, 1], 2)
            .with_real_to_complex(true)
            .with_formatted(true, false);
        assert_eq!(required_size(&r2c, BufferRole::Input).unwrap(), 64 * 8 / 2 * 8);

        let conv = FftConfiguration::new([64, 1, 1], 1)
            .with_convolution(1, false)
            .with_kernels(3);
        assert_eq!(required_size(&conv, BufferRole::Kernel).unwrap(), 64 * 3 * 8);
        assert_eq!(required_size(&conv, BufferRole::Output).unwrap(), 64 * 3 * 8);
    }

    #[test]
    fn test_one_byte_boundaries_are_rejected() {
        let config = FftConfiguration::new([256, 1, 1], 1)
            .with_formatted(true, true)
            .with_convolution(1, false);
        let scratch = config.scratch_buffer_size().unwrap();
        let buffers = BufferSet::new(BufferHandle::new(0u32, scratch))
            .with_input(BufferHandle::new(1, 1))
            .with_output(BufferHandle::new(2, 1))
            .with_kernel(BufferHandle::new(3, 1));
        for role in [BufferRole::Input, BufferRole::Output, BufferRole::Kernel] {
            assert!(matches!(
                check_buffers(&config, [role], &buffers),
                Err(GpuFftError::BufferTooSmall(r, 1, _)) if r == role
            ));
        }
    }
}
