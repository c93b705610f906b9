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

use gpufft::{FftConfiguration, GpuFft, GpuFftError, Radix};
use libfuzzer_sys::fuzz_target;

#[derive(arbitrary::Arbitrary, Debug)]
struct Target {
    log_sizes: [u8; 3],
    dimensions: u8,
    radix: u8,
    register_boost: u8,
    coalesced: u8,
    real_to_complex: bool,
    inverse: bool,
    convolution: bool,
    matrix: u8,
    symmetric: bool,
    kernels: u8,
    zero_padding: [bool; 3],
    formatted: (bool, bool),
}

fuzz_target!(|data: Target| {
    let dimensions = (data.dimensions % 3) as usize + 1;
    let mut size = [1usize; 3];
    for (s, &log) in size.iter_mut().zip(data.log_sizes.iter()).take(dimensions) {
        *s = 1 << (log % 14 + 1);
    }
    let radix = [Radix::R2, Radix::R4, Radix::R8][(data.radix % 3) as usize];
    let mut config = FftConfiguration::new(size, dimensions)
        .with_radix(radix)
        .with_register_boost([1, 2, 4][(data.register_boost % 3) as usize])
        .with_coalesced_memory(8 << (data.coalesced % 5))
        .with_real_to_complex(data.real_to_complex)
        .with_inverse(data.inverse)
        .with_zero_padding(data.zero_padding)
        .with_formatted(data.formatted.0, data.formatted.1);
    if data.convolution {
        config = config
            .with_convolution((data.matrix % 3) as usize + 1, data.symmetric)
            .with_kernels((data.kernels % 4) as usize + 1);
    }

    let plans = match GpuFft::build_plan(&config) {
        Ok(plans) => plans,
        Err(GpuFftError::NoKernelVariant(_)) => {
            assert!(data.real_to_complex && data.convolution && dimensions == 1);
            return;
        }
        Err(GpuFftError::ZeroWorkgroupCount(_, _)) | Err(GpuFftError::ValueOverflow(_, _)) => {
            return;
        }
        Err(err) => panic!("{err} for {config:?}"),
    };
    for plan in [Some(plans.main()), plans.inverse_convolution()].into_iter().flatten() {
        for axis in &plan.axes {
            assert_eq!(axis.covered_length(), size[axis.axis.axis]);
            let mut start = 1;
            for pass in &axis.passes {
                assert_eq!(pass.stage_start_size, start);
                start *= pass.fft_dim();
                assert_eq!(pass.strides.input[4], pass.strides.input[3] * config.features());
                assert!(pass.dispatch.iter().all(|&d| d > 0));
                let fused = config.convolution
                    && axis.axis.axis == dimensions - 1
                    && pass.key.upload == 0;
                assert_eq!(pass.slots.slot_count(), if fused { 3 } else { 2 });
                assert_eq!(pass.kernel.is_convolution(), fused);
            }
        }
    }
});
