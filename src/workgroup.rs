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
use crate::axis::AxisRef;
use crate::config::FftConfiguration;
use crate::util::{ceil_div, to_u32};
use crate::GpuFftError;

/// Upper bound of local size x.
const MAX_LOCAL_SIZE_X: usize = 512;

/// Independent transforms processed together by one workgroup.
pub(crate) fn grouped_batch(fft_dim: usize, coalesced_memory: usize) -> usize {
    (4096 / fft_dim).max(coalesced_memory / 8)
}

/// Local workgroup size of a pass, `[x, y, z, fft_dim]`.
pub(crate) fn axis_block(
    config: &FftConfiguration,
    axis: AxisRef,
    upload: usize,
    fft_dim: usize,
    stage_start_size: usize,
) -> [usize; 4] {
    let grouped = grouped_batch(fft_dim, config.coalesced_memory);
    let unrolled = (fft_dim / 8).max(1);
    let [x, y] = match (axis.support, axis.axis) {
        (false, 0) | (true, 1) => {
            if upload == 0 {
                [(fft_dim / 8).clamp(1, MAX_LOCAL_SIZE_X), 1]
            } else {
                [stage_start_size.min(grouped), unrolled]
            }
        }
        (true, _) => [config.size[1].min(grouped), unrolled],
        (false, _) => {
            let columns = if config.real_to_complex {
                config.size[0] / 2
            } else {
                config.size[0]
            };
            [columns.min(grouped), unrolled]
        }
    };
    [x.min(MAX_LOCAL_SIZE_X), y, 1, fft_dim]
}

/// Workgroup count of one dispatch of a pass.
pub(crate) fn dispatch_extent(
    config: &FftConfiguration,
    axis: AxisRef,
    upload: usize,
    block: &[usize; 4],
) -> Result<[u32; 3], GpuFftError> {
    let [s0, s1, s2] = config.size;
    let [_, zp1, zp2] = config.zero_padding;
    let fft_dim = block[3];
    let block_x = block[0];
    let depth = if zp2 { ceil_div(s2, 2) } else { s2 };
    let columns = if config.real_to_complex {
        ceil_div(s0, 2)
    } else {
        s0
    };
    let extent = match (axis.support, axis.axis) {
        (false, 0) | (true, 1) => {
            let length = if axis.support { s1 } else { s0 };
            let mut x = length / fft_dim;
            if upload > 0 {
                x /= block_x;
            }
            if axis.support {
                [x, 1, depth]
            } else {
                let rows = match (config.real_to_complex, zp1) {
                    (true, true) => ceil_div(s1, 4),
                    (true, false) => ceil_div(s1, 2),
                    (false, true) => ceil_div(s1, 2),
                    (false, false) => s1,
                };
                [x, rows, depth]
            }
        }
        (true, _) => [s1 * s2 / (block_x * fft_dim), 1, 1],
        (false, 1) => [columns * s1 / (block_x * fft_dim), 1, depth],
        (false, _) => [columns * s2 / (block_x * fft_dim), 1, s1],
    };
    if extent.contains(&0) {
        return Err(GpuFftError::ZeroWorkgroupCount(axis.axis, upload));
    }
    Ok([
        to_u32("workgroup count x", extent[0])?,
        to_u32("workgroup count y", extent[1])?,
        to_u32("workgroup count z", extent[2])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_batch() {
        assert_eq!(grouped_batch(8, 32), 512);
        assert_eq!(grouped_batch(4096, 32), 4);
        assert_eq!(grouped_batch(8192, 64), 8);
    }

    #[test]
    fn test_first_pass_block() {
        let config = FftConfiguration::new([4096, 1, 1], 1);
        assert_eq!(axis_block(&config, AxisRef::main(0), 0, 4096, 1), [512, 1, 1, 4096]);
        assert_eq!(axis_block(&config, AxisRef::main(0), 0, 8, 1), [1, 1, 1, 8]);
    }

    #[test]
    fn test_later_pass_block() {
        let config = FftConfiguration::new([8192, 1, 1], 1);
        assert_eq!(axis_block(&config, AxisRef::main(0), 1, 8, 1024), [512, 1, 1, 8]);
        let block = axis_block(&config, AxisRef::main(0), 1, 1024, 8);
        assert_eq!(block, [4, 128, 1, 1024]);
        let block = axis_block(&config, AxisRef::main(0), 1, 2, 4096);
        assert_eq!(block, [512, 1, 1, 2]);
        assert_eq!(
            dispatch_extent(&config, AxisRef::main(0), 1, &block).ok(),
            Some([8, 1, 1])
        );
    }

    #[test]
    fn test_strided_block() {
        let config = FftConfiguration::new([64, 256, 1], 2).with_real_to_complex(true);
        assert_eq!(axis_block(&config, AxisRef::main(1), 0, 256, 1), [16, 32, 1, 256]);
        assert_eq!(axis_block(&config, AxisRef::support(2), 0, 8, 1), [256, 1, 1, 8]);
        let wide = FftConfiguration::new([4096, 4096, 1], 2).with_radix(crate::Radix::R2);
        assert_eq!(axis_block(&wide, AxisRef::main(1), 0, 2, 1), [512, 1, 1, 2]);
    }

    #[test]
    fn test_dispatch_axis0() {
        let config = FftConfiguration::new([8192, 16, 4], 3).with_zero_padding([false, true, true]);
        let block = axis_block(&config, AxisRef::main(0), 0, 1024, 1);
        assert_eq!(
            dispatch_extent(&config, AxisRef::main(0), 0, &block).ok(),
            Some([8, 8, 2])
        );
        let block = axis_block(&config, AxisRef::main(0), 1, 8, 1024);
        assert_eq!(
            dispatch_extent(&config, AxisRef::main(0), 1, &block).ok(),
            Some([2, 8, 2])
        );
    }

    #[test]
    fn test_dispatch_r2c_rows() {
        let config = FftConfiguration::new([64, 16, 1], 2).with_real_to_complex(true);
        let block = axis_block(&config, AxisRef::main(0), 0, 64, 1);
        assert_eq!(
            dispatch_extent(&config, AxisRef::main(0), 0, &block).ok(),
            Some([1, 8, 1])
        );
        let block = axis_block(&config, AxisRef::main(1), 0, 16, 1);
        assert_eq!(
            dispatch_extent(&config, AxisRef::main(1), 0, &block).ok(),
            Some([1, 1, 1])
        );
        let block = axis_block(&config, AxisRef::support(1), 0, 16, 1);
        assert_eq!(
            dispatch_extent(&config, AxisRef::support(1), 0, &block).ok(),
            Some([1, 1, 1])
        );
    }

    #[test]
    fn test_dispatch_strided_axes() {
        let config = FftConfiguration::new([256, 64, 32], 3);
        let block = axis_block(&config, AxisRef::main(1), 0, 64, 1);
        assert_eq!(block[0], 64);
        assert_eq!(
            dispatch_extent(&config, AxisRef::main(1), 0, &block).ok(),
            Some([4, 1, 32])
        );
        let block = axis_block(&config, AxisRef::main(2), 0, 32, 1);
        assert_eq!(block[0], 128);
        assert_eq!(
            dispatch_extent(&config, AxisRef::main(2), 0, &block).ok(),
            Some([2, 1, 64])
        );
    }

    #[test]
    fn test_zero_workgroup_count() {
        let config = FftConfiguration::new([16, 1, 1], 1);
        let block = [4, 1, 1, 32];
        assert!(matches!(
            dispatch_extent(&config, AxisRef::main(0), 0, &block),
            Err(GpuFftError::ZeroWorkgroupCount(0, 0))
        ));
    }
}
