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
use crate::config::{FftConfiguration, TransposeStrategy};
use crate::FftDirection;

/// Element strides of one pass: element, dim0, dim1, dim2 and feature plane.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct StrideLayout {
    pub input: [usize; 5],
    pub output: [usize; 5],
}

/// Size relation of an axis to its neighbours, consumed by transposing kernels.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct TransposeBookkeeping {
    pub ratio: [usize; 2],
    pub ratio_direction: [bool; 2],
}

/// Whether a pass faces a caller visible buffer in compact layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub(crate) struct FormattedBoundary {
    pub(crate) input: bool,
    pub(crate) output: bool,
}

/// Ratio of `a` to `b` or of `b` to `a`, whichever is at least one, and whether `a` was larger.
fn ratio_between(a: usize, b: usize) -> (usize, bool) {
    if b != 0 && a / b >= 1 {
        (a / b, true)
    } else if a != 0 {
        (b / a, false)
    } else {
        (0, false)
    }
}

/// Strides of the internal padded layout before boundary formatting.
fn base_strides(config: &FftConfiguration, axis: AxisRef) -> [usize; 4] {
    let [s0, s1, s2] = config.size;
    let transposed = config.transpose == TransposeStrategy::ExplicitTranspose;
    if axis.support {
        let columns = s0 / 2 + 1;
        return match axis.axis {
            1 => [1, s1, columns * s1, columns * s1 * s2],
            _ => [1, columns * s1, s1, columns * s1 * s2],
        };
    }
    if config.real_to_complex {
        let columns = s0 / 2 + 1;
        let total = columns * s1 * s2;
        match (axis.axis, transposed) {
            (0, _) => [1, s0, columns * s1, total],
            (1, false) => [1, s0 / 2, columns * s1, total],
            (1, true) => [1, s1, columns * s1, total],
            (_, false) => [1, columns * s1, s0 / 2, total],
            (_, true) => [1, columns * s2, s2, total],
        }
    } else {
        let total = s0 * s1 * s2;
        match (axis.axis, transposed) {
            (0, _) => [1, s0, s0 * s1, total],
            (1, false) => [1, s0, s0 * s1, total],
            (1, true) => [1, s1, s0 * s1, total],
            (_, false) => [1, s0 * s1, s0, total],
            (_, true) => [1, s0 * s2, s2, total],
        }
    }
}

/// Compact strides of a caller visible buffer, halved along zero padded dimensions.
fn formatted_strides(config: &FftConfiguration, strides: &mut [usize; 4]) {
    let [s0, s1, s2] = config.size;
    let [zp0, zp1, zp2] = config.zero_padding;
    if zp0 {
        strides[1] = s0 / 2;
    }
    let divider = match (config.real_to_complex, zp1) {
        (true, true) => 4,
        (true, false) => 2,
        (false, true) => 2,
        (false, false) => 1,
    };
    strides[2] = strides[1] * s1 / divider;
    strides[3] = strides[2] * s2 / if zp2 { 2 } else { 1 };
}

/// Complex elements of one feature plane of a caller visible buffer in compact layout.
pub(crate) fn formatted_plane_elements(config: &FftConfiguration) -> usize {
    let mut strides = base_strides(config, AxisRef::main(0));
    formatted_strides(config, &mut strides);
    strides[3]
}

fn with_feature_plane(strides: [usize; 4], features: usize) -> [usize; 5] {
    [
        strides[0],
        strides[1],
        strides[2],
        strides[3],
        strides[3] * features,
    ]
}

/// Input and output strides of a pass. Formatting only applies to axis 0 boundaries.
pub(crate) fn pass_strides(
    config: &FftConfiguration,
    axis: AxisRef,
    boundary: FormattedBoundary,
) -> StrideLayout {
    let base = base_strides(config, axis);
    let mut input = base;
    let mut output = base;
    if !axis.support && axis.axis == 0 {
        if boundary.input {
            formatted_strides(config, &mut input);
        }
        if boundary.output {
            formatted_strides(config, &mut output);
        }
    }
    let features = config.features();
    StrideLayout {
        input: with_feature_plane(input, features),
        output: with_feature_plane(output, features),
    }
}

pub(crate) fn zero_pad(config: &FftConfiguration, axis: AxisRef) -> [bool; 2] {
    let own = config.zero_padding[axis.axis];
    let next = !axis.support && axis.axis == 0 && config.zero_padding[1];
    [own, next]
}

/// Element offsets of the input and output views. Support axes start at the Nyquist column set.
pub(crate) fn offsets(config: &FftConfiguration, axis: AxisRef) -> (usize, usize) {
    if axis.support {
        let offset = config.size[0] * config.size[1] / 2;
        (offset, offset)
    } else {
        (0, 0)
    }
}

pub(crate) fn transpose_bookkeeping(
    config: &FftConfiguration,
    axis: AxisRef,
    direction: FftDirection,
) -> TransposeBookkeeping {
    let [s0, s1, s2] = config.size;
    if axis.support {
        let ratio = config.size[axis.axis - 1] / config.size[axis.axis];
        return TransposeBookkeeping {
            ratio: [ratio, ratio],
            ratio_direction: [false, true],
        };
    }
    let transposed = config.transpose == TransposeStrategy::ExplicitTranspose;
    let dims = config.dimensions;
    let conv = config.convolution;
    let first_second = if config.real_to_complex {
        ratio_between(s0 / 2, s1)
    } else {
        ratio_between(s0, s1)
    };
    let second_third = ratio_between(s1, s2);

    let mut ratio = [0usize; 2];
    let mut dir = [false; 2];
    match (direction, axis.axis) {
        (FftDirection::Forward, 0) => {
            ratio[0] = 1;
            if dims > 1 {
                (ratio[1], dir[1]) = first_second;
            }
            if !transposed {
                dir = [false, true];
            }
        }
        (FftDirection::Forward, 1) => {
            (ratio[0], dir[0]) = first_second;
            let conv_axis = conv && dims == 2;
            if conv_axis {
                ratio[1] = first_second.0;
                dir[1] = !first_second.1;
            }
            if dims > 2 {
                (ratio[1], dir[1]) = second_third;
            }
            if !transposed {
                dir[0] = false;
                if !conv_axis {
                    dir[1] = true;
                }
            }
        }
        (FftDirection::Forward, _) => {
            (ratio[0], dir[0]) = second_third;
            ratio[1] = 1;
            dir[1] = true;
            if conv && dims == 3 {
                ratio[1] = second_third.0;
                dir[1] = !second_third.1;
            }
            if !transposed {
                dir = [false, true];
            }
        }
        (FftDirection::Inverse, 0) => {
            ratio[1] = 1;
            dir[1] = true;
            if dims > 1 {
                ratio[0] = first_second.0;
                dir[0] = !first_second.1;
            }
            if !transposed {
                dir = [false, true];
            }
        }
        (FftDirection::Inverse, 1) => {
            ratio[1] = first_second.0;
            dir[1] = !first_second.1;
            if dims > 2 {
                ratio[0] = second_third.0;
                dir[0] = !second_third.1;
            }
            if !transposed {
                dir = [false, true];
            }
        }
        (FftDirection::Inverse, _) => {
            ratio[1] = second_third.0;
            dir[1] = !second_third.1;
            ratio[0] = 1;
            if !transposed {
                dir[1] = true;
            }
        }
    }
    TransposeBookkeeping {
        ratio,
        ratio_direction: dir,
    }
}
