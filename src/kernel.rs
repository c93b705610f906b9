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
use crate::axis::{AxisRef, AxisRole};
use crate::{FftDirection, GpuFftError};
use std::fmt::{Display, Formatter};

/// Shape of the pointwise or matrix multiply fused into a convolution pass.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ConvolutionShape {
    Pointwise,
    Symmetric2x2,
    Nonsymmetric2x2,
    Symmetric3x3,
    Nonsymmetric3x3,
}

impl ConvolutionShape {
    pub fn from_matrix(matrix: usize, symmetric: bool) -> Option<ConvolutionShape> {
        match (matrix, symmetric) {
            (1, _) => Some(ConvolutionShape::Pointwise),
            (2, true) => Some(ConvolutionShape::Symmetric2x2),
            (2, false) => Some(ConvolutionShape::Nonsymmetric2x2),
            (3, true) => Some(ConvolutionShape::Symmetric3x3),
            (3, false) => Some(ConvolutionShape::Nonsymmetric3x3),
            _ => None,
        }
    }

    fn ordinal(self) -> u32 {
        match self {
            ConvolutionShape::Pointwise => 0,
            ConvolutionShape::Symmetric2x2 => 1,
            ConvolutionShape::Nonsymmetric2x2 => 2,
            ConvolutionShape::Symmetric3x3 => 3,
            ConvolutionShape::Nonsymmetric3x3 => 4,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            ConvolutionShape::Pointwise => "1x1",
            ConvolutionShape::Symmetric2x2 => "symmetric_2x2",
            ConvolutionShape::Nonsymmetric2x2 => "nonsymmetric_2x2",
            ConvolutionShape::Symmetric3x3 => "symmetric_3x3",
            ConvolutionShape::Nonsymmetric3x3 => "nonsymmetric_3x3",
        }
    }
}

/// Precompiled compute kernel. The backend resolves it through [`KernelVariant::id`].
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum KernelVariant {
    SingleC2C,
    SingleC2R,
    SingleC2CStrided,
    SingleR2C,
    GroupedC2C,
    GroupedConvolution(ConvolutionShape),
    SingleConvolution(ConvolutionShape),
    C2R8192,
    R2C8192,
    C2C8192,
    C2R16384,
    R2C16384,
    C2C16384,
}

impl KernelVariant {
    pub fn id(self) -> u32 {
        match self {
            KernelVariant::SingleC2C => 0,
            KernelVariant::SingleC2R => 1,
            KernelVariant::SingleC2CStrided => 2,
            KernelVariant::SingleR2C => 3,
            KernelVariant::GroupedC2C => 7,
            KernelVariant::GroupedConvolution(shape) => 8 + 3 * shape.ordinal(),
            KernelVariant::SingleConvolution(shape) => 9 + 3 * shape.ordinal(),
            KernelVariant::C2R8192 => 23,
            KernelVariant::R2C8192 => 24,
            KernelVariant::C2C8192 => 25,
            KernelVariant::C2R16384 => 33,
            KernelVariant::R2C16384 => 34,
            KernelVariant::C2C16384 => 35,
        }
    }

    pub fn name(self) -> String {
        match self {
            KernelVariant::SingleC2C => "single_c2c".to_string(),
            KernelVariant::SingleC2R => "single_c2r".to_string(),
            KernelVariant::SingleC2CStrided => "single_c2c_strided".to_string(),
            KernelVariant::SingleR2C => "single_r2c".to_string(),
            KernelVariant::GroupedC2C => "grouped_c2c".to_string(),
            KernelVariant::GroupedConvolution(shape) => {
                format!("grouped_convolution_{}", shape.suffix())
            }
            KernelVariant::SingleConvolution(shape) => {
                format!("single_convolution_{}", shape.suffix())
            }
            KernelVariant::C2R8192 => "single_c2r_8192".to_string(),
            KernelVariant::R2C8192 => "single_r2c_8192".to_string(),
            KernelVariant::C2C8192 => "single_c2c_8192".to_string(),
            KernelVariant::C2R16384 => "single_c2r_16384".to_string(),
            KernelVariant::R2C16384 => "single_r2c_16384".to_string(),
            KernelVariant::C2C16384 => "single_c2c_16384".to_string(),
        }
    }

    pub fn is_convolution(self) -> bool {
        matches!(
            self,
            KernelVariant::GroupedConvolution(_) | KernelVariant::SingleConvolution(_)
        )
    }
}

impl Display for KernelVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} ({})", self.name(), self.id()))
    }
}

/// Register boosted kernels exist for exactly these per-workgroup lengths.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum WideClass {
    Standard,
    W8192,
    W16384,
}

impl WideClass {
    pub fn classify(register_boost: usize, fft_dim: usize) -> WideClass {
        match (register_boost, fft_dim) {
            (2 | 4, 8192) => WideClass::W8192,
            (4, 16384) => WideClass::W16384,
            _ => WideClass::Standard,
        }
    }
}

/// Everything kernel selection depends on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct KernelKey {
    pub role: AxisRole,
    pub first_pass: bool,
    pub direction: FftDirection,
    /// Pass packs or unpacks a real signal, only the main axis 0 does.
    pub real_to_complex: bool,
    /// Multiply fused into this pass.
    pub convolution: Option<ConvolutionShape>,
    pub wide: WideClass,
}

impl KernelKey {
    pub(crate) fn new(
        axis: AxisRef,
        upload: usize,
        direction: FftDirection,
        real_to_complex: bool,
        convolution: Option<ConvolutionShape>,
        wide: WideClass,
    ) -> KernelKey {
        KernelKey {
            role: axis.role(),
            first_pass: upload == 0,
            direction,
            real_to_complex: real_to_complex && !axis.support && axis.axis == 0,
            convolution,
            wide,
        }
    }
}

impl Display for KernelKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{:?} axis, first pass {}, {:?}, r2c {}, convolution {:?}, {:?}",
            self.role,
            self.first_pass,
            self.direction,
            self.real_to_complex,
            self.convolution,
            self.wide
        ))
    }
}

fn lookup(key: &KernelKey) -> Option<KernelVariant> {
    use AxisRole::{Contiguous, Strided};
    use FftDirection::{Forward, Inverse};
    use WideClass::{Standard, W16384, W8192};
    let variant = match (
        key.role,
        key.real_to_complex,
        key.convolution,
        key.direction,
        key.wide,
        key.first_pass,
    ) {
        (Contiguous, true, Some(_), _, _, _) => return None,
        (Contiguous, true, None, Inverse, Standard, _) => KernelVariant::SingleC2R,
        (Contiguous, true, None, Inverse, W8192, _) => KernelVariant::C2R8192,
        (Contiguous, true, None, Inverse, W16384, _) => KernelVariant::C2R16384,
        (Contiguous, true, None, Forward, Standard, _) => KernelVariant::SingleR2C,
        (Contiguous, true, None, Forward, W8192, _) => KernelVariant::R2C8192,
        (Contiguous, true, None, Forward, W16384, _) => KernelVariant::R2C16384,
        (Contiguous, false, Some(shape), _, _, _) => KernelVariant::SingleConvolution(shape),
        (Contiguous, false, None, _, W8192, _) => KernelVariant::C2C8192,
        (Contiguous, false, None, _, W16384, _) => KernelVariant::C2C16384,
        (Contiguous, false, None, _, Standard, true) => KernelVariant::SingleC2C,
        (Contiguous, false, None, _, Standard, false) => KernelVariant::SingleC2CStrided,
        (Strided, false, Some(shape), _, _, _) => KernelVariant::GroupedConvolution(shape),
        (Strided, false, None, _, _, _) => KernelVariant::GroupedC2C,
        (Strided, true, _, _, _, _) => return None,
    };
    Some(variant)
}

/// Picks the precompiled kernel for a pass, an unmatched key cannot be planned.
pub fn select_kernel(key: &KernelKey) -> Result<KernelVariant, GpuFftError> {
    lookup(key).ok_or_else(|| GpuFftError::NoKernelVariant(key.to_string()))
}
