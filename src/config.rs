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
use crate::util::is_power_of_two;
use crate::{FftDirection, GpuFftError};

/// Bytes of one complex single precision element in device buffers.
pub const COMPLEX_ELEMENT_SIZE: u64 = 8;

/// Preferred butterfly radix of every stage.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum Radix {
    R2,
    R4,
    #[default]
    R8,
}

impl Radix {
    pub fn value(self) -> usize {
        match self {
            Radix::R2 => 2,
            Radix::R4 => 4,
            Radix::R8 => 8,
        }
    }
}

impl TryFrom<usize> for Radix {
    type Error = GpuFftError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Radix::R2),
            4 => Ok(Radix::R4),
            8 => Ok(Radix::R8),
            _ => Err(GpuFftError::InvalidRadix(value)),
        }
    }
}

/// How passes of the strided axes reach their data.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub enum TransposeStrategy {
    /// Every axis is read in place with strided access.
    #[default]
    NoTransposeStrided,
    /// Axes are transposed between passes. Layouts are computed, but recording is refused.
    ExplicitTranspose,
}

/// Caller supplied description of a transform. Immutable once a plan is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FftConfiguration {
    /// Logical length of each dimension, unused dimensions are 1.
    pub size: [usize; 3],
    /// Number of transformed dimensions, 1..=3.
    pub dimensions: usize,
    pub coordinate_features: usize,
    /// 1 for pointwise convolution, 2 or 3 for a 2x2 or 3x3 matrix convolution.
    pub matrix_convolution: usize,
    pub number_batches: usize,
    /// Number of convolution kernels one input is multiplied with.
    pub number_kernels: usize,
    pub radix: Radix,
    pub zero_padding: [bool; 3],
    pub convolution: bool,
    pub symmetric_kernel: bool,
    pub real_to_complex: bool,
    pub inverse: bool,
    /// Input buffer uses compact layout instead of the internal padded one.
    pub input_formatted: bool,
    /// Output buffer uses compact layout instead of the internal padded one.
    pub output_formatted: bool,
    pub register_boost: usize,
    pub coalesced_memory: usize,
    pub transpose: TransposeStrategy,
}

impl Default for FftConfiguration {
    fn default() -> Self {
        FftConfiguration {
            size: [1, 1, 1],
            dimensions: 1,
            coordinate_features: 1,
            matrix_convolution: 1,
            number_batches: 1,
            number_kernels: 1,
            radix: Radix::R8,
            zero_padding: [false; 3],
            convolution: false,
            symmetric_kernel: false,
            real_to_complex: false,
            inverse: false,
            input_formatted: false,
            output_formatted: false,
            register_boost: 1,
            coalesced_memory: 32,
            transpose: TransposeStrategy::NoTransposeStrided,
        }
    }
}

impl FftConfiguration {
    pub fn new(size: [usize; 3], dimensions: usize) -> FftConfiguration {
        FftConfiguration {
            size,
            dimensions,
            ..Default::default()
        }
    }

    pub fn with_radix(mut self, radix: Radix) -> Self {
        self.radix = radix;
        self
    }

    pub fn with_inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    pub fn with_real_to_complex(mut self, real_to_complex: bool) -> Self {
        self.real_to_complex = real_to_complex;
        self
    }

    /// Enables the fused convolution with the given matrix shape.
    pub fn with_convolution(mut self, matrix: usize, symmetric: bool) -> Self {
        self.convolution = true;
        self.matrix_convolution = matrix;
        self.symmetric_kernel = symmetric;
        self
    }

    pub fn with_kernels(mut self, number_kernels: usize) -> Self {
        self.number_kernels = number_kernels;
        self
    }

    pub fn with_batches(mut self, number_batches: usize) -> Self {
        self.number_batches = number_batches;
        self
    }

    pub fn with_coordinate_features(mut self, features: usize) -> Self {
        self.coordinate_features = features;
        self
    }

    pub fn with_zero_padding(mut self, zero_padding: [bool; 3]) -> Self {
        self.zero_padding = zero_padding;
        self
    }

    pub fn with_formatted(mut self, input: bool, output: bool) -> Self {
        self.input_formatted = input;
        self.output_formatted = output;
        self
    }

    pub fn with_register_boost(mut self, register_boost: usize) -> Self {
        self.register_boost = register_boost;
        self
    }

    pub fn with_coalesced_memory(mut self, coalesced_memory: usize) -> Self {
        self.coalesced_memory = coalesced_memory;
        self
    }

    pub fn with_transpose(mut self, transpose: TransposeStrategy) -> Self {
        self.transpose = transpose;
        self
    }

    pub fn validate(&self) -> Result<(), GpuFftError> {
        if !(1..=3).contains(&self.dimensions) {
            return Err(GpuFftError::InvalidDimensionality(self.dimensions));
        }
        for (axis, &length) in self.size.iter().enumerate() {
            if length == 0 {
                return Err(GpuFftError::ZeroSizedFft(axis));
            }
            if axis < self.dimensions && (length < 2 || !is_power_of_two(length)) {
                return Err(GpuFftError::InvalidAxisLength(axis, length));
            }
        }
        if !matches!(self.register_boost, 1 | 2 | 4) {
            return Err(GpuFftError::InvalidRegisterBoost(self.register_boost));
        }
        if !(8..=128).contains(&self.coalesced_memory) || !is_power_of_two(self.coalesced_memory)
        {
            return Err(GpuFftError::InvalidCoalescedMemory(self.coalesced_memory));
        }
        if !(1..=3).contains(&self.matrix_convolution) {
            return Err(GpuFftError::InvalidMatrixConvolution(
                self.matrix_convolution,
            ));
        }
        if self.coordinate_features == 0 {
            return Err(GpuFftError::ZeroCount("coordinate features"));
        }
        if self.number_batches == 0 {
            return Err(GpuFftError::ZeroCount("batches"));
        }
        if self.number_kernels == 0 {
            return Err(GpuFftError::ZeroCount("kernels"));
        }
        self.scratch_buffer_size()?;
        self.kernel_output_size()?;
        if self.convolution {
            self.kernel_buffer_size()?;
        }
        Ok(())
    }

    /// Direction of the main plan. A convolution always starts with a forward transform.
    pub fn main_direction(&self) -> FftDirection {
        if self.convolution || !self.inverse {
            FftDirection::Forward
        } else {
            FftDirection::Inverse
        }
    }

    /// Feature planes per element, a matrix convolution replaces the configured count.
    pub fn features(&self) -> usize {
        if self.matrix_convolution > 1 {
            self.matrix_convolution
        } else {
            self.coordinate_features
        }
    }

    /// Complex elements of one feature plane in the internal layout.
    pub fn plane_elements(&self) -> Result<usize, GpuFftError> {
        let columns = if self.real_to_complex {
            self.size[0] / 2 + 1
        } else {
            self.size[0]
        };
        columns
            .checked_mul(self.size[1])
            .and_then(|x| x.checked_mul(self.size[2]))
            .ok_or(GpuFftError::SizeOverflow("feature plane"))
    }

    /// Kernel components stored per element. Symmetric matrices keep one triangle.
    pub fn kernel_components(&self) -> usize {
        match (self.matrix_convolution, self.symmetric_kernel) {
            (1, _) => self.coordinate_features,
            (m, true) => m * (m + 1) / 2,
            (m, false) => m * m,
        }
    }

    /// Bytes of `count` buffers holding `components` planes of `plane` elements each.
    pub(crate) fn buffer_bytes(
        &self,
        what: &'static str,
        plane: usize,
        components: usize,
        count: usize,
    ) -> Result<u64, GpuFftError> {
        plane
            .checked_mul(components)
            .and_then(|x| x.checked_mul(count))
            .and_then(|x| u64::try_from(x).ok())
            .and_then(|x| x.checked_mul(COMPLEX_ELEMENT_SIZE))
            .ok_or(GpuFftError::SizeOverflow(what))
    }

    pub fn scratch_buffer_size(&self) -> Result<u64, GpuFftError> {
        self.buffer_bytes(
            "scratch buffer",
            self.plane_elements()?,
            self.features(),
            self.number_batches,
        )
    }

    /// Size the output buffer must have when it carries one result per kernel.
    pub fn kernel_output_size(&self) -> Result<u64, GpuFftError> {
        self.buffer_bytes(
            "kernel output",
            self.plane_elements()?,
            self.features(),
            self.number_kernels,
        )
    }

    /// Size of the frequency domain convolution kernels.
    pub fn kernel_buffer_size(&self) -> Result<u64, GpuFftError> {
        self.buffer_bytes(
            "kernel buffer",
            self.plane_elements()?,
            self.kernel_components(),
            self.number_kernels,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = FftConfiguration::new([1024, 1, 1], 1);
        assert!(config.validate().is_ok());
        assert_eq!(config.radix, Radix::R8);
        assert_eq!(config.coalesced_memory, 32);
        assert_eq!(config.main_direction(), FftDirection::Forward);
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(matches!(
            FftConfiguration::new([0, 1, 1], 1).validate(),
            Err(GpuFftError::ZeroSizedFft(0))
        ));
        assert!(matches!(
            FftConfiguration::new([64, 96, 1], 2).validate(),
            Err(GpuFftError::InvalidAxisLength(1, 96))
        ));
        assert!(matches!(
            FftConfiguration::new([1, 1, 1], 1).validate(),
            Err(GpuFftError::InvalidAxisLength(0, 1))
        ));
        assert!(matches!(
            FftConfiguration::new([64, 1, 1], 4).validate(),
            Err(GpuFftError::InvalidDimensionality(4))
        ));
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let base = FftConfiguration::new([64, 1, 1], 1);
        assert!(matches!(
            base.clone().with_register_boost(3).validate(),
            Err(GpuFftError::InvalidRegisterBoost(3))
        ));
        assert!(matches!(
            base.clone().with_coalesced_memory(48).validate(),
            Err(GpuFftError::InvalidCoalescedMemory(48))
        ));
        assert!(matches!(
            base.clone().with_convolution(4, false).validate(),
            Err(GpuFftError::InvalidMatrixConvolution(4))
        ));
        assert!(matches!(
            base.with_kernels(0).validate(),
            Err(GpuFftError::ZeroCount("kernels"))
        ));
    }

    #[test]
    fn test_radix_try_from() {
        assert_eq!(Radix::try_from(4).map(Radix::value).ok(), Some(4));
        assert!(Radix::try_from(3).is_err());
    }

    #[test]
    fn test_matrix_convolution_overrides_features() {
        let config = FftConfiguration::new([64, 64, 1], 2)
            .with_coordinate_features(5)
            .with_convolution(3, true);
        assert_eq!(config.features(), 3);
        assert_eq!(config.main_direction(), FftDirection::Forward);
    }

    #[test]
    fn test_buffer_sizes() {
        let config = FftConfiguration::new([64, 8, 1], 2)
            .with_real_to_complex(true)
            .with_batches(2);
        assert_eq!(config.plane_elements().unwrap(), 33 * 8);
        assert_eq!(config.scratch_buffer_size().unwrap(), 33 * 8 * 2 * 8);
        assert_eq!(config.kernel_output_size().unwrap(), 33 * 8 * 8);
    }

    #[test]
    fn test_kernel_buffer_size() {
        let config = FftConfiguration::new([64, 1, 1], 1)
            .with_convolution(1, false)
            .with_kernels(3);
        assert_eq!(config.kernel_buffer_size().unwrap(), 64 * 3 * 8);
        let symmetric = FftConfiguration::new([64, 1, 1], 1).with_convolution(3, true);
        assert_eq!(symmetric.kernel_components(), 6);
        assert_eq!(symmetric.kernel_buffer_size().unwrap(), 64 * 6 * 8);
        let full = FftConfiguration::new([64, 1, 1], 1).with_convolution(2, false);
        assert_eq!(full.kernel_components(), 4);
    }

    #[test]
    fn test_huge_volume_is_rejected() {
        let config = FftConfiguration::new([1 << 30, 1 << 30, 1 << 30], 3);
        assert!(matches!(
            config.validate(),
            Err(GpuFftError::SizeOverflow("feature plane"))
        ));
        let config = FftConfiguration::new([1024, 1, 1], 1).with_batches(usize::MAX / 2);
        assert!(matches!(
            config.scratch_buffer_size(),
            Err(GpuFftError::SizeOverflow("scratch buffer"))
        ));
        assert!(config.validate().is_err());
        let config = FftConfiguration::new([1024, 1, 1], 1)
            .with_convolution(1, false)
            .with_kernels(usize::MAX / 4);
        assert!(matches!(
            config.kernel_output_size(),
            Err(GpuFftError::SizeOverflow("kernel output"))
        ));
    }
}
