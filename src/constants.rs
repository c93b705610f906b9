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
use bytemuck::{Pod, Zeroable};

/// Words in the specialization block handed to every pipeline.
pub const SPECIALIZATION_WORDS: usize = 30;

/// Compile time constants of one pass, laid out in the order kernels read them.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct SpecializationConstants {
    pub local_size: [u32; 3],
    pub fft_dim: u32,
    pub inverse: u32,
    pub zero_pad: [u32; 2],
    pub input_stride: [u32; 5],
    pub output_stride: [u32; 5],
    pub fft_dim_full: u32,
    pub stage_start_size: u32,
    pub fft_dim_x: u32,
    pub num_stages: u32,
    pub stage_radix: [u32; 2],
    pub ratio: [u32; 2],
    pub ratio_direction: [u32; 2],
    pub input_offset: u32,
    pub output_offset: u32,
    pub pass_id: u32,
}

impl SpecializationConstants {
    pub fn as_words(&self) -> &[u32; SPECIALIZATION_WORDS] {
        bytemuck::cast_ref(self)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Per dispatch constants, pushed right before each dispatch.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct PushConstants {
    pub coordinate: u32,
    pub batch: u32,
}

impl PushConstants {
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_sizes() {
        assert_eq!(size_of::<SpecializationConstants>(), SPECIALIZATION_WORDS * 4);
        assert_eq!(size_of::<PushConstants>(), 8);
    }

    #[test]
    fn test_word_order() {
        let constants = SpecializationConstants {
            local_size: [1, 2, 3],
            fft_dim: 4,
            inverse: 5,
            zero_pad: [6, 7],
            input_stride: [8, 9, 10, 11, 12],
            output_stride: [13, 14, 15, 16, 17],
            fft_dim_full: 18,
            stage_start_size: 19,
            fft_dim_x: 20,
            num_stages: 21,
            stage_radix: [22, 23],
            ratio: [24, 25],
            ratio_direction: [26, 27],
            input_offset: 28,
            output_offset: 29,
            pass_id: 30,
        };
        let words = constants.as_words();
        for (index, &word) in words.iter().enumerate() {
            assert_eq!(word, index as u32 + 1);
        }
        assert_eq!(constants.as_bytes().len(), 120);
    }

    #[test]
    fn test_push_constant_bytes() {
        let push = PushConstants {
            coordinate: 1,
            batch: 2,
        };
        let words: &[u32] = bytemuck::cast_slice(push.as_bytes());
        assert_eq!(words, &[1, 2]);
    }
}
