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
use crate::binding::BufferRole;
use std::error::Error;
use std::fmt::Formatter;

/// Coarse classification of [`GpuFftError`].
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The configuration cannot be planned. Fix it and rebuild.
    Config,
    /// The compute backend refused to create an object, or host memory ran out.
    Resource,
    /// Recording was requested on a plan that no longer owns its resources.
    Recording,
}

#[derive(Clone, Debug)]
pub enum GpuFftError {
    OutOfMemory(usize),
    InvalidDimensionality(usize),
    ZeroSizedFft(usize),
    InvalidAxisLength(usize, usize),
    InvalidRadix(usize),
    InvalidRegisterBoost(usize),
    InvalidCoalescedMemory(usize),
    InvalidMatrixConvolution(usize),
    ZeroCount(&'static str),
    TooManyPasses(usize, usize),
    InconsistentFactorization(usize, usize),
    NoKernelVariant(String),
    MissingStage(usize, usize),
    ZeroWorkgroupCount(usize, usize),
    ValueOverflow(&'static str, usize),
    SizeOverflow(&'static str),
    MissingBuffer(BufferRole),
    BufferTooSmall(BufferRole, u64, u64),
    UnvalidatedTransposeStrategy,
    Backend(String),
    PlanDestroyed,
}

impl GpuFftError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GpuFftError::OutOfMemory(_) | GpuFftError::Backend(_) => ErrorKind::Resource,
            GpuFftError::PlanDestroyed => ErrorKind::Recording,
            _ => ErrorKind::Config,
        }
    }
}

impl Error for GpuFftError {}

impl std::fmt::Display for GpuFftError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GpuFftError::OutOfMemory(length) => {
                f.write_fmt(format_args!("Cannot allocate {length} bytes to vector",))
            }
            GpuFftError::InvalidDimensionality(dims) => f.write_fmt(format_args!(
                "FFT dimensionality must be in 1..=3, but it was {dims}"
            )),
            GpuFftError::ZeroSizedFft(axis) => {
                f.write_fmt(format_args!("Axis {axis} has zero length"))
            }
            GpuFftError::InvalidAxisLength(axis, length) => f.write_fmt(format_args!(
                "Axis {axis} length {length} is not a power of two greater than one"
            )),
            GpuFftError::InvalidRadix(radix) => f.write_fmt(format_args!(
                "Radix {radix} is not supported, expected 2, 4 or 8"
            )),
            GpuFftError::InvalidRegisterBoost(boost) => f.write_fmt(format_args!(
                "Register boost {boost} is not supported, expected 1, 2 or 4"
            )),
            GpuFftError::InvalidCoalescedMemory(width) => f.write_fmt(format_args!(
                "Coalesced memory width {width} must be a power of two in 8..=128"
            )),
            GpuFftError::InvalidMatrixConvolution(shape) => f.write_fmt(format_args!(
                "Matrix convolution {shape} is not supported, expected 1, 2 or 3"
            )),
            GpuFftError::ZeroCount(what) => {
                f.write_fmt(format_args!("Number of {what} must be at least one"))
            }
            GpuFftError::TooManyPasses(axis, passes) => f.write_fmt(format_args!(
                "Axis {axis} requires {passes} passes, at most 5 are supported"
            )),
            GpuFftError::InconsistentFactorization(axis, product) => f.write_fmt(format_args!(
                "Passes of axis {axis} cover length {product} which differs from the axis length"
            )),
            GpuFftError::NoKernelVariant(key) => {
                f.write_fmt(format_args!("No precompiled kernel matches {key}"))
            }
            GpuFftError::MissingStage(axis, pass) => f.write_fmt(format_args!(
                "Schedule refers to pass {pass} of axis {axis} which was not planned"
            )),
            GpuFftError::ZeroWorkgroupCount(axis, pass) => f.write_fmt(format_args!(
                "Pass {pass} of axis {axis} computes a zero workgroup count"
            )),
            GpuFftError::ValueOverflow(what, value) => f.write_fmt(format_args!(
                "Value {value} of {what} does not fit into 32 bits"
            )),
            GpuFftError::SizeOverflow(what) => {
                f.write_fmt(format_args!("Size of {what} overflows the addressable range"))
            }
            GpuFftError::MissingBuffer(role) => {
                f.write_fmt(format_args!("Plan binds the {role} buffer, but none was given"))
            }
            GpuFftError::BufferTooSmall(role, current, required) => f.write_fmt(format_args!(
                "{role} buffer size must be at least {required} but it is {current}"
            )),
            GpuFftError::UnvalidatedTransposeStrategy => f.write_str(
                "Explicit transpose strategy cannot be recorded, use the strided strategy",
            ),
            GpuFftError::Backend(message) => {
                f.write_fmt(format_args!("Compute backend failure: {message}"))
            }
            GpuFftError::PlanDestroyed => f.write_str("Cannot execute destroyed FFT plan"),
        }
    }
}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::err::GpuFftError::OutOfMemory($n))?;
        v
    }};
}

pub(crate) use try_vec;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(GpuFftError::PlanDestroyed.kind(), ErrorKind::Recording);
        assert_eq!(
            GpuFftError::Backend("lost device".to_string()).kind(),
            ErrorKind::Resource
        );
        assert_eq!(GpuFftError::OutOfMemory(16).kind(), ErrorKind::Resource);
        assert_eq!(GpuFftError::ZeroWorkgroupCount(0, 1).kind(), ErrorKind::Config);
        assert_eq!(
            GpuFftError::MissingBuffer(BufferRole::Kernel).kind(),
            ErrorKind::Config
        );
    }

    #[test]
    fn test_display_mentions_role() {
        let msg = GpuFftError::BufferTooSmall(BufferRole::Scratch, 8, 64).to_string();
        assert!(msg.contains("scratch"));
        assert!(msg.contains("64"));
    }
}
