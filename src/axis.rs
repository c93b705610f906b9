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
use std::fmt::{Display, Formatter};

/// Memory access pattern of an axis.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum AxisRole {
    /// Elements of one transform are adjacent in memory.
    Contiguous,
    /// Elements of one transform are a stride apart.
    Strided,
}

/// One transformed axis, either a main axis or the support axis of a real-to-complex transform.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct AxisRef {
    pub axis: usize,
    pub support: bool,
}

impl AxisRef {
    pub const fn main(axis: usize) -> AxisRef {
        AxisRef {
            axis,
            support: false,
        }
    }

    pub const fn support(axis: usize) -> AxisRef {
        AxisRef {
            axis,
            support: true,
        }
    }

    /// Support axis 1 walks a contiguous column set, support axis 2 a strided one.
    pub fn role(self) -> AxisRole {
        match (self.support, self.axis) {
            (false, 0) | (true, 1) => AxisRole::Contiguous,
            _ => AxisRole::Strided,
        }
    }
}

impl Display for AxisRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.support {
            f.write_fmt(format_args!("support axis {}", self.axis))
        } else {
            f.write_fmt(format_args!("axis {}", self.axis))
        }
    }
}
