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
use crate::axis::AxisRole;
use crate::util::log2;

/// Length handled by the first pass of a contiguous axis without register boost.
pub(crate) const FIRST_CHUNK: usize = 4096;
/// Base length of every continuation pass.
pub(crate) const CONTINUE_CHUNK: usize = 256;
/// Passes a single axis may be split into.
pub const MAX_AXIS_PASSES: usize = 5;

/// Outcome of the pass count search for one axis.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub(crate) struct PassSearch {
    pub(crate) passes: usize,
    /// Register boost step, the first chunk is `FIRST_CHUNK << register_step`.
    pub(crate) register_step: u32,
    /// Shared memory step, continuation chunks are `CONTINUE_CHUNK << budget_step`.
    pub(crate) budget_step: u32,
    pub(crate) min_budget_step: u32,
}

/// Range of shared memory steps available for the given transaction width.
pub(crate) fn budget_steps(coalesced_memory: usize) -> (u32, u32) {
    let max_single_size = 8 * 4096 / coalesced_memory;
    let min = if max_single_size >= 512 { 1 } else { 0 };
    let max = log2(max_single_size / CONTINUE_CHUNK);
    (min, max.max(min))
}

fn contiguous_pass_count(length: usize, first_chunk: usize, continue_chunk: usize) -> usize {
    let mut remaining = length / first_chunk;
    let mut passes = 1;
    while remaining > 1 {
        remaining /= continue_chunk;
        passes += 1;
    }
    passes
}

fn strided_pass_count(length: usize, chunk: usize) -> usize {
    let mut remaining = length;
    let mut passes = 0;
    while remaining > 1 {
        remaining /= chunk;
        passes += 1;
    }
    passes
}

/// Searches the register boost and shared memory grid for the fewest passes.
/// Ties keep the first candidate in (register step, budget step) order.
pub(crate) fn search_contiguous(
    length: usize,
    register_boost: usize,
    coalesced_memory: usize,
) -> PassSearch {
    let max_register_step = log2(register_boost);
    let (min_budget, max_budget) = budget_steps(coalesced_memory);
    let mut best = PassSearch {
        passes: contiguous_pass_count(length, FIRST_CHUNK, CONTINUE_CHUNK << min_budget),
        register_step: 0,
        budget_step: min_budget,
        min_budget_step: min_budget,
    };
    for i in 0..=max_register_step {
        for j in min_budget..=max_budget {
            let passes = contiguous_pass_count(length, FIRST_CHUNK << i, CONTINUE_CHUNK << j);
            if passes < best.passes {
                best = PassSearch {
                    passes,
                    register_step: i,
                    budget_step: j,
                    min_budget_step: min_budget,
                };
            }
        }
    }
    best
}

/// One dimensional search over the shared memory steps of a strided axis.
pub(crate) fn search_strided(length: usize, coalesced_memory: usize) -> PassSearch {
    let (min_budget, max_budget) = budget_steps(coalesced_memory);
    let mut best = PassSearch {
        passes: strided_pass_count(length, CONTINUE_CHUNK << min_budget),
        register_step: 0,
        budget_step: min_budget,
        min_budget_step: min_budget,
    };
    for j in min_budget..=max_budget {
        let passes = strided_pass_count(length, CONTINUE_CHUNK << j);
        if passes < best.passes {
            best.passes = passes;
            best.budget_step = j;
        }
    }
    best
}

pub(crate) fn search(
    role: AxisRole,
    length: usize,
    register_boost: usize,
    coalesced_memory: usize,
) -> PassSearch {
    match role {
        AxisRole::Contiguous => search_contiguous(length, register_boost, coalesced_memory),
        AxisRole::Strided => search_strided(length, coalesced_memory),
    }
}
