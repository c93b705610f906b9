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
use crate::config::Radix;
use crate::pass_search::PassSearch;

/// Butterfly stages executed inside one pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StageFactorization {
    /// Transform length handled per workgroup, `2^bits`.
    pub fft_dim: usize,
    pub num_stages: u32,
    /// Radix of the regular stages and radix of the final stage.
    pub stage_radix: [u32; 2],
}

/// Splits `bits` into radix stages, folding a remainder into one smaller final stage.
pub(crate) fn factorize(bits: u32, radix: Radix) -> StageFactorization {
    let (num_stages, stage_radix) = match radix {
        Radix::R8 => {
            let remainder = bits % 3;
            let tail = match remainder {
                2 => 4,
                1 => 2,
                _ => 8,
            };
            (bits / 3 + u32::from(remainder > 0), [8, tail])
        }
        Radix::R4 => {
            let odd = bits % 2 == 1;
            (bits / 2 + u32::from(odd), [4, if odd { 2 } else { 4 }])
        }
        Radix::R2 => (bits, [2, 2]),
    };
    StageFactorization {
        fft_dim: 1 << bits,
        num_stages,
        stage_radix,
    }
}

/// Splits `stages` radix-8 stages over `passes` passes, earlier passes take the extra ones.
fn even_split(stages: u32, passes: usize, remainder_bits: u32) -> Vec<u32> {
    let n = passes as u32;
    (0..n)
        .map(|k| {
            let local = stages / n + u32::from(k < stages % n);
            3 * local + if k == n - 1 { remainder_bits } else { 0 }
        })
        .collect()
}

/// Every pass but the last gets `chunk_bits`, the last takes the rest but never drops
/// below a radix-8 stage, borrowing from the second to last pass.
fn chunked_split(total_bits: u32, passes: usize, chunk_bits: u32) -> Vec<u32> {
    let n = passes as i64;
    let chunk = chunk_bits as i64;
    let last = total_bits as i64 - chunk * (n - 1);
    (0..n)
        .map(|k| {
            if k < n - 1 {
                if k + 1 == n - 1 && last < 3 {
                    (chunk - (3 - last)) as u32
                } else {
                    chunk as u32
                }
            } else {
                last.max(3) as u32
            }
        })
        .collect()
}

/// Splits `total_bits` evenly over `passes`, earlier passes take the extra bits.
fn plain_split(total_bits: u32, passes: usize) -> Vec<u32> {
    let n = passes as u32;
    (0..n)
        .map(|k| total_bits / n + u32::from(k < total_bits % n))
        .collect()
}

/// Bit budget of each pass of a contiguous axis, indexed by pass.
///
/// Radix 4 and 2 passes have no stage length minimum and never borrow across passes.
pub(crate) fn contiguous_pass_bits(
    log_size: u32,
    search: &PassSearch,
    radix: Radix,
) -> Vec<u32> {
    if search.passes <= 1 {
        return vec![log_size];
    }
    let first_limit = 12 + search.register_step;
    let mut first = first_limit.min(log_size);
    if radix != Radix::R8 {
        let mut bits = Vec::with_capacity(search.passes);
        bits.push(first);
        bits.extend(plain_split(log_size - first, search.passes - 1));
        return bits;
    }
    let tail = log_size - first;
    if search.passes == 2 && tail < 3 {
        first -= 3 - tail;
    }
    let later_bits = log_size.saturating_sub(first_limit).max(3);
    let later = if search.budget_step == search.min_budget_step {
        even_split(later_bits / 3, search.passes - 1, later_bits % 3)
    } else {
        chunked_split(later_bits, search.passes - 1, 8 + search.budget_step)
    };
    let mut bits = Vec::with_capacity(search.passes);
    bits.push(first);
    bits.extend(later);
    bits
}

/// Bit budget of each pass of a strided axis, indexed by pass.
pub(crate) fn strided_pass_bits(
    log_size: u32,
    search: &PassSearch,
    radix: Radix,
) -> Vec<u32> {
    if radix != Radix::R8 {
        plain_split(log_size, search.passes)
    } else if search.budget_step == search.min_budget_step {
        even_split(log_size / 3, search.passes, log_size % 3)
    } else {
        chunked_split(log_size, search.passes, 8 + search.budget_step)
    }
}
