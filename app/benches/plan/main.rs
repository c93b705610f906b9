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
use criterion::{Criterion, criterion_group, criterion_main};
use gpufft::{FftConfiguration, GpuFft};
use std::hint::black_box;

pub fn bench_plan_sizes(c: &mut Criterion) {
    c.bench_function("plan 1d 2^8..2^24", |b| {
        b.iter(|| {
            for log in 8..=24u32 {
                let config = FftConfiguration::new([1 << log, 1, 1], 1);
                black_box(GpuFft::build_plan(&config).unwrap());
            }
        })
    });
    c.bench_function("plan r2c 3d 512x512x256", |b| {
        let config = FftConfiguration::new([512, 512, 256], 3).with_real_to_complex(true);
        b.iter(|| black_box(GpuFft::build_plan(&config).unwrap()))
    });
    c.bench_function("plan convolution 2d 4096x4096", |b| {
        let config = FftConfiguration::new([4096, 4096, 1], 2)
            .with_convolution(3, true)
            .with_kernels(4);
        b.iter(|| black_box(GpuFft::build_plan(&config).unwrap()))
    });
}

criterion_group!(benches, bench_plan_sizes);
criterion_main!(benches);
