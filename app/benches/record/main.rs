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
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use gpufft::{FftConfiguration, GpuFft};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

pub fn bench_record(c: &mut Criterion) {
    c.bench_function("record batched 2d", |b| {
        let config = FftConfiguration::new([8192, 1024, 1], 2)
            .with_batches(64)
            .with_coordinate_features(3);
        let plans = GpuFft::build_plan(&config).unwrap();
        b.iter(|| black_box(GpuFft::record(&plans).unwrap()))
    });
    c.bench_function("record random", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(7);
                (0..64)
                    .map(|_| {
                        let size = [
                            1 << rng.random_range(3..=13u32),
                            1 << rng.random_range(3..=10u32),
                            1,
                        ];
                        let config = FftConfiguration::new(size, 2)
                            .with_real_to_complex(rng.random_bool(0.5))
                            .with_batches(rng.random_range(1..=8));
                        GpuFft::build_plan(&config).unwrap()
                    })
                    .collect::<Vec<_>>()
            },
            |plans| {
                for plan in plans.iter() {
                    black_box(GpuFft::record(plan).unwrap());
                }
            },
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(benches, bench_record);
criterion_main!(benches);
