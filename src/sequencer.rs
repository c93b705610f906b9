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
use crate::config::FftConfiguration;
use crate::constants::PushConstants;
use crate::err::try_vec;
use crate::plan::{PlanKind, PlanSet, StageKey};
use crate::util::to_u32;
use crate::{FftDirection, GpuFftError};

/// Outermost loop of a segment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum OuterLoop {
    /// One iteration per batch, the batch index is pushed.
    Batches {
        count: usize,
        /// A matrix convolution handles every feature in one dispatch.
        collapse_features: bool,
    },
    /// One iteration per convolution kernel, the kernel index is pushed.
    Kernels(usize),
    /// The convolution axis of the forward half, dispatched once.
    Convolution { kernels: usize, matrix: bool },
}

/// Consecutive passes of one axis sharing an outer loop.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Segment {
    pub plan: PlanKind,
    pub axis: AxisRef,
    /// Pass indices in dispatch order.
    pub uploads: Vec<usize>,
    pub outer: OuterLoop,
}

/// Bind of one stage followed by one dispatch per coordinate.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DispatchGroup {
    pub stage: StageKey,
    pub batch: usize,
    pub coordinates: usize,
}

impl Segment {
    fn stage(&self, upload: usize) -> StageKey {
        StageKey {
            plan: self.plan,
            axis: self.axis,
            upload,
        }
    }

    pub fn groups(&self, features: usize) -> Vec<DispatchGroup> {
        let mut groups = Vec::new();
        match self.outer {
            OuterLoop::Batches {
                count,
                collapse_features,
            } => {
                let coordinates = if collapse_features { 1 } else { features };
                for batch in 0..count {
                    for &upload in &self.uploads {
                        groups.push(DispatchGroup {
                            stage: self.stage(upload),
                            batch,
                            coordinates,
                        });
                    }
                }
            }
            OuterLoop::Kernels(count) => {
                for batch in 0..count {
                    for &upload in &self.uploads {
                        groups.push(DispatchGroup {
                            stage: self.stage(upload),
                            batch,
                            coordinates: features,
                        });
                    }
                }
            }
            OuterLoop::Convolution { kernels, matrix } => {
                for &upload in &self.uploads {
                    let fused = upload == 0;
                    groups.push(DispatchGroup {
                        stage: self.stage(upload),
                        batch: if fused && !matrix { kernels } else { 0 },
                        coordinates: if fused && matrix { 1 } else { features },
                    });
                }
            }
        }
        groups
    }
}

fn push_segment(
    segments: &mut Vec<Segment>,
    plan: PlanKind,
    axis: AxisRef,
    uploads: Vec<usize>,
    outer: OuterLoop,
) {
    if !uploads.is_empty() {
        segments.push(Segment {
            plan,
            axis,
            uploads,
            outer,
        });
    }
}

fn descending(passes: usize) -> Vec<usize> {
    (0..passes).rev().collect()
}

/// Orders every dispatched pass: forward axes ascending, inverse axes descending,
/// support axes ahead of their main axis, passes within an axis from the last to the first.
pub(crate) fn schedule(
    config: &FftConfiguration,
    passes: impl Fn(AxisRef) -> usize,
) -> Vec<Segment> {
    let dims = config.dimensions;
    let with_support = config.real_to_complex && dims > 1;
    let matrix = config.matrix_convolution > 1;
    let mut segments = Vec::new();

    match config.main_direction() {
        FftDirection::Forward => {
            for axis in 0..dims {
                let outer = if config.convolution && dims > 1 && axis == dims - 1 {
                    OuterLoop::Convolution {
                        kernels: config.number_kernels,
                        matrix,
                    }
                } else {
                    OuterLoop::Batches {
                        count: config.number_batches,
                        collapse_features: axis == 0 && config.convolution && dims == 1 && matrix,
                    }
                };
                if with_support && axis > 0 {
                    let support = AxisRef::support(axis);
                    let order = descending(passes(support));
                    push_segment(&mut segments, PlanKind::Main, support, order, outer);
                }
                let main = AxisRef::main(axis);
                let order = descending(passes(main));
                push_segment(&mut segments, PlanKind::Main, main, order, outer);
            }
        }
        FftDirection::Inverse => {
            let outer = OuterLoop::Batches {
                count: config.number_batches,
                collapse_features: false,
            };
            for axis in (0..dims).rev() {
                if with_support && axis > 0 {
                    let support = AxisRef::support(axis);
                    let order = descending(passes(support));
                    push_segment(&mut segments, PlanKind::Main, support, order, outer);
                }
                let main = AxisRef::main(axis);
                let order = descending(passes(main));
                push_segment(&mut segments, PlanKind::Main, main, order, outer);
            }
        }
    }

    if config.convolution {
        let outer = OuterLoop::Kernels(config.number_kernels);
        for axis in (0..dims).rev() {
            // Pass 0 of the convolution axis already ran fused with the multiply.
            let order = |n: usize| -> Vec<usize> {
                if axis == dims - 1 {
                    (1..n).collect()
                } else {
                    descending(n)
                }
            };
            if with_support && axis > 0 {
                let support = AxisRef::support(axis);
                let uploads = order(passes(support));
                push_segment(
                    &mut segments,
                    PlanKind::InverseConvolution,
                    support,
                    uploads,
                    outer,
                );
            }
            let main = AxisRef::main(axis);
            let uploads = order(passes(main));
            push_segment(
                &mut segments,
                PlanKind::InverseConvolution,
                main,
                uploads,
                outer,
            );
        }
    }
    segments
}

/// First and last main axis pass of the whole sequence.
pub(crate) fn boundaries(segments: &[Segment]) -> (Option<StageKey>, Option<StageKey>) {
    let mut main_axes = segments.iter().filter(|s| !s.axis.support);
    let entry = main_axes
        .next()
        .and_then(|s| s.uploads.first().map(|&u| s.stage(u)));
    let exit = segments
        .iter()
        .rev()
        .find(|s| !s.axis.support)
        .and_then(|s| s.uploads.last().map(|&u| s.stage(u)));
    (entry, exit)
}

/// One recorded operation of the dispatch stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Command {
    /// Bind pipeline and binding set of a stage.
    Bind(StageKey),
    PushConstants(PushConstants),
    Dispatch([u32; 3]),
    /// Compute write to compute read barrier.
    Barrier,
}

/// Flattens the schedule of a plan set into the complete command stream.
pub fn record(plans: &PlanSet) -> Result<Vec<Command>, GpuFftError> {
    let features = plans.configuration().features();
    let groups: Vec<DispatchGroup> = plans
        .schedule()
        .iter()
        .flat_map(|segment| segment.groups(features))
        .collect();
    let total = groups
        .iter()
        .map(|g| 2 + 2 * g.coordinates)
        .sum::<usize>();
    let mut commands: Vec<Command> = try_vec!(total);

    for (index, group) in groups.iter().enumerate() {
        let stage = plans
            .stage(&group.stage)
            .ok_or(GpuFftError::MissingStage(group.stage.axis.axis, group.stage.upload))?;
        let batch = to_u32("batch index", group.batch)?;
        commands.push(Command::Bind(group.stage));
        for coordinate in 0..group.coordinates {
            commands.push(Command::PushConstants(PushConstants {
                coordinate: to_u32("coordinate index", coordinate)?,
                batch,
            }));
            commands.push(Command::Dispatch(stage.dispatch));
        }
        if index + 1 < groups.len() {
            commands.push(Command::Barrier);
        }
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::build_plan;

    fn axes(segments: &[Segment]) -> Vec<(PlanKind, AxisRef, Vec<usize>)> {
        segments
            .iter()
            .map(|s| (s.plan, s.axis, s.uploads.clone()))
            .collect()
    }

    #[test]
    fn test_forward_r2c_order() {
        let config = FftConfiguration::new([64, 32, 16], 3).with_real_to_complex(true);
        let segments = schedule(&config, |_| 2);
        assert_eq!(
            axes(&segments),
            vec![
                (PlanKind::Main, AxisRef::main(0), vec![1, 0]),
                (PlanKind::Main, AxisRef::support(1), vec![1, 0]),
                (PlanKind::Main, AxisRef::main(1), vec![1, 0]),
                (PlanKind::Main, AxisRef::support(2), vec![1, 0]),
                (PlanKind::Main, AxisRef::main(2), vec![1, 0]),
            ]
        );
    }

    #[test]
    fn test_inverse_order() {
        let config = FftConfiguration::new([64, 32, 1], 2)
            .with_real_to_complex(true)
            .with_inverse(true);
        let segments = schedule(&config, |_| 1);
        assert_eq!(
            axes(&segments),
            vec![
                (PlanKind::Main, AxisRef::support(1), vec![0]),
                (PlanKind::Main, AxisRef::main(1), vec![0]),
                (PlanKind::Main, AxisRef::main(0), vec![0]),
            ]
        );
        let (entry, exit) = boundaries(&segments);
        assert_eq!(entry.map(|k| k.axis), Some(AxisRef::main(1)));
        assert_eq!(exit.map(|k| k.axis), Some(AxisRef::main(0)));
    }

    #[test]
    fn test_convolution_order() {
        let config = FftConfiguration::new([64, 32, 1], 2)
            .with_convolution(1, false)
            .with_kernels(3)
            .with_inverse(true);
        let segments = schedule(&config, |_| 3);
        assert_eq!(
            axes(&segments),
            vec![
                (PlanKind::Main, AxisRef::main(0), vec![2, 1, 0]),
                (PlanKind::Main, AxisRef::main(1), vec![2, 1, 0]),
                (PlanKind::InverseConvolution, AxisRef::main(1), vec![1, 2]),
                (PlanKind::InverseConvolution, AxisRef::main(0), vec![2, 1, 0]),
            ]
        );
        assert_eq!(
            segments[1].outer,
            OuterLoop::Convolution {
                kernels: 3,
                matrix: false
            }
        );
        assert_eq!(segments[2].outer, OuterLoop::Kernels(3));
        let (entry, exit) = boundaries(&segments);
        assert_eq!(
            exit,
            Some(StageKey {
                plan: PlanKind::InverseConvolution,
                axis: AxisRef::main(0),
                upload: 0
            })
        );
        assert_eq!(entry.map(|k| k.upload), Some(2));
    }

    #[test]
    fn test_single_pass_convolution_skips_inverse_axis() {
        let config = FftConfiguration::new([256, 1, 1], 1).with_convolution(1, false);
        let segments = schedule(&config, |_| 1);
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].outer,
            OuterLoop::Batches {
                count: 1,
                collapse_features: false
            }
        );
    }

    #[test]
    fn test_group_loops() {
        let segment = Segment {
            plan: PlanKind::Main,
            axis: AxisRef::main(1),
            uploads: vec![1, 0],
            outer: OuterLoop::Convolution {
                kernels: 4,
                matrix: false,
            },
        };
        let groups = segment.groups(2);
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[0].batch, groups[0].coordinates), (0, 2));
        assert_eq!((groups[1].batch, groups[1].coordinates), (4, 2));

        let segment = Segment {
            outer: OuterLoop::Convolution {
                kernels: 4,
                matrix: true,
            },
            ..segment
        };
        let groups = segment.groups(3);
        assert_eq!((groups[1].batch, groups[1].coordinates), (0, 1));

        let segment = Segment {
            outer: OuterLoop::Batches {
                count: 2,
                collapse_features: false,
            },
            ..segment
        };
        let groups = segment.groups(3);
        let batches: Vec<(usize, usize)> =
            groups.iter().map(|g| (g.batch, g.stage.upload)).collect();
        assert_eq!(batches, vec![(0, 1), (0, 0), (1, 1), (1, 0)]);
    }

    #[test]
    fn test_record_barriers_between_groups() {
        let config = FftConfiguration::new([8192, 1, 1], 1)
            .with_batches(2)
            .with_coordinate_features(2);
        let plans = build_plan(&config).unwrap();
        let commands = record(&plans).unwrap();
        let binds = commands.iter().filter(|c| matches!(c, Command::Bind(_))).count();
        let dispatches = commands
            .iter()
            .filter(|c| matches!(c, Command::Dispatch(_)))
            .count();
        let barriers = commands.iter().filter(|c| **c == Command::Barrier).count();
        assert_eq!(binds, 4);
        assert_eq!(dispatches, 8);
        assert_eq!(barriers, 3);
        assert_ne!(commands.last(), Some(&Command::Barrier));
        assert_eq!(
            commands[1],
            Command::PushConstants(PushConstants {
                coordinate: 0,
                batch: 0
            })
        );
        match commands[0] {
            Command::Bind(key) => assert_eq!(key.upload, 1),
            _ => panic!("stream must start with a bind"),
        }
    }

    #[test]
    fn test_record_is_deterministic() {
        let config = FftConfiguration::new([512, 128, 8], 3)
            .with_real_to_complex(true)
            .with_convolution(2, false)
            .with_kernels(2);
        let plans = build_plan(&config).unwrap();
        assert_eq!(record(&plans).unwrap(), record(&plans).unwrap());
    }
}
