//! Command-stream assembly
//!
//! Converts sequenced color runs into the final machine command stream. The
//! assembler is the single owner of the request's `EmbPattern` and enforces
//! the stream invariants: every color block opens with ColorChange + Jump,
//! every Trim is followed by a Jump before the next Stitch, and the stream
//! terminates with End.

use crate::core::pattern::EmbPattern;
use crate::engine::sequence::ColorRun;

/// Assembly states
///
/// `PendingJump` means the thread is not anchored: the next point must be
/// reached with a Jump. `Stitching` sews point-to-point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    PendingJump,
    Stitching,
}

/// Assemble sequenced color runs into a pattern
///
/// `short_jump` (0.1mm units) governs transitions between a single object's
/// sub-paths: below the threshold the needle sews straight through, at or
/// above it the thread is trimmed and the machine jumps. Object-to-object
/// transitions were already decided by the sequencer (injected connectors or
/// `trim_before` flags).
pub fn assemble(runs: Vec<ColorRun>, short_jump: f64) -> EmbPattern {
    let mut pattern = EmbPattern::new();

    for run in runs {
        pattern.add_thread(run.thread.clone());
        pattern.color_change();
        let mut state = State::PendingJump;

        for object in &run.objects {
            if object.trim_before && state == State::Stitching {
                pattern.trim();
                state = State::PendingJump;
            }

            for sub_path in &object.sub_paths {
                let Some(&first) = sub_path.first() else {
                    continue;
                };

                match state {
                    State::Idle | State::PendingJump => {
                        pattern.jump_abs(first.0, first.1);
                        for &(x, y) in &sub_path[1..] {
                            pattern.stitch_abs(x, y);
                        }
                        state = State::Stitching;
                    }
                    State::Stitching => {
                        let (px, py) = pattern.position();
                        let gap = ((first.0 - px).powi(2) + (first.1 - py).powi(2)).sqrt();
                        if gap >= short_jump {
                            pattern.trim();
                            pattern.jump_abs(first.0, first.1);
                            for &(x, y) in &sub_path[1..] {
                                pattern.stitch_abs(x, y);
                            }
                        } else {
                            for &(x, y) in sub_path {
                                pattern.stitch_abs(x, y);
                            }
                        }
                    }
                }
            }
        }

        // cut the thread before the next color block (or the end marker)
        if state == State::Stitching {
            pattern.trim();
        }
    }

    pattern.end();
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::command::Command;
    use crate::core::thread::EmbThread;
    use crate::engine::sequence::StitchObject;

    fn run_of(color: u32, objects: Vec<StitchObject>) -> ColorRun {
        ColorRun {
            thread: EmbThread::new(color),
            objects,
        }
    }

    fn object(color: u32, sub_paths: Vec<Vec<(f64, f64)>>) -> StitchObject {
        StitchObject::new(EmbThread::new(color), sub_paths)
    }

    #[test]
    fn test_color_block_opens_with_jump() {
        let runs = vec![run_of(
            0xFF0000,
            vec![object(0xFF0000, vec![vec![(0.0, 0.0), (10.0, 0.0)]])],
        )];
        let pattern = assemble(runs, 20.0);
        let commands: Vec<Command> = pattern.stitches().iter().map(|s| s.command).collect();
        assert_eq!(
            commands,
            vec![
                Command::ColorChange,
                Command::Jump,
                Command::Stitch,
                Command::Trim,
                Command::End
            ]
        );
    }

    #[test]
    fn test_trim_before_object() {
        let mut far = object(0xFF0000, vec![vec![(500.0, 0.0), (510.0, 0.0)]]);
        far.trim_before = true;
        let runs = vec![run_of(
            0xFF0000,
            vec![
                object(0xFF0000, vec![vec![(0.0, 0.0), (10.0, 0.0)]]),
                far,
            ],
        )];
        let pattern = assemble(runs, 20.0);
        assert_eq!(pattern.count_trims(), 2); // between objects + before end
        // the trim is followed by a jump before any stitch
        let stitches = pattern.stitches();
        let trim_idx = stitches
            .iter()
            .position(|s| s.command == Command::Trim)
            .unwrap();
        assert_eq!(stitches[trim_idx + 1].command, Command::Jump);
    }

    #[test]
    fn test_close_sub_paths_sew_through() {
        let runs = vec![run_of(
            0xFF0000,
            vec![object(
                0xFF0000,
                vec![
                    vec![(0.0, 0.0), (10.0, 0.0)],
                    vec![(15.0, 0.0), (25.0, 0.0)], // 5 units past the last point
                ],
            )],
        )];
        let pattern = assemble(runs, 20.0);
        assert_eq!(pattern.count_trims(), 1); // only the end-of-run trim
        assert_eq!(pattern.count_jumps(), 1);
    }

    #[test]
    fn test_far_sub_paths_trim_and_jump() {
        let runs = vec![run_of(
            0xFF0000,
            vec![object(
                0xFF0000,
                vec![
                    vec![(0.0, 0.0), (10.0, 0.0)],
                    vec![(500.0, 0.0), (510.0, 0.0)],
                ],
            )],
        )];
        let pattern = assemble(runs, 20.0);
        assert_eq!(pattern.count_trims(), 2);
        assert_eq!(pattern.count_jumps(), 2);
    }

    #[test]
    fn test_stream_invariant_jump_before_stitch() {
        let runs = vec![
            run_of(
                0xFF0000,
                vec![object(0xFF0000, vec![vec![(0.0, 0.0), (10.0, 0.0)]])],
            ),
            run_of(
                0x00FF00,
                vec![object(0x00FF00, vec![vec![(500.0, 0.0), (510.0, 0.0)]])],
            ),
        ];
        let pattern = assemble(runs, 20.0);
        let mut anchored = false;
        for stitch in pattern.stitches() {
            match stitch.command {
                Command::Jump => anchored = true,
                Command::Trim | Command::ColorChange => anchored = false,
                Command::Stitch => assert!(anchored, "stitch before jump"),
                _ => {}
            }
        }
        assert_eq!(pattern.count_color_changes(), 2);
    }

    #[test]
    fn test_empty_runs_still_terminate() {
        let pattern = assemble(Vec::new(), 20.0);
        let commands: Vec<Command> = pattern.stitches().iter().map(|s| s.command).collect();
        assert_eq!(commands, vec![Command::End]);
    }
}
