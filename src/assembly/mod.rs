pub mod coverage;
pub mod scaffold;

pub use coverage::{
    count_mismatched_bases, depth_track, expected_coverage, observed_mean_depth, read_placements, ReadPlacement,
    ScaffoldStats,
};
pub use scaffold::{assemble_scaffold, Scaffold};
