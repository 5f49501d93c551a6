use super::scaffold::Scaffold;
use crate::error::{invalid, Result};
use crate::genome::Genome;
use crate::util::dna::PLACEHOLDER;

/// 理论平均覆盖深度 L * M / N，与比对结果无关
pub fn expected_coverage(read_length: usize, count: usize, reference_length: usize) -> Result<f64> {
    if reference_length == 0 {
        return Err(invalid("reference length must be >= 1"));
    }
    Ok(read_length as f64 * count as f64 / reference_length as f64)
}

/// scaffold 与真实参考不一致的位置数，包含未覆盖（N）与覆盖但错误两类
pub fn count_mismatched_bases(genome: &Genome, scaffold: &Scaffold) -> Result<usize> {
    check_same_len(genome, scaffold)?;
    Ok(genome
        .as_bytes()
        .iter()
        .zip(scaffold.as_bytes())
        .filter(|(g, s)| g != s)
        .count())
}

fn check_same_len(genome: &Genome, scaffold: &Scaffold) -> Result<()> {
    if genome.len() != scaffold.len() {
        return Err(invalid(format!(
            "scaffold length {} differs from genome length {}",
            scaffold.len(),
            genome.len()
        )));
    }
    Ok(())
}

/// 不一致位置的拆分统计：uncovered + miscalled == mismatched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldStats {
    pub reference_length: usize,
    pub covered: usize,
    pub uncovered: usize,
    pub miscalled: usize,
    pub mismatched: usize,
}

impl ScaffoldStats {
    pub fn compute(genome: &Genome, scaffold: &Scaffold) -> Result<Self> {
        check_same_len(genome, scaffold)?;
        let mut uncovered = 0usize;
        let mut miscalled = 0usize;
        for (&g, &s) in genome.as_bytes().iter().zip(scaffold.as_bytes()) {
            if s == PLACEHOLDER {
                uncovered += 1;
            } else if s != g {
                miscalled += 1;
            }
        }
        Ok(Self {
            reference_length: genome.len(),
            covered: genome.len() - uncovered,
            uncovered,
            miscalled,
            mismatched: uncovered + miscalled,
        })
    }

    /// 被覆盖位置所占比例
    pub fn breadth(&self) -> f64 {
        if self.reference_length == 0 {
            return 0.0;
        }
        self.covered as f64 / self.reference_length as f64
    }
}

/// 比对后 read 在参考上的区间 [start, end)，end 已截断到 N，供绘图使用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPlacement {
    pub read: usize,
    pub start: usize,
    pub end: usize,
}

pub fn read_placements(starts: &[usize], read_length: usize, reference_length: usize) -> Vec<ReadPlacement> {
    starts
        .iter()
        .enumerate()
        .map(|(read, &start)| ReadPlacement {
            read,
            start: start.min(reference_length),
            end: start.saturating_add(read_length).min(reference_length),
        })
        .collect()
}

/// 按比对起点统计每个位置实际被多少条 read 覆盖（差分数组累加）
pub fn depth_track(reference_length: usize, read_length: usize, starts: &[usize]) -> Vec<u32> {
    let mut diff = vec![0i64; reference_length + 1];
    for &s in starts {
        if s >= reference_length {
            continue;
        }
        let e = s.saturating_add(read_length).min(reference_length);
        diff[s] += 1;
        diff[e] -= 1;
    }
    let mut depth = Vec::with_capacity(reference_length);
    let mut acc = 0i64;
    for d in &diff[..reference_length] {
        acc += d;
        depth.push(acc as u32);
    }
    depth
}

/// 实际平均深度（depth_track 的均值）
pub fn observed_mean_depth(depth: &[u32]) -> f64 {
    if depth.is_empty() {
        return 0.0;
    }
    depth.iter().map(|&d| d as u64).sum::<u64>() as f64 / depth.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::scaffold::assemble_scaffold;
    use crate::reads::ReadSet;

    #[test]
    fn expected_coverage_closed_form() {
        assert_eq!(expected_coverage(10, 100, 1000).unwrap(), 1.0);
        assert_eq!(expected_coverage(5, 0, 1000).unwrap(), 0.0);
        assert!((expected_coverage(3, 7, 10).unwrap() - 2.1).abs() < 1e-12);
        assert!(expected_coverage(10, 10, 0).is_err());
    }

    #[test]
    fn mismatches_include_uncovered_and_wrong() {
        let g = Genome::from_bytes(b"ATGCATGC").unwrap();
        let reads = ReadSet::from_reads(vec![b"ATGC".to_vec(), b"GGGG".to_vec()]).unwrap();
        // second read placed at the wrong origin
        let s = assemble_scaffold(8, &reads, &[0, 3]).unwrap();
        assert_eq!(s.as_bytes(), b"ATGGGGGN");
        assert_eq!(count_mismatched_bases(&g, &s).unwrap(), 4);

        let stats = ScaffoldStats::compute(&g, &s).unwrap();
        assert_eq!(stats.uncovered, 1);
        assert_eq!(stats.miscalled, 3);
        assert_eq!(stats.mismatched, 4);
        assert_eq!(stats.covered, 7);
        assert!((stats.breadth() - 7.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn blank_scaffold_mismatches_everything() {
        let g = Genome::from_bytes(b"ATGC").unwrap();
        let s = Scaffold::blank(4);
        assert_eq!(count_mismatched_bases(&g, &s).unwrap(), 4);
        assert!(count_mismatched_bases(&g, &Scaffold::blank(5)).is_err());
    }

    #[test]
    fn placements_clip_to_reference() {
        let p = read_placements(&[0, 6], 4, 8);
        assert_eq!(p[0], ReadPlacement { read: 0, start: 0, end: 4 });
        assert_eq!(p[1], ReadPlacement { read: 1, start: 6, end: 8 });
    }

    #[test]
    fn depth_track_counts_overlaps() {
        let depth = depth_track(8, 3, &[0, 1, 6, 20]);
        assert_eq!(depth, vec![1, 2, 2, 1, 0, 0, 1, 1]);
        assert!((observed_mean_depth(&depth) - 1.0).abs() < 1e-12);
        assert_eq!(observed_mean_depth(&[]), 0.0);
    }
}
