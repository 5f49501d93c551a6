use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::align::{self, AlignOpt, ReadHit, SeedMissPolicy};
use crate::assembly::{self, ReadPlacement, Scaffold, ScaffoldStats};
use crate::error::{invalid, Result};
use crate::genome::{self, Genome};
use crate::index::kmer::{self, KmerIndex};
use crate::reads::{self, SampledReads};

/// 一次覆盖度模拟的参数，默认值与教学页面一致
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub reference_length: usize,
    pub kmer_len: usize,
    pub read_length: usize,
    pub num_reads: usize,
    /// None 时用当前时间作种子，实际使用的种子记录在报告里
    pub seed: Option<u64>,
    pub threads: usize,
    pub seed_miss: SeedMissPolicy,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            reference_length: 1000,
            kmer_len: 3,
            read_length: 10,
            num_reads: 100,
            seed: None,
            threads: 1,
            seed_miss: SeedMissPolicy::Scan,
        }
    }
}

impl SimConfig {
    /// 在任何随机抽样之前校验参数，尽早失败
    pub fn validate(&self, reference_length: usize) -> Result<()> {
        if reference_length == 0 {
            return Err(invalid("reference length must be >= 1"));
        }
        if self.kmer_len == 0 {
            return Err(invalid("k-mer length must be >= 1"));
        }
        if self.read_length == 0 {
            return Err(invalid("read length must be >= 1"));
        }
        if self.read_length > reference_length {
            return Err(invalid(format!(
                "read length {} exceeds reference length {}",
                self.read_length, reference_length
            )));
        }
        if self.kmer_len > self.read_length {
            return Err(invalid(format!(
                "k-mer length {} exceeds read length {}",
                self.kmer_len, self.read_length
            )));
        }
        if self.threads == 0 {
            return Err(invalid("threads must be >= 1"));
        }
        Ok(())
    }

    fn align_opt(&self) -> AlignOpt {
        AlignOpt { threads: self.threads, seed_miss: self.seed_miss }
    }
}

/// 给定种子原样返回，否则用当前时间（微秒）作种子
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let s = chrono::Utc::now().timestamp_micros() as u64;
        log::info!("no seed given, using clock seed {}", s);
        s
    })
}

/// 一次模拟的全部产物：交给网页/绘图层的纯数据
#[derive(Debug)]
pub struct SimulationReport {
    pub seed: Option<u64>,
    pub genome: Genome,
    pub index: KmerIndex,
    pub sampled: SampledReads,
    pub hits: Vec<ReadHit>,
    pub starts: Vec<usize>,
    pub scaffold: Scaffold,
    pub expected_coverage: f64,
    pub mismatched: usize,
    pub stats: ScaffoldStats,
    pub placements: Vec<ReadPlacement>,
    pub depth: Vec<u32>,
}

impl SimulationReport {
    pub fn read_length(&self) -> usize {
        self.sampled.reads.read_len()
    }

    /// 比对起点等于真实采样起点的 read 比例
    pub fn origin_recovery(&self) -> f64 {
        if self.starts.is_empty() {
            return 0.0;
        }
        let hit = self
            .starts
            .iter()
            .zip(&self.sampled.origins)
            .filter(|(a, b)| a == b)
            .count();
        hit as f64 / self.starts.len() as f64
    }

    pub fn observed_mean_depth(&self) -> f64 {
        assembly::observed_mean_depth(&self.depth)
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(seed) = self.seed {
            writeln!(f, "seed:              {}", seed)?;
        }
        writeln!(f, "reference_length:  {}", self.genome.len())?;
        writeln!(f, "kmer_length:       {}", self.index.k)?;
        writeln!(f, "distinct_kmers:    {}", self.index.len())?;
        writeln!(f, "read_length:       {}", self.read_length())?;
        writeln!(f, "num_reads:         {}", self.starts.len())?;
        writeln!(f, "expected_coverage: {:.3}", self.expected_coverage)?;
        writeln!(f, "observed_depth:    {:.3}", self.observed_mean_depth())?;
        writeln!(f, "breadth:           {:.3}", self.stats.breadth())?;
        writeln!(f, "unread_bases:      {}", self.mismatched)?;
        writeln!(f, "  uncovered:       {}", self.stats.uncovered)?;
        writeln!(f, "  miscalled:       {}", self.stats.miscalled)?;
        writeln!(f, "origin_recovery:   {:.3}", self.origin_recovery())
    }
}

/// 生成随机基因组并跑完整流程：生成 -> 索引 -> 采样 -> 比对 -> 拼接 -> 统计
pub fn run_simulation(config: &SimConfig) -> Result<SimulationReport> {
    config.validate(config.reference_length)?;
    let seed = resolve_seed(config.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let genome = genome::generate_genome(config.reference_length, &mut rng)?;
    let mut report = run_on_genome(config, genome, &mut rng)?;
    report.seed = Some(seed);
    Ok(report)
}

/// 在给定基因组上跑流程；`config.reference_length` 被忽略，以基因组实际长度为准
pub fn run_on_genome<R: Rng + ?Sized>(config: &SimConfig, genome: Genome, rng: &mut R) -> Result<SimulationReport> {
    config.validate(genome.len())?;
    let index = kmer::build_index(&genome, config.kmer_len)?;
    log::info!("indexed {} bp with k={} ({} distinct k-mers)", genome.len(), index.k, index.len());
    run_on_index(config, index, rng)
}

/// 在已有索引（例如从 .kmi 载入）上跑流程，基因组取自索引本身。
/// `config.kmer_len` 必须与索引的 k 一致。
pub fn run_on_index<R: Rng + ?Sized>(config: &SimConfig, index: KmerIndex, rng: &mut R) -> Result<SimulationReport> {
    let genome = index.genome().clone();
    let n = genome.len();
    config.validate(n)?;
    if config.kmer_len != index.k {
        return Err(invalid(format!(
            "index was built with k={}, config asks for k={}",
            index.k, config.kmer_len
        )));
    }

    let sampled = reads::sample_reads(&genome, config.read_length, config.num_reads, rng)?;
    let hits = align::align_reads_with_opt(&genome, &index, config.kmer_len, &sampled.reads, config.align_opt())?;
    let starts: Vec<usize> = hits.iter().map(|h| h.start).collect();

    let scaffold = assembly::assemble_scaffold(n, &sampled.reads, &starts)?;
    let expected_coverage = assembly::expected_coverage(config.read_length, config.num_reads, n)?;
    let mismatched = assembly::count_mismatched_bases(&genome, &scaffold)?;
    let stats = ScaffoldStats::compute(&genome, &scaffold)?;
    let placements = assembly::read_placements(&starts, config.read_length, n);
    let depth = assembly::depth_track(n, config.read_length, &starts);

    Ok(SimulationReport {
        seed: None,
        genome,
        index,
        sampled,
        hits,
        starts,
        scaffold,
        expected_coverage,
        mismatched,
        stats,
        placements,
        depth,
    })
}
