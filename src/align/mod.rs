pub mod score;
pub mod seed;

use rayon::prelude::*;

use crate::error::{invalid, Result, SimError};
use crate::genome::Genome;
use crate::index::kmer::KmerIndex;
use crate::reads::ReadSet;

pub use score::{best_of, match_score, scan_all, Scored};
pub use seed::{find_candidates, seed_of, SeedLookup};

/// 种子缺失（或无候选能容纳整条 read）时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SeedMissPolicy {
    /// 整批比对失败，返回 SeedNotFound
    Fail,
    /// 退化为全基因组扫描打分
    #[default]
    Scan,
}

#[derive(Debug, Clone, Copy)]
pub struct AlignOpt {
    pub threads: usize,
    pub seed_miss: SeedMissPolicy,
}

impl Default for AlignOpt {
    fn default() -> Self {
        Self { threads: 1, seed_miss: SeedMissPolicy::Scan }
    }
}

/// 单条 read 的比对结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadHit {
    /// 选中的基因组起点
    pub start: usize,
    /// 该起点上的匹配碱基数，最大为 read 长度
    pub score: usize,
    /// 打分过的候选数量
    pub candidates: usize,
    /// 是否经由全基因组扫描兜底得到
    pub rescued: bool,
}

impl ReadHit {
    #[inline]
    pub fn mismatches(&self, read_len: usize) -> usize {
        read_len - self.score
    }
}

/// 按默认策略比对，仅返回每条 read 的起点
pub fn align_reads(genome: &Genome, index: &KmerIndex, k: usize, reads: &ReadSet) -> Result<Vec<usize>> {
    let hits = align_reads_with_opt(genome, index, k, reads, AlignOpt::default())?;
    Ok(hits.into_iter().map(|h| h.start).collect())
}

/// seed-and-extend 比对：
/// 1. 取 read 前 k 个碱基作为种子查索引
/// 2. 对能容纳整条 read 的候选位置计算 Hamming 相似度
/// 3. 取最高分，同分取升序中第一个候选
///
/// 输出顺序与输入 read 顺序一致，与线程数无关。
pub fn align_reads_with_opt(
    genome: &Genome,
    index: &KmerIndex,
    k: usize,
    reads: &ReadSet,
    opt: AlignOpt,
) -> Result<Vec<ReadHit>> {
    check_inputs(genome, index, k, reads)?;
    if reads.is_empty() {
        return Ok(Vec::new());
    }

    let reference = genome.as_bytes();
    let results: Vec<Result<ReadHit>> = if opt.threads > 1 {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(opt.threads).build()?;
        pool.install(|| {
            reads
                .as_slice()
                .par_iter()
                .enumerate()
                .map(|(ri, read)| align_one(reference, index, k, ri, read, opt.seed_miss))
                .collect()
        })
    } else {
        reads
            .iter()
            .enumerate()
            .map(|(ri, read)| align_one(reference, index, k, ri, read, opt.seed_miss))
            .collect()
    };

    // 顺序收集，保证 Fail 策略下报告的是第一条失败的 read
    let hits = results.into_iter().collect::<Result<Vec<_>>>()?;
    let rescued = hits.iter().filter(|h| h.rescued).count();
    let exact = hits.iter().filter(|h| h.score == reads.read_len()).count();
    log::info!(
        "aligned {} reads (exact: {}, rescued by scan: {})",
        hits.len(),
        exact,
        rescued
    );
    Ok(hits)
}

fn check_inputs(genome: &Genome, index: &KmerIndex, k: usize, reads: &ReadSet) -> Result<()> {
    if k == 0 {
        return Err(invalid("k-mer length must be >= 1"));
    }
    if index.k != k {
        return Err(invalid(format!("index was built with k={}, got k={}", index.k, k)));
    }
    if index.genome_len() != genome.len() {
        return Err(invalid(format!(
            "index built over {} bp but genome has {} bp; rebuild the index",
            index.genome_len(),
            genome.len()
        )));
    }
    if !index.matches(genome) {
        return Err(invalid("index was built over a different genome; rebuild the index"));
    }
    if reads.is_empty() {
        return Ok(());
    }
    let l = reads.read_len();
    if l > genome.len() {
        return Err(invalid(format!("read length {} exceeds genome length {}", l, genome.len())));
    }
    if k > l {
        return Err(invalid(format!("seed length {} exceeds read length {}", k, l)));
    }
    Ok(())
}

fn align_one(
    reference: &[u8],
    index: &KmerIndex,
    k: usize,
    ri: usize,
    read: &[u8],
    policy: SeedMissPolicy,
) -> Result<ReadHit> {
    let seed = seed_of(read, k);
    match find_candidates(index, seed, read.len()) {
        SeedLookup::Candidates(cands) => {
            let n_cands = cands.len();
            // 候选都已通过边界过滤，这里必有结果
            if let Some(best) = best_of(reference, read, cands) {
                return Ok(ReadHit {
                    start: best.start,
                    score: best.score,
                    candidates: n_cands,
                    rescued: false,
                });
            }
        }
        SeedLookup::Missing | SeedLookup::NoFit => {}
    }

    match policy {
        SeedMissPolicy::Fail => Err(SimError::SeedNotFound {
            read: ri,
            seed: String::from_utf8_lossy(seed).into_owned(),
        }),
        SeedMissPolicy::Scan => {
            log::debug!("read {}: seed {} missed, scanning genome", ri, String::from_utf8_lossy(seed));
            let best = scan_all(reference, read)
                .ok_or_else(|| invalid(format!("read {} longer than genome", ri)))?;
            Ok(ReadHit {
                start: best.start,
                score: best.score,
                candidates: reference.len() - read.len() + 1,
                rescued: true,
            })
        }
    }
}
