use crate::index::kmer::KmerIndex;

/// 种子查找结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedLookup {
    /// 种子命中，且至少一个候选位置能容纳整条 read（升序）
    Candidates(Vec<usize>),
    /// 种子在索引中不存在
    Missing,
    /// 种子存在，但所有候选位置都满足 i + L > N
    NoFit,
}

/// read 的前 k 个碱基作为种子；调用方保证 k <= read.len()
#[inline]
pub fn seed_of(read: &[u8], k: usize) -> &[u8] {
    &read[..k]
}

/// 用种子查索引，过滤掉放不下整条 read 的候选位置，保持索引中的升序。
pub fn find_candidates(index: &KmerIndex, seed: &[u8], read_len: usize) -> SeedLookup {
    let positions = match index.lookup(seed) {
        Some(p) => p,
        None => return SeedLookup::Missing,
    };
    let n = index.genome_len();
    let fitting: Vec<usize> = positions
        .iter()
        .map(|&p| p as usize)
        .filter(|&p| p + read_len <= n)
        .collect();
    if fitting.is_empty() {
        SeedLookup::NoFit
    } else {
        SeedLookup::Candidates(fitting)
    }
}
