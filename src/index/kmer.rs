use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};
use crate::genome::Genome;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct IndexMeta {
    pub reference_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// k-mer 索引：k 长子串 -> 所有出现的起始位置。
/// - 每个 key 的位置列表按扫描顺序（升序）存放
/// - 位置 i 出现在 genome[i..i+k] 的列表中，当且仅当 i + k <= N
/// - 构建后只读；多个比对线程可共享 `&KmerIndex`
/// - 保存构建时的基因组快照，落盘后可独立使用，也用于检测索引过期
#[derive(Debug, Serialize, Deserialize)]
pub struct KmerIndex {
    pub k: usize,
    genome: Genome,
    table: HashMap<Vec<u8>, Vec<u32>>,
    pub meta: Option<IndexMeta>,
}

impl KmerIndex {
    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = Some(meta);
    }

    /// 构建索引时使用的基因组
    pub fn genome(&self) -> &Genome {
        &self.genome
    }

    #[inline]
    pub fn genome_len(&self) -> usize {
        self.genome.len()
    }

    /// 索引是否由与 `genome` 完全相同的序列构建
    pub fn matches(&self, genome: &Genome) -> bool {
        self.genome == *genome
    }

    /// 查询 k-mer 的候选位置；不存在时返回 None
    #[inline]
    pub fn lookup(&self, kmer: &[u8]) -> Option<&[u32]> {
        self.table.get(kmer).map(Vec::as_slice)
    }

    /// 不同 k-mer 的数量
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 所有已索引位置的总数，非空时等于 N - k + 1
    pub fn total_positions(&self) -> usize {
        self.table.values().map(Vec::len).sum()
    }

    /// 遍历 (k-mer, 位置列表)；HashMap 顺序，不保证稳定
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u32])> {
        self.table.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    /// 出现次数最多的 k-mer 的位置数，衡量候选集规模的上界
    pub fn max_occurrences(&self) -> usize {
        self.table.values().map(Vec::len).max().unwrap_or(0)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let f = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        Ok(idx)
    }
}

/// 扫描 i = 0..=N-k，把 i 追加到 genome[i..i+k] 的列表中。
/// k > N 时返回空索引；k == 0 视为非法参数。
pub fn build_index(genome: &Genome, k: usize) -> Result<KmerIndex> {
    if k == 0 {
        return Err(invalid("k-mer length must be >= 1"));
    }
    let seq = genome.as_bytes();
    let n = seq.len();
    if n > u32::MAX as usize {
        return Err(invalid(format!("genome of {} bases exceeds u32 position range", n)));
    }

    let mut table: HashMap<Vec<u8>, Vec<u32>> = HashMap::new();
    if k <= n {
        for (i, kmer) in seq.windows(k).enumerate() {
            table.entry(kmer.to_vec()).or_default().push(i as u32);
        }
    }
    log::debug!("indexed {} distinct {}-mers over {} bp", table.len(), k, n);

    Ok(KmerIndex { k, genome: genome.clone(), table, meta: None })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genome::generate_genome;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn index_atgcatgc_k3() {
        let g = Genome::from_bytes(b"ATGCATGC").unwrap();
        let idx = build_index(&g, 3).unwrap();
        assert_eq!(idx.len(), 4);
        assert_eq!(idx.lookup(b"ATG"), Some(&[0u32, 4][..]));
        assert_eq!(idx.lookup(b"TGC"), Some(&[1u32, 5][..]));
        assert_eq!(idx.lookup(b"GCA"), Some(&[2u32][..]));
        assert_eq!(idx.lookup(b"CAT"), Some(&[3u32][..]));
        assert_eq!(idx.lookup(b"AAA"), None);
    }

    #[test]
    fn positions_reslice_to_key() {
        let mut rng = StdRng::seed_from_u64(11);
        let g = generate_genome(300, &mut rng).unwrap();
        for k in [1usize, 3, 5, 8] {
            let idx = build_index(&g, k).unwrap();
            for (key, positions) in idx.iter() {
                for &p in positions {
                    assert_eq!(g.window(p as usize, k).unwrap(), key);
                }
            }
        }
    }

    #[test]
    fn positions_partition_scan_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = generate_genome(257, &mut rng).unwrap();
        for k in [1usize, 2, 4, 9, 257] {
            let idx = build_index(&g, k).unwrap();
            let mut seen = vec![0u32; g.len() - k + 1];
            for (_, positions) in idx.iter() {
                assert!(positions.windows(2).all(|w| w[0] < w[1]), "lists must ascend");
                for &p in positions {
                    seen[p as usize] += 1;
                }
            }
            assert!(seen.iter().all(|&c| c == 1), "k={} not a partition", k);
            assert_eq!(idx.total_positions(), g.len() - k + 1);
        }
    }

    #[test]
    fn k_longer_than_genome_gives_empty_index() {
        let g = Genome::from_bytes(b"ATG").unwrap();
        let idx = build_index(&g, 4).unwrap();
        assert!(idx.is_empty());
        assert_eq!(idx.total_positions(), 0);
        assert_eq!(idx.max_occurrences(), 0);
    }

    #[test]
    fn index_remembers_its_genome() {
        let a = Genome::from_bytes(b"ATGCATGCGG").unwrap();
        let b = Genome::from_bytes(b"CCCCCCATGA").unwrap();
        let idx = build_index(&a, 3).unwrap();
        assert_eq!(idx.genome(), &a);
        assert!(idx.matches(&a));
        assert!(!idx.matches(&b));
    }

    #[test]
    fn k_zero_rejected() {
        let g = Genome::from_bytes(b"ATG").unwrap();
        assert!(build_index(&g, 0).is_err());
    }

    #[test]
    fn save_and_load_preserve_lookups() {
        let g = Genome::from_bytes(b"ATGCATGCGGA").unwrap();
        let mut idx = build_index(&g, 3).unwrap();
        idx.set_meta(IndexMeta {
            reference_file: Some("random".to_string()),
            build_args: None,
            build_timestamp: None,
        });
        let path = std::env::temp_dir().join(format!("seqsim_kmi_{}.kmi", std::process::id()));
        let path = path.to_string_lossy().into_owned();
        idx.save_to_file(&path).unwrap();
        let loaded = KmerIndex::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.k, 3);
        assert_eq!(loaded.genome_len(), 11);
        assert!(loaded.matches(&g));
        assert_eq!(loaded.lookup(b"ATG"), Some(&[0u32, 4][..]));
        assert_eq!(loaded.meta.unwrap().reference_file.as_deref(), Some("random"));
    }
}
