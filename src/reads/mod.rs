use rand::Rng;

use crate::error::{invalid, Result};
use crate::genome::Genome;

/// 一组等长 read。构造时保证所有 read 长度一致且非零。
/// read 本身不携带来源位置，来源需要通过比对重新找回。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReadSet {
    read_len: usize,
    reads: Vec<Vec<u8>>,
}

impl ReadSet {
    /// 由任意 read 列表构造；长度不一致或为 0 时报错。
    /// 空列表合法，此时 read_len 为 0。
    pub fn from_reads(reads: Vec<Vec<u8>>) -> Result<Self> {
        let read_len = reads.first().map(Vec::len).unwrap_or(0);
        if !reads.is_empty() && read_len == 0 {
            return Err(invalid("reads must be non-empty"));
        }
        if let Some((i, r)) = reads.iter().enumerate().find(|(_, r)| r.len() != read_len) {
            return Err(invalid(format!(
                "read {} has length {}, expected {}",
                i,
                r.len(),
                read_len
            )));
        }
        Ok(Self { read_len, reads })
    }

    #[inline]
    pub fn read_len(&self) -> usize {
        self.read_len
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.reads.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&[u8]> {
        self.reads.get(i).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.reads.iter().map(Vec::as_slice)
    }

    pub fn as_slice(&self) -> &[Vec<u8>] {
        &self.reads
    }
}

/// 采样结果：read 与其真实起点分开存放，比对器只看得到 `reads`
#[derive(Debug, Clone)]
pub struct SampledReads {
    pub reads: ReadSet,
    pub origins: Vec<usize>,
}

/// 从基因组中抽取 `count` 条长度为 `read_length` 的 read，
/// 起点在 [0, N - L] 上均匀独立抽取，允许重复与重叠。
pub fn sample_reads<R: Rng + ?Sized>(
    genome: &Genome,
    read_length: usize,
    count: usize,
    rng: &mut R,
) -> Result<SampledReads> {
    let n = genome.len();
    if read_length == 0 {
        return Err(invalid("read length must be >= 1"));
    }
    if read_length > n {
        return Err(invalid(format!(
            "read length {} exceeds genome length {}",
            read_length, n
        )));
    }

    let seq = genome.as_bytes();
    let mut reads = Vec::with_capacity(count);
    let mut origins = Vec::with_capacity(count);
    for _ in 0..count {
        let start = rng.gen_range(0..=n - read_length);
        reads.push(seq[start..start + read_length].to_vec());
        origins.push(start);
    }

    Ok(SampledReads {
        reads: ReadSet { read_len: read_length, reads },
        origins,
    })
}
