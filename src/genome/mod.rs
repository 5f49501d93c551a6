use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{invalid, Result};
use crate::util::dna;

/// 参考基因组：定长 ATGC 序列，构造后只读。
/// 索引、采样与 scaffold 都以它为快照；基因组变化后必须重建索引。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    seq: Vec<u8>,
}

impl Genome {
    /// 由已有序列构造，校验非空且只含 ATGC（小写与 U 会先被规范化）
    pub fn from_bytes(seq: &[u8]) -> Result<Self> {
        if seq.is_empty() {
            return Err(invalid("genome must contain at least one base"));
        }
        let norm = dna::normalize_seq(seq);
        if let Some(pos) = dna::first_invalid(&norm) {
            return Err(invalid(format!(
                "genome symbol '{}' at position {} is not one of A/T/G/C",
                norm[pos] as char, pos
            )));
        }
        Ok(Self { seq: norm })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seq.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.seq
    }

    /// 取 [start, start+len) 区间；越界返回 None
    pub fn window(&self, start: usize, len: usize) -> Option<&[u8]> {
        let end = start.checked_add(len)?;
        self.seq.get(start..end)
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.seq).into_owned()
    }
}

/// 生成长度为 `length` 的随机基因组，每个位置独立等概率取自 {A, T, G, C}。
/// 随机源由调用方传入，固定种子即可复现。
pub fn generate_genome<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Result<Genome> {
    if length == 0 {
        return Err(invalid("genome length must be >= 1"));
    }
    let seq: Vec<u8> = (0..length)
        .map(|_| dna::BASES[rng.gen_range(0..dna::BASES.len())])
        .collect();
    Ok(Genome { seq })
}
