use crate::error::{invalid, Result};
use crate::reads::ReadSet;
use crate::util::dna::PLACEHOLDER;

/// 由比对结果拼出的参考近似序列，未覆盖位置保留占位符 N
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    bases: Vec<u8>,
}

impl Scaffold {
    /// 长度为 `len` 的全占位符 scaffold
    pub fn blank(len: usize) -> Self {
        Self { bases: vec![PLACEHOLDER; len] }
    }

    /// 把 read 写到 [start, start+L)，超出末尾的部分被截断。
    /// 返回实际写入的碱基数。
    pub fn place(&mut self, start: usize, read: &[u8]) -> usize {
        let n = self.bases.len();
        if start >= n {
            return 0;
        }
        let end = start.saturating_add(read.len()).min(n);
        let written = end - start;
        self.bases[start..end].copy_from_slice(&read[..written]);
        written
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bases
    }

    /// 每个位置是否已被 read 覆盖（非占位符）
    pub fn covered_mask(&self) -> Vec<bool> {
        self.bases.iter().map(|&b| b != PLACEHOLDER).collect()
    }

    pub fn covered_count(&self) -> usize {
        self.bases.iter().filter(|&&b| b != PLACEHOLDER).count()
    }

    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bases).into_owned()
    }
}

/// 在长度为 N 的空白画布上按输入顺序依次写入每条 read；
/// 重叠处后写覆盖先写，不做投票或共识。越界部分截断。
pub fn assemble_scaffold(reference_length: usize, reads: &ReadSet, starts: &[usize]) -> Result<Scaffold> {
    if starts.len() != reads.len() {
        return Err(invalid(format!(
            "{} read starts given for {} reads",
            starts.len(),
            reads.len()
        )));
    }

    let mut scaffold = Scaffold::blank(reference_length);
    let mut clipped = 0usize;
    for (read, &start) in reads.iter().zip(starts) {
        if scaffold.place(start, read) < read.len() {
            clipped += 1;
        }
    }
    if clipped > 0 {
        log::warn!("{} reads overran the scaffold end and were clipped", clipped);
    }
    Ok(scaffold)
}
