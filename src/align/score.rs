/// 候选位置的打分结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    pub start: usize,
    pub score: usize,
}

/// Hamming 相似度：等长区间内逐位相同的碱基数。不建模插入/缺失。
#[inline]
pub fn match_score(window: &[u8], read: &[u8]) -> usize {
    window.iter().zip(read).filter(|(a, b)| a == b).count()
}

/// 在给定候选起点中挑出得分最高者；同分时取最先出现的候选（升序即最小位置）。
/// 候选必须满足 start + read.len() <= reference.len()，否则跳过。
pub fn best_of<I>(reference: &[u8], read: &[u8], candidates: I) -> Option<Scored>
where
    I: IntoIterator<Item = usize>,
{
    let l = read.len();
    let mut best: Option<Scored> = None;
    for start in candidates {
        let window = match reference.get(start..start + l) {
            Some(w) => w,
            None => continue,
        };
        let score = match_score(window, read);
        // strict '>' keeps the first maximum
        if best.map(|b| score > b.score).unwrap_or(true) {
            best = Some(Scored { start, score });
            if score == l {
                break;
            }
        }
    }
    best
}

/// 全基因组扫描：对 0..=N-L 的每个起点打分，用于种子缺失时的兜底
pub fn scan_all(reference: &[u8], read: &[u8]) -> Option<Scored> {
    if read.len() > reference.len() {
        return None;
    }
    best_of(reference, read, 0..=reference.len() - read.len())
}
