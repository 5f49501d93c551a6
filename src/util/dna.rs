/// 参考基因组使用的四碱基字母表，生成时按此顺序等概率抽样
pub const BASES: [u8; 4] = [b'A', b'T', b'G', b'C'];

/// scaffold 中未被任何 read 覆盖的位置占位符
pub const PLACEHOLDER: u8 = b'N';

#[inline]
pub fn is_base(b: u8) -> bool {
    matches!(b, b'A' | b'T' | b'G' | b'C')
}

/// 大写化并将 U 视作 T；其余符号原样保留，交由调用方校验
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq {
        let up = b.to_ascii_uppercase();
        out.push(if up == b'U' { b'T' } else { up });
    }
    out
}

/// 返回第一个非 ATGC 符号的位置
pub fn first_invalid(seq: &[u8]) -> Option<usize> {
    seq.iter().position(|&b| !is_base(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_uppercases_and_maps_u() {
        assert_eq!(normalize_seq(b"acgu"), b"ACGT");
        assert_eq!(normalize_seq(b"AxN"), b"AXN");
    }

    #[test]
    fn first_invalid_finds_placeholder() {
        assert_eq!(first_invalid(b"ATGC"), None);
        assert_eq!(first_invalid(b"ATNC"), Some(2));
        assert!(!is_base(PLACEHOLDER));
    }
}
