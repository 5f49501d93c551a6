use std::io::Write;

use crate::error::Result;
use crate::reads::ReadSet;

/// 模拟 read 没有质量模型，统一写入该质量字符（Phred 40）
pub const DEFAULT_QUAL: u8 = b'I';

pub struct FastqWriter<W: Write> {
    writer: W,
    prefix: String,
}

impl<W: Write> FastqWriter<W> {
    pub fn new(writer: W, prefix: &str) -> Self {
        Self { writer, prefix: prefix.to_string() }
    }

    pub fn write_record(&mut self, id: &str, seq: &[u8]) -> Result<()> {
        writeln!(self.writer, "@{}", id)?;
        self.writer.write_all(seq)?;
        writeln!(self.writer, "\n+")?;
        let qual = vec![DEFAULT_QUAL; seq.len()];
        self.writer.write_all(&qual)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// 依次写出所有 read，id 为 `<prefix>_<序号>`，不含真实来源位置
    pub fn write_reads(&mut self, reads: &ReadSet) -> Result<usize> {
        let mut n = 0usize;
        for (i, read) in reads.iter().enumerate() {
            let id = format!("{}_{}", self.prefix, i + 1);
            self.write_record(&id, read)?;
            n += 1;
        }
        self.writer.flush()?;
        Ok(n)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
