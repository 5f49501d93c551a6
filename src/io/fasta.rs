use std::io::{BufRead, Write};

use crate::error::{Result, SimError};
use crate::genome::Genome;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub id: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    buf: String,
    done: bool,
    peek_header: Option<String>,
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            done: false,
            peek_header: None,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done {
            return Ok(None);
        }

        // Find header line
        let header = if let Some(h) = self.peek_header.take() {
            h
        } else {
            loop {
                self.buf.clear();
                let n = self.reader.read_line(&mut self.buf)?;
                if n == 0 {
                    self.done = true;
                    return Ok(None);
                }
                if self.buf.starts_with('>') {
                    break self.buf[1..].trim().to_string();
                }
            }
        };

        let mut parts = header.splitn(2, char::is_whitespace);
        let id = parts.next().unwrap_or("").to_string();
        let desc = parts
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let mut seq: Vec<u8> = Vec::new();
        loop {
            self.buf.clear();
            let n = self.reader.read_line(&mut self.buf)?;
            if n == 0 {
                self.done = true;
                break;
            }
            if self.buf.starts_with('>') {
                self.peek_header = Some(self.buf[1..].trim().to_string());
                break;
            }
            seq.extend(
                self.buf
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Some(FastaRecord { id, desc, seq }))
    }
}

/// 作为参考使用的 FASTA 记录
#[derive(Debug, Clone)]
pub struct Reference {
    pub id: String,
    pub desc: Option<String>,
    pub genome: Genome,
}

/// FASTA 序列行宽
pub const LINE_WIDTH: usize = 60;

/// 读取 FASTA 的第一条记录作为参考基因组；后续记录被忽略（单一线性参考）
pub fn read_genome<R: BufRead>(reader: R) -> Result<Reference> {
    let mut r = FastaReader::new(reader);
    let rec = r
        .next_record()?
        .ok_or_else(|| SimError::Format("FASTA input contains no records".to_string()))?;
    if r.next_record()?.is_some() {
        log::warn!("FASTA has more than one record; using only '{}'", rec.id);
    }
    let genome = Genome::from_bytes(&rec.seq)?;
    Ok(Reference { id: rec.id, desc: rec.desc, genome })
}

pub fn read_genome_file(path: &str) -> Result<Reference> {
    let fh = std::fs::File::open(path)?;
    read_genome(std::io::BufReader::new(fh))
}

/// 以单条记录写出基因组，序列按 LINE_WIDTH 折行
pub fn write_genome<W: Write>(mut writer: W, id: &str, genome: &Genome) -> Result<()> {
    writeln!(writer, ">{}", id)?;
    for line in genome.as_bytes().chunks(LINE_WIDTH) {
        writer.write_all(line)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_genome_file(path: &str, id: &str, genome: &Genome) -> Result<()> {
    let fh = std::fs::File::create(path)?;
    write_genome(std::io::BufWriter::new(fh), id, genome)
}
