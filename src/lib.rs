//! # seqsim-align
//!
//! 测序教学模拟器的核心：在随机参考基因组上模拟短 read 测序、比对与拼接。
//!
//! 本 crate 提供：
//!
//! - **基因组生成**：四碱基等概率随机序列，随机源由调用方显式传入
//! - **k-mer 索引**：k 长子串到全部出现位置（升序）的映射，可用 bincode 持久化
//! - **read 采样**：均匀随机起点的定长 read
//! - **seed-and-extend 比对**：前 k 碱基作种子取候选，Hamming 相似度打分，同分取第一个候选
//! - **scaffold 拼接与覆盖度统计**：后写覆盖先写，越界截断；理论覆盖度与错配计数
//!
//! ## 快速示例
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use seqsim_align::{align, assembly, genome, index, reads};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let g = genome::generate_genome(1000, &mut rng).unwrap();
//! let idx = index::build_index(&g, 3).unwrap();
//! let sampled = reads::sample_reads(&g, 10, 100, &mut rng).unwrap();
//! let starts = align::align_reads(&g, &idx, 3, &sampled.reads).unwrap();
//! let scaffold = assembly::assemble_scaffold(g.len(), &sampled.reads, &starts).unwrap();
//!
//! assert_eq!(assembly::expected_coverage(10, 100, 1000).unwrap(), 1.0);
//! let unread = assembly::count_mismatched_bases(&g, &scaffold).unwrap();
//! assert!(unread <= g.len());
//! ```
//!
//! ## 模块说明
//!
//! - [`genome`] — 参考基因组类型与随机生成
//! - [`index`] — k-mer 索引构建与持久化
//! - [`reads`] — 定长 read 集合与随机采样
//! - [`align`] — 种子查找、打分与批量比对
//! - [`assembly`] — scaffold 拼接、覆盖度与绘图数据
//! - [`pipeline`] — 按固定顺序串起以上步骤
//! - [`io`] — FASTA 读取 / FASTQ 写出
//! - [`util`] — 碱基字母表工具

pub mod align;
pub mod assembly;
pub mod error;
pub mod genome;
pub mod index;
pub mod io;
pub mod pipeline;
pub mod reads;
pub mod util;

pub use error::{Result, SimError};
