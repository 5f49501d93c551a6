//! 端到端流程测试：生成 -> 索引 -> 采样 -> 比对 -> 拼接 -> 统计

use rand::rngs::StdRng;
use rand::SeedableRng;

use seqsim_align::align::{self, AlignOpt, SeedMissPolicy};
use seqsim_align::assembly::{self, ScaffoldStats};
use seqsim_align::genome::{generate_genome, Genome};
use seqsim_align::index::build_index;
use seqsim_align::reads::{sample_reads, ReadSet};
use seqsim_align::pipeline::{run_simulation, SimConfig};
use seqsim_align::SimError;

#[test]
fn atgcatgc_walkthrough() {
    let g = Genome::from_bytes(b"ATGCATGC").unwrap();
    let idx = build_index(&g, 3).unwrap();
    assert_eq!(idx.lookup(b"ATG"), Some(&[0u32, 4][..]));
    assert_eq!(idx.lookup(b"TGC"), Some(&[1u32, 5][..]));
    assert_eq!(idx.lookup(b"GCA"), Some(&[2u32][..]));
    assert_eq!(idx.lookup(b"CAT"), Some(&[3u32][..]));

    let reads = ReadSet::from_reads(vec![b"ATGC".to_vec()]).unwrap();
    let starts = align::align_reads(&g, &idx, 3, &reads).unwrap();
    assert_eq!(starts, vec![0]);

    let scaffold = assembly::assemble_scaffold(g.len(), &reads, &starts).unwrap();
    assert_eq!(scaffold.as_bytes(), b"ATGCNNNN");
    assert_eq!(assembly::count_mismatched_bases(&g, &scaffold).unwrap(), 4);
}

#[test]
fn high_coverage_reconstructs_most_of_the_genome() {
    let mut rng = StdRng::seed_from_u64(0xDEAD_BEEF);
    let g = generate_genome(600, &mut rng).unwrap();
    let k = 10;
    let idx = build_index(&g, k).unwrap();
    let sampled = sample_reads(&g, 40, 300, &mut rng).unwrap();
    let hits = align::align_reads_with_opt(&g, &idx, k, &sampled.reads, AlignOpt::default()).unwrap();
    let starts: Vec<usize> = hits.iter().map(|h| h.start).collect();
    let scaffold = assembly::assemble_scaffold(g.len(), &sampled.reads, &starts).unwrap();

    let stats = ScaffoldStats::compute(&g, &scaffold).unwrap();
    assert_eq!(stats.miscalled, 0);
    assert_eq!(stats.mismatched, assembly::count_mismatched_bases(&g, &scaffold).unwrap());
    // 20x expected coverage leaves essentially nothing uncovered
    assert_eq!(assembly::expected_coverage(40, 300, 600).unwrap(), 20.0);
    assert!(stats.breadth() > 0.95);
}

#[test]
fn seed_miss_policy_is_explicit() {
    let g = Genome::from_bytes(b"AAAAAAAAAA").unwrap();
    let idx = build_index(&g, 2).unwrap();
    let reads = ReadSet::from_reads(vec![b"CAAA".to_vec()]).unwrap();

    let fail = AlignOpt { seed_miss: SeedMissPolicy::Fail, ..AlignOpt::default() };
    assert!(matches!(
        align::align_reads_with_opt(&g, &idx, 2, &reads, fail),
        Err(SimError::SeedNotFound { read: 0, .. })
    ));

    let hits = align::align_reads_with_opt(&g, &idx, 2, &reads, AlignOpt::default()).unwrap();
    assert!(hits[0].rescued);
    assert_eq!(hits[0].start, 0);
    assert_eq!(hits[0].score, 3);
}

#[test]
fn simulation_is_reproducible_across_thread_counts() {
    let base = SimConfig {
        reference_length: 800,
        kmer_len: 4,
        read_length: 20,
        num_reads: 150,
        seed: Some(99),
        ..SimConfig::default()
    };
    let single = run_simulation(&base).unwrap();
    let multi = run_simulation(&SimConfig { threads: 3, ..base.clone() }).unwrap();
    assert_eq!(single.starts, multi.starts);
    assert_eq!(single.scaffold, multi.scaffold);
    assert!((single.expected_coverage - 3.75).abs() < 1e-12);
    assert!(single.starts.iter().all(|&s| s + 20 <= 800));
}
