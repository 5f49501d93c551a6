use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use seqsim_align::align::SeedMissPolicy;
use seqsim_align::genome::{self, Genome};
use seqsim_align::index::{self, IndexMeta, KmerIndex};
use seqsim_align::io::{fasta, fastq::FastqWriter};
use seqsim_align::pipeline::{self, SimConfig};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "seqsim-align",
    author,
    version,
    about = "Short-read sequencing simulator: k-mer index, seed-and-extend alignment, scaffold coverage",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a k-mer index over a random (or FASTA) reference; writes <prefix>.kmi and <prefix>.fa
    Index {
        /// Reference FASTA file; a random genome is generated if omitted
        #[arg(short, long)]
        reference: Option<String>,
        /// Output prefix for the index (<prefix>.kmi) and reference (<prefix>.fa)
        #[arg(short, long, default_value = "ref")]
        output: String,
        #[arg(short = 'n', long = "length", default_value_t = 1000)]
        reference_length: usize,
        #[arg(short = 'k', long = "kmer", default_value_t = 3)]
        kmer_len: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Sample reads, align them back and report scaffold coverage
    Simulate {
        /// Reference FASTA file; a random genome is generated if omitted
        #[arg(short, long)]
        reference: Option<String>,
        /// Prebuilt k-mer index (.kmi); its genome is used, and checked against --reference if given
        #[arg(short = 'i', long = "index")]
        index: Option<String>,
        #[arg(short = 'n', long = "length", default_value_t = 1000)]
        reference_length: usize,
        #[arg(short = 'k', long = "kmer", default_value_t = 3)]
        kmer_len: usize,
        #[arg(short = 'l', long = "read-length", default_value_t = 10)]
        read_length: usize,
        #[arg(short = 'm', long = "reads", default_value_t = 100)]
        num_reads: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        /// What to do when a read's seed k-mer is not in the index
        #[arg(long = "seed-miss", value_enum, default_value_t = SeedMissPolicy::Scan)]
        seed_miss: SeedMissPolicy,
        /// Write the sampled reads as FASTQ
        #[arg(long = "reads-out")]
        reads_out: Option<String>,
        /// Print the assembled scaffold
        #[arg(long = "show-scaffold")]
        show_scaffold: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Index { reference, output, reference_length, kmer_len, seed } => {
            run_index(reference.as_deref(), &output, reference_length, kmer_len, seed)
        }
        Commands::Simulate {
            reference,
            index,
            reference_length,
            kmer_len,
            read_length,
            num_reads,
            seed,
            threads,
            seed_miss,
            reads_out,
            show_scaffold,
        } => {
            let config = SimConfig {
                reference_length,
                kmer_len,
                read_length,
                num_reads,
                seed,
                threads,
                seed_miss,
            };
            run_simulate(config, reference.as_deref(), index.as_deref(), reads_out.as_deref(), show_scaffold)
        }
    }
}

fn load_reference(path: &str) -> Result<Genome> {
    let reference =
        fasta::read_genome_file(path).with_context(|| format!("cannot read reference FASTA '{}'", path))?;
    log::info!(
        "loaded reference '{}'{} ({} bp) from {}",
        reference.id,
        reference.desc.as_deref().map(|d| format!(" [{}]", d)).unwrap_or_default(),
        reference.genome.len(),
        path
    );
    Ok(reference.genome)
}

fn load_index(path: &str) -> Result<KmerIndex> {
    let idx = KmerIndex::load_from_file(path).with_context(|| format!("cannot load k-mer index '{}'", path))?;
    if let Some(meta) = &idx.meta {
        log::info!(
            "loaded index {} (k={}, {} bp, reference {}, built {})",
            path,
            idx.k,
            idx.genome_len(),
            meta.reference_file.as_deref().unwrap_or("?"),
            meta.build_timestamp.as_deref().unwrap_or("?")
        );
    }
    Ok(idx)
}

fn run_index(reference: Option<&str>, output: &str, reference_length: usize, kmer_len: usize, seed: Option<u64>) -> Result<()> {
    let genome = match reference {
        Some(path) => load_reference(path)?,
        None => {
            let mut rng = StdRng::seed_from_u64(pipeline::resolve_seed(seed));
            genome::generate_genome(reference_length, &mut rng).context("cannot generate reference genome")?
        }
    };

    let mut idx = index::build_index(&genome, kmer_len).context("cannot build k-mer index")?;
    idx.set_meta(IndexMeta {
        reference_file: Some(reference.unwrap_or("random").to_string()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });

    println!("reference_length: {}", genome.len());
    println!("kmer_length: {}", kmer_len);
    println!("distinct_kmers: {}", idx.len());
    println!("max_occurrences: {}", idx.max_occurrences());

    let out_path = format!("{}.kmi", output);
    idx.save_to_file(&out_path)
        .with_context(|| format!("cannot write index to '{}'", out_path))?;
    println!("k-mer index saved: {}", out_path);

    // the indexed genome travels with the index so later runs can reuse it
    let fa_path = format!("{}.fa", output);
    fasta::write_genome_file(&fa_path, output, &genome)
        .with_context(|| format!("cannot write reference to '{}'", fa_path))?;
    println!("reference saved: {}", fa_path);
    Ok(())
}

fn run_simulate(
    mut config: SimConfig,
    reference: Option<&str>,
    index_path: Option<&str>,
    reads_out: Option<&str>,
    show_scaffold: bool,
) -> Result<()> {
    let seed = pipeline::resolve_seed(config.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = match (index_path, reference) {
        (Some(ipath), reference) => {
            let idx = load_index(ipath)?;
            if let Some(path) = reference {
                let genome = load_reference(path)?;
                if !idx.matches(&genome) {
                    anyhow::bail!("index '{}' was not built from reference '{}'", ipath, path);
                }
            }
            if config.kmer_len != idx.k {
                log::info!("using k={} from index (ignoring --kmer {})", idx.k, config.kmer_len);
                config.kmer_len = idx.k;
            }
            pipeline::run_on_index(&config, idx, &mut rng).context("simulation failed")?
        }
        (None, Some(path)) => {
            let genome = load_reference(path)?;
            pipeline::run_on_genome(&config, genome, &mut rng).context("simulation failed")?
        }
        (None, None) => {
            config.seed = Some(seed);
            pipeline::run_simulation(&config).context("simulation failed")?
        }
    };
    report.seed = Some(seed);

    print!("{}", report);
    if show_scaffold {
        println!("scaffold: {}", report.scaffold.to_string_lossy());
    }

    if let Some(path) = reads_out {
        let fh = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path))?;
        let mut w = FastqWriter::new(std::io::BufWriter::new(fh), "read");
        let n = w
            .write_reads(&report.sampled.reads)
            .with_context(|| format!("cannot write reads to '{}'", path))?;
        log::info!("wrote {} reads to {}", n, path);
    }
    Ok(())
}
