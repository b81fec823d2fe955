// MixedDataset — blend heterogeneous annotation sources with fixed ratios
//
// The source list is ordered: the first entry is the primary (clean,
// mocap-quality) source, the last is a small specialized source, and
// everything in between is the "in-the-wild" bucket. Each lookup draws a
// uniform value and dispatches through a cumulative probability partition;
// indices wrap modulo each source's length, so one epoch is as long as the
// largest source and the others are over/undersampled.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

use crate::dataset::{PoseDataset, PoseSample};
use crate::error::{DataError, Result};
use crate::source::{SourceConfig, SourceLoader};

/// The six sources the training recipe was tuned on, in partition order.
pub const DEFAULT_SOURCES: [&str; 6] = ["h36m", "lsp-orig", "mpii", "lspet", "coco", "mpi-inf-3dhp"];

/// Tolerance for the final cumulative bound's distance from 1.0.
const PARTITION_TOL: f64 = 1e-6;

/// The mixing table: how much probability mass each bucket receives.
///
/// The first source gets `primary_fraction`, the last gets `tail_fraction`,
/// and the remaining mass is split over the in-the-wild sources in
/// proportion to their lengths. The defaults (0.3 / 0.1) encode the
/// hand-tuned 30% H36M / 60% in-the-wild / 10% MPI-INF-3DHP recipe.
#[derive(Debug, Clone, Copy)]
pub struct MixSpec {
    /// Probability mass for the first (primary) source.
    pub primary_fraction: f64,
    /// Probability mass for the last (tail) source.
    pub tail_fraction: f64,
}

impl Default for MixSpec {
    fn default() -> Self {
        Self {
            primary_fraction: 0.3,
            tail_fraction: 0.1,
        }
    }
}

impl MixSpec {
    pub fn new(primary_fraction: f64, tail_fraction: f64) -> Self {
        Self {
            primary_fraction,
            tail_fraction,
        }
    }

    fn validate(&self) -> Result<()> {
        let ok = (0.0..1.0).contains(&self.primary_fraction)
            && (0.0..1.0).contains(&self.tail_fraction)
            && self.primary_fraction + self.tail_fraction < 1.0;
        if ok {
            Ok(())
        } else {
            Err(DataError::InvalidMixSpec {
                primary: self.primary_fraction,
                tail: self.tail_fraction,
            })
        }
    }
}

/// Several annotation sources presented as one dataset with a fixed
/// sampling policy.
///
/// Immutable after construction: the source list, the name→index map, the
/// cumulative partition, and the reported length are all fixed, so lookups
/// are safe from any number of worker threads. The per-lookup random draw
/// uses a thread-local generator; no RNG state is shared.
pub struct MixedDataset {
    sources: Vec<Box<dyn PoseDataset>>,
    source_index: HashMap<String, usize>,
    /// Cumulative probability bounds, one per source, last ≈ 1.0.
    partition: Vec<f64>,
    /// Reported epoch length: the longest source's length.
    length: usize,
}

impl std::fmt::Debug for MixedDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixedDataset")
            .field(
                "sources",
                &self.sources.iter().map(|s| s.name()).collect::<Vec<_>>(),
            )
            .field("partition", &self.partition)
            .field("length", &self.length)
            .finish()
    }
}

impl MixedDataset {
    /// Load one source per name (in order) via `loader`, then mix them.
    pub fn new(
        config: &SourceConfig,
        loader: &dyn SourceLoader,
        names: &[&str],
        mix: MixSpec,
    ) -> Result<Self> {
        let sources = names
            .iter()
            .map(|name| loader.load(config, name))
            .collect::<Result<Vec<_>>>()?;
        Self::from_sources(sources, mix)
    }

    /// The standard six-source recipe with the default 0.3 / 0.1 split.
    pub fn with_default_sources(config: &SourceConfig, loader: &dyn SourceLoader) -> Result<Self> {
        Self::new(config, loader, &DEFAULT_SOURCES, MixSpec::default())
    }

    /// Mix already-built sources.
    ///
    /// Fails fast on anything that would make the partition degenerate:
    /// fewer than 3 sources, a duplicate or empty source, an empty
    /// in-the-wild bucket, or out-of-range fractions.
    pub fn from_sources(sources: Vec<Box<dyn PoseDataset>>, mix: MixSpec) -> Result<Self> {
        mix.validate()?;
        if sources.len() < 3 {
            return Err(DataError::TooFewSources { got: sources.len() });
        }

        let mut source_index = HashMap::with_capacity(sources.len());
        for (i, ds) in sources.iter().enumerate() {
            if ds.is_empty() {
                return Err(DataError::EmptySource(ds.name().to_string()));
            }
            if source_index.insert(ds.name().to_string(), i).is_some() {
                return Err(DataError::DuplicateSource(ds.name().to_string()));
            }
        }

        let itw = &sources[1..sources.len() - 1];
        let length_itw: usize = itw.iter().map(|ds| ds.len()).sum();
        if length_itw == 0 {
            return Err(DataError::EmptyItwBucket(
                itw.iter().map(|ds| ds.name().to_string()).collect(),
            ));
        }

        let itw_mass = 1.0 - mix.primary_fraction - mix.tail_fraction;
        let mut partition = Vec::with_capacity(sources.len());
        let mut acc = mix.primary_fraction;
        partition.push(acc);
        for ds in itw {
            acc += itw_mass * ds.len() as f64 / length_itw as f64;
            partition.push(acc);
        }
        acc += mix.tail_fraction;
        partition.push(acc);
        let last = partition[sources.len() - 1];
        if (last - 1.0).abs() >= PARTITION_TOL {
            return Err(DataError::PartitionNotNormalized { last });
        }

        let length = sources.iter().map(|ds| ds.len()).max().unwrap_or(0);

        log::info!(
            "mixed dataset: {} sources, epoch length {}, partition {:?}",
            sources.len(),
            length,
            partition
        );

        Ok(Self {
            sources,
            source_index,
            partition,
            length,
        })
    }

    /// Number of samples per epoch: the longest source's length.
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Draw a source at random and fetch its sample for `index` (wrapped).
    pub fn get(&self, index: usize) -> Result<PoseSample> {
        self.get_with(index, &mut thread_rng())
    }

    /// Like [`get`](Self::get) but with a caller-supplied generator, so a
    /// seeded `StdRng` gives a reproducible sample stream.
    pub fn get_with<R: Rng + ?Sized>(&self, index: usize, rng: &mut R) -> Result<PoseSample> {
        let p: f64 = rng.gen();
        let ds = &self.sources[self.select(p)];
        ds.get(index % ds.len())
    }

    /// Reproducible lookup: one draw from a `StdRng` seeded with `seed`.
    pub fn get_seeded(&self, index: usize, seed: u64) -> Result<PoseSample> {
        self.get_with(index, &mut StdRng::seed_from_u64(seed))
    }

    /// Map a uniform draw in `[0, 1)` to a source index: the first source
    /// whose cumulative bound reaches `p` wins.
    ///
    /// If `p` lands past every bound (the last bound sits within floating
    /// tolerance of 1.0, so only drift could cause this) the last source is
    /// selected rather than failing.
    pub fn select(&self, p: f64) -> usize {
        for (i, &bound) in self.partition.iter().enumerate() {
            if p <= bound {
                return i;
            }
        }
        log::warn!("draw {p} exceeded final partition bound; selecting last source");
        self.partition.len() - 1
    }

    /// Index of the source named `name`, if configured.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.source_index.get(name).copied()
    }

    /// The cumulative probability bounds, one per source.
    pub fn partition(&self) -> &[f64] {
        &self.partition
    }

    /// The configured sources, in partition order.
    pub fn sources(&self) -> &[Box<dyn PoseDataset>] {
        &self.sources
    }
}

impl PoseDataset for MixedDataset {
    fn len(&self) -> usize {
        self.length
    }

    fn get(&self, index: usize) -> Result<PoseSample> {
        MixedDataset::get(self, index)
    }

    fn name(&self) -> &str {
        "mixed"
    }
}
